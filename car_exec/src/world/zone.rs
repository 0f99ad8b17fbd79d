//! Goal zone trigger
//!
//! A rectangular region which ends the mission once the vehicle is inside it
//! and pointing the right way.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use nalgebra::{Vector2, Vector3};
use serde::Deserialize;

// Internal
use crate::loc::Pose;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// An axis aligned rectangular goal zone.
#[derive(Debug, Clone, Deserialize)]
pub struct GoalZone {
    pub centre_m: Vector2<f64>,

    pub half_extents_m: Vector2<f64>,

    /// Heading the vehicle should be facing inside the zone
    pub heading_rad: f64,

    /// Minimum alignment (cosine of the heading error) for the trigger to
    /// fire
    pub alignment_threshold: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl GoalZone {
    /// True if the given position lies inside the zone.
    pub fn contains(&self, position_m: &Vector3<f64>) -> bool {
        (position_m.x - self.centre_m.x).abs() <= self.half_extents_m.x
            && (position_m.y - self.centre_m.y).abs() <= self.half_extents_m.y
    }

    /// True if the vehicle is inside the zone and sufficiently aligned with
    /// the zone heading.
    pub fn is_satisfied(&self, pose: &Pose) -> bool {
        if !self.contains(&pose.position_m) {
            return false;
        }

        let zone_forward = Vector2::new(self.heading_rad.cos(), self.heading_rad.sin());
        let forward = pose.forward();
        let alignment = Vector2::new(forward.x, forward.y).dot(&zone_forward);

        alignment > self.alignment_threshold
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn zone() -> GoalZone {
        GoalZone {
            centre_m: Vector2::new(10.0, 0.0),
            half_extents_m: Vector2::new(2.0, 1.5),
            heading_rad: 0.0,
            alignment_threshold: 0.95,
        }
    }

    #[test]
    fn test_trigger() {
        let zone = zone();

        // Inside and aligned
        assert!(zone.is_satisfied(&Pose::new(Vector3::new(10.5, 0.5, 0.0), 0.0)));

        // Inside but misaligned
        assert!(!zone.is_satisfied(&Pose::new(
            Vector3::new(10.5, 0.5, 0.0),
            std::f64::consts::FRAC_PI_2
        )));

        // Aligned but outside
        assert!(!zone.is_satisfied(&Pose::new(Vector3::new(15.0, 0.0, 0.0), 0.0)));
    }
}
