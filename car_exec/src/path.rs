//! # Path
//!
//! This module defines the path produced by the trajectory planner. A path is
//! an ordered sequence of waypoints from the vehicle's current position
//! towards the goal. Paths are recomputed in full every cycle and are only
//! ever replaced, never edited in place.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A path defining the desired trajectory of the vehicle.
///
/// Waypoints are 3D points in the World frame with the vertical (Z)
/// component normalised to the reference ground height.
#[derive(Clone, Default, Serialize, Deserialize, Debug)]
pub struct Path {
    pub points_m: Vec<Vector3<f64>>,
}

/// A segment between two path points
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathSegment {
    /// The start point of the segment
    pub start_m: Vector3<f64>,

    /// The target of the segment
    pub target_m: Vector3<f64>,

    /// The length of the segment
    pub length_m: f64,

    /// Unit vector pointing in the direction of the segment
    pub direction: Vector3<f64>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Path {
    /// Create a new empty path
    pub fn new_empty() -> Self {
        Path {
            points_m: Vec::new(),
        }
    }

    /// Returns the path segment connecting the target point and the previous
    /// point.
    ///
    /// If no segment exists (the target is the first point in the sequence,
    /// is beyond the end of the sequence, or the segment would be degenerate)
    /// then `None` will be returned.
    pub fn get_segment_to_target(&self, target_index: usize) -> Option<PathSegment> {
        // If the path is invalid (not enough points)
        if self.points_m.len() < 2 {
            return None;
        }

        // Catch invalid targets
        if target_index == 0 || target_index >= self.points_m.len() {
            return None;
        }

        let start_m = self.points_m[target_index - 1];
        let target_m = self.points_m[target_index];

        let length_m = (target_m - start_m).norm();

        // Zero length segments have no direction
        if length_m <= std::f64::EPSILON {
            return None;
        }

        Some(PathSegment {
            start_m,
            target_m,
            length_m,
            direction: (target_m - start_m) / length_m,
        })
    }

    /// Return the length of the path in meters.
    ///
    /// If the path is empty (not enough points) then `None` is returned.
    pub fn get_length(&self) -> Option<f64> {
        if self.points_m.len() < 2 {
            return None;
        }

        // Length is the sum of the length of all path segments
        let mut length_m = 0f64;
        for i in 1..self.points_m.len() {
            if let Some(segment) = self.get_segment_to_target(i) {
                length_m += segment.length_m;
            }
        }

        Some(length_m)
    }

    /// Get the number of points in the path
    pub fn get_num_points(&self) -> usize {
        self.points_m.len()
    }

    /// Get the final point in the path, or `None` if the path is empty.
    pub fn get_last_point(&self) -> Option<Vector3<f64>> {
        self.points_m.last().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.points_m.is_empty()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_relative_eq;

    fn straight_path() -> Path {
        Path {
            points_m: vec![
                Vector3::new(0.0, 0.0, 0.0),
                Vector3::new(1.0, 0.0, 0.0),
                Vector3::new(2.0, 0.0, 0.0),
                Vector3::new(2.0, 2.0, 0.0),
            ],
        }
    }

    #[test]
    fn test_segments() {
        let path = straight_path();

        // First point has no segment leading to it, nor does anything past
        // the end of the path
        assert!(path.get_segment_to_target(0).is_none());
        assert!(path.get_segment_to_target(4).is_none());

        let seg = path.get_segment_to_target(3).unwrap();
        assert_relative_eq!(seg.length_m, 2.0, epsilon = 1e-9);
        assert_relative_eq!(seg.direction, Vector3::y(), epsilon = 1e-9);
    }

    #[test]
    fn test_length() {
        assert!(Path::new_empty().get_length().is_none());
        assert_relative_eq!(straight_path().get_length().unwrap(), 4.0, epsilon = 1e-9);
    }
}
