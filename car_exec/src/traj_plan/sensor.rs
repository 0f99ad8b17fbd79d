//! Obstacle sensing interface used by the trajectory planner
//!
//! The planner never performs ray-geometry intersection itself, it only
//! consumes this capability. The executable injects the simulated world as
//! the sensor; tests inject scripted fakes.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A bit mask selecting which classes of world object a ray interacts with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerMask(pub u32);

// ---------------------------------------------------------------------------
// TRAITS
// ---------------------------------------------------------------------------

/// A directional environment query capability.
///
/// Implementations must be deterministic for fixed geometry so that planning
/// is reproducible.
pub trait ObstacleSensor {
    /// Cast a ray from `origin_m` along `direction`, which must be unit
    /// length.
    ///
    /// Returns the distance to the nearest hit on an object matching
    /// `layers`, within `max_dist_m`, or `None` if the ray is clear.
    fn raycast(
        &self,
        origin_m: Vector3<f64>,
        direction: Vector3<f64>,
        max_dist_m: f64,
        layers: LayerMask,
    ) -> Option<f64>;
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl LayerMask {
    /// Matches nothing.
    pub const NONE: LayerMask = LayerMask(0);

    /// The layer static obstacles live on.
    pub const OBSTACLE: LayerMask = LayerMask(1);

    /// Matches every layer.
    pub const ALL: LayerMask = LayerMask(u32::MAX);

    /// True if the two masks share at least one layer.
    pub fn intersects(&self, other: LayerMask) -> bool {
        self.0 & other.0 != 0
    }
}
