//! Kinematic vehicle model
//!
//! A simple bicycle model, just enough to close the loop between the
//! locomotion demands and the pose the planner sees on the next cycle. This
//! is not a dynamics simulation.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
use crate::loc::Pose;
use util::maths::clamp01;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// The simulated vehicle.
#[derive(Debug, Clone)]
pub struct Vehicle {
    pose: Pose,
    speed_ms: f64,
    wheelbase_m: f64,
    accel_ms2: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Vehicle {
    pub fn new(pose: Pose, wheelbase_m: f64, accel_ms2: f64) -> Self {
        Self {
            pose,
            speed_ms: 0.0,
            wheelbase_m,
            accel_ms2,
        }
    }

    pub fn pose(&self) -> Pose {
        self.pose
    }

    pub fn speed_ms(&self) -> f64 {
        self.speed_ms
    }

    /// Advance the bicycle model by one time step.
    ///
    /// Positive steer angles turn the vehicle left (anticlockwise about Z).
    /// Throttle is normalised to [0, 1].
    pub fn step(&mut self, steer_rad: f64, throttle: f64, dt_s: f64) {
        self.speed_ms += clamp01(throttle) * self.accel_ms2 * dt_s;

        let heading_rad = self.pose.heading()
            + self.speed_ms / self.wheelbase_m * steer_rad.tan() * dt_s;
        let position_m = self.pose.position_m + self.pose.forward() * self.speed_ms * dt_s;

        self.pose = Pose::new(position_m, heading_rad);
    }
}
