//! # Localisation module
//!
//! This module defines the pose of the vehicle in the World (W) frame. The
//! frame is right handed with X forward (at zero heading), Y to the left and
//! Z up. Motion is planar, so the attitude is a pure rotation about Z.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use nalgebra::{UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// The current pose (position and attitude in the W frame) of the vehicle.
#[derive(Debug, Copy, Clone, Serialize, Deserialize)]
pub struct Pose {
    /// The position in the W frame
    pub position_m: Vector3<f64>,

    /// The attitude of the vehicle in the W frame. This is a quaternion that
    /// will rotate an object from the body frame into the W frame.
    pub attitude_q: UnitQuaternion<f64>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for Pose {
    fn default() -> Self {
        Self {
            position_m: Vector3::zeros(),
            attitude_q: UnitQuaternion::identity(),
        }
    }
}

impl Pose {
    /// Create a new planar pose from a position and a heading about the Z
    /// axis.
    pub fn new(position_m: Vector3<f64>, heading_rad: f64) -> Self {
        Self {
            position_m,
            attitude_q: UnitQuaternion::from_axis_angle(&Vector3::z_axis(), heading_rad),
        }
    }

    /// Return the unit vector pointing in the vehicle's forward direction.
    pub fn forward(&self) -> Vector3<f64> {
        self.attitude_q * Vector3::x()
    }

    /// Return the unit vector pointing out of the vehicle's right hand side.
    pub fn right(&self) -> Vector3<f64> {
        self.attitude_q * -Vector3::y()
    }

    /// Return the heading (angle to the positive W_X axis) of the vehicle in
    /// radians, positive anticlockwise about Z.
    pub fn heading(&self) -> f64 {
        self.attitude_q.euler_angles().2
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_body_axes() {
        let pose = Pose::new(Vector3::zeros(), 0.0);
        assert_relative_eq!(pose.forward(), Vector3::x(), epsilon = 1e-9);
        assert_relative_eq!(pose.right(), -Vector3::y(), epsilon = 1e-9);

        // Facing +Y (heading pi/2), the right hand side points along +X
        let pose = Pose::new(Vector3::zeros(), std::f64::consts::FRAC_PI_2);
        assert_relative_eq!(pose.forward(), Vector3::y(), epsilon = 1e-9);
        assert_relative_eq!(pose.right(), Vector3::x(), epsilon = 1e-9);
        assert_relative_eq!(pose.heading(), std::f64::consts::FRAC_PI_2, epsilon = 1e-9);
    }
}
