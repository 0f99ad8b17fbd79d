//! Parameters structure for LocoCtrl

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Deserialize;

use super::LocoCtrlError;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for locomotion control.
#[derive(Debug, Clone, Deserialize)]
pub struct Params {
    /// Distance ahead of the front axle at which the pursuit target is
    /// selected.
    ///
    /// Units: meters
    pub lookahead_m: f64,

    /// Offset along the vehicle's forward axis from the pose reference point
    /// to the centre of the front axle.
    ///
    /// Units: meters
    pub front_axle_offset_m: f64,

    /// Maximum steer axis absolute position.
    ///
    /// Units: radians
    pub max_steer_angle_rad: f64,

    /// Torque demanded of the driven wheels under full throttle.
    ///
    /// Units: newton meters
    pub motor_torque_nm: f64,

    /// Speed above which drive torque is cut.
    ///
    /// Units: meters/second
    pub max_speed_ms: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for Params {
    fn default() -> Self {
        Self {
            lookahead_m: 3.0,
            front_axle_offset_m: 1.4,
            max_steer_angle_rad: 30f64.to_radians(),
            motor_torque_nm: 1500.0,
            max_speed_ms: 20.0,
        }
    }
}

impl Params {
    /// Validate the parameters, rejecting values that would produce a
    /// degenerate controller.
    pub fn validate(&self) -> Result<(), LocoCtrlError> {
        if !(self.lookahead_m > 0.0) {
            return Err(LocoCtrlError::InvalidParams(format!(
                "lookahead_m must be positive, got {}",
                self.lookahead_m
            )));
        }
        if !(self.max_steer_angle_rad > 0.0) {
            return Err(LocoCtrlError::InvalidParams(format!(
                "max_steer_angle_rad must be positive, got {}",
                self.max_steer_angle_rad
            )));
        }
        if !(self.motor_torque_nm > 0.0) {
            return Err(LocoCtrlError::InvalidParams(format!(
                "motor_torque_nm must be positive, got {}",
                self.motor_torque_nm
            )));
        }
        if !(self.max_speed_ms > 0.0) {
            return Err(LocoCtrlError::InvalidParams(format!(
                "max_speed_ms must be positive, got {}",
                self.max_speed_ms
            )));
        }

        Ok(())
    }
}
