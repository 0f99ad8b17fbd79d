//! Scenario definition
//!
//! A scenario describes everything needed to set up a run: where the vehicle
//! starts, where the goal is, and what obstacles stand in the way. Scenarios
//! are TOML files loaded through `util::params`.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use nalgebra::Vector3;
use serde::Deserialize;

// Internal
use super::{GoalZone, Obstacle};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A complete description of one run of the executable.
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub vehicle: VehicleConfig,

    /// Goal position in the W frame
    pub goal_m: Vector3<f64>,

    /// Optional zone which ends the mission on entry
    pub goal_zone: Option<GoalZone>,

    #[serde(default)]
    pub obstacles: Vec<Obstacle>,
}

/// Initial state and geometry of the vehicle.
#[derive(Debug, Clone, Deserialize)]
pub struct VehicleConfig {
    pub start_position_m: Vector3<f64>,

    pub start_heading_rad: f64,

    /// Distance between the front and rear axles.
    ///
    /// Units: meters
    pub wheelbase_m: f64,

    /// Acceleration under full throttle.
    ///
    /// Units: meters/second^2
    pub accel_ms2: f64,
}
