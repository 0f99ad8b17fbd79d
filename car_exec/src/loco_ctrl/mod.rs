//! # Locomotion control module
//!
//! Locomotion control converts the freshly planned path into actuator
//! demands using a pursuit scheme: it selects the first waypoint beyond a
//! lookahead distance from the front axle, steers the front wheels towards
//! it, and drives the front wheels at full torque until the speed limit is
//! reached. An empty path produces zero torque so the vehicle holds
//! position.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod params;
mod state;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
pub use params::*;
pub use state::*;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// The number of steer axes on the vehicle (the front wheels).
pub const NUM_STR_AXES: usize = 2;

/// The number of wheels on the vehicle, ordered front left, front right,
/// rear left, rear right.
pub const NUM_WHEELS: usize = 4;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors that can occur during LocoCtrl operation.
#[derive(Debug, thiserror::Error)]
pub enum LocoCtrlError {
    #[error("Could not load parameters: {0}")]
    ParamLoadError(#[from] util::params::LoadError),

    #[error("Invalid parameter: {0}")]
    InvalidParams(String),

    #[error("Could not initialise archives: {0}")]
    ArchInitError(#[from] util::archive::ArchiveError),
}
