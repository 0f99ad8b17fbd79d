//! Host environment utility functions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use std::path::PathBuf;
use thiserror::Error;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Name of the environment variable pointing at the root of the software
/// repository. The `params` and `sessions` directories are resolved relative
/// to this root.
pub const ROOT_ENV_VAR: &str = "CAR_SW_ROOT";

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
#[error("The software root environment variable (CAR_SW_ROOT) is not set")]
pub struct RootNotSet;

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Get the root directory of the car software repository.
pub fn get_car_sw_root() -> Result<PathBuf, RootNotSet> {
    std::env::var(ROOT_ENV_VAR)
        .map(PathBuf::from)
        .map_err(|_| RootNotSet)
}
