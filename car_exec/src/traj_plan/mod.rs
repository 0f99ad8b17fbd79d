//! # Trajectory planning module
//!
//! Trajectory planning is responsible for producing the path the vehicle
//! should follow to reach the goal, avoiding any obstacles in the way. The
//! planner is purely local, it holds no map of the world. Instead it walks a
//! simulated cursor from the vehicle towards the goal in fixed length steps,
//! and at each step greedily picks the best heading from a fan of candidate
//! directions around the direct line to the goal.
//!
//! A candidate direction is tested for obstruction by casting a number of
//! parallel rays, spread across the vehicle's width, through the obstacle
//! sensor. Obstructed candidates are rejected outright, and the survivors are
//! scored by how closely they follow the direct line to the goal.
//!
//! To stop the planner flip-flopping between passing an obstacle on the left
//! and on the right, the planner commits to an avoidance side. While a side
//! is committed candidates on that side receive a scoring bonus and the
//! opposite side a penalty, and the side may only change again once a
//! cooldown has elapsed. While the cooldown is running the planner instead
//! re-searches among directions consistent with the committed side, using a
//! coarser three ray check. The side is released once the way ahead is clear
//! and the chosen heading is nearly straight.
//!
//! Planning is recomputed from scratch every cycle, the previous path is
//! discarded rather than repaired. A fully blocked step truncates the path at
//! the last good cursor; this is a normal outcome, not an error.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

pub mod params;
pub mod sensor;
pub mod state;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
pub use params::Params;
pub use sensor::*;
pub use state::*;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors that can occur during TrajPlan operation.
#[derive(Debug, thiserror::Error)]
pub enum TrajPlanError {
    #[error("Could not load parameters: {0}")]
    ParamLoadError(#[from] util::params::LoadError),

    #[error("Invalid parameter: {0}")]
    InvalidParams(String),
}
