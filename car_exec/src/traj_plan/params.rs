//! Trajectory planning parameters

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::Deserialize;

// Internal
use super::{LayerMask, TrajPlanError};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for trajectory planning.
///
/// The defaults carry the calibration the planner was tuned with. None of the
/// scoring constants have a derivation, they are tuning values, which is why
/// they are parameters rather than literals.
#[derive(Debug, Clone, Deserialize)]
pub struct Params {
    /// Maximum distance at which obstacles are sensed.
    ///
    /// Units: meters
    pub detection_range_m: f64,

    /// Width of the vehicle, used to spread obstruction rays across the body.
    ///
    /// Units: meters
    pub vehicle_width_m: f64,

    /// Distance the planning cursor advances per step.
    ///
    /// Units: meters
    pub step_distance_m: f64,

    /// Maximum number of cursor steps per planning call.
    pub max_steps: usize,

    /// Offset along the vehicle's forward axis from the pose reference point
    /// to the start of the planned path (roughly the front of the vehicle).
    ///
    /// Units: meters
    pub start_offset_m: f64,

    /// Minimum time between changes of the committed avoidance side.
    ///
    /// Units: seconds
    pub side_switch_cooldown_s: f64,

    /// Magnitudes of the candidate heading offsets, tried to either side of
    /// the direct line to the goal. Straight ahead is always a candidate and
    /// need not be listed.
    ///
    /// Units: degrees, all entries positive
    pub candidate_angles_deg: Vec<f64>,

    /// Number of parallel obstruction rays spread across the vehicle width.
    pub num_rays: usize,

    /// Multiple of the vehicle width at which the two outer rays of the
    /// coarse obstruction check are offset during a cooldown re-search.
    pub fallback_ray_offset_factor: f64,

    /// Score bonus applied to candidates on the committed side.
    pub side_bias_bonus: f64,

    /// Score penalty applied to candidates opposite the committed side.
    pub side_bias_penalty: f64,

    /// The committed side is released when the chosen heading is within this
    /// angle of the direct line and the way ahead is clear.
    ///
    /// Units: degrees
    pub side_release_angle_deg: f64,

    /// Minimum lateral goal offset while avoiding, as a fraction of the
    /// vehicle width.
    pub lateral_offset_min_factor: f64,

    /// Maximum lateral goal offset while avoiding, as a fraction of the
    /// vehicle width.
    pub lateral_offset_max_factor: f64,

    /// Height waypoints are normalised to on output.
    ///
    /// Units: meters
    pub ground_height_m: f64,

    /// Layers obstruction rays are cast against.
    pub obstacle_layers: LayerMask,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for Params {
    fn default() -> Self {
        Self {
            detection_range_m: 10.0,
            vehicle_width_m: 2.0,
            step_distance_m: 1.0,
            max_steps: 200,
            start_offset_m: 3.22,
            side_switch_cooldown_s: 0.5,
            candidate_angles_deg: vec![15.0, 30.0, 45.0, 60.0],
            num_rays: 5,
            fallback_ray_offset_factor: 5.0,
            side_bias_bonus: 0.1,
            side_bias_penalty: 0.2,
            side_release_angle_deg: 10.0,
            lateral_offset_min_factor: 0.6,
            lateral_offset_max_factor: 1.2,
            ground_height_m: 0.0,
            obstacle_layers: LayerMask::OBSTACLE,
        }
    }
}

impl Params {
    /// Validate the parameters.
    ///
    /// Invalid values would cause degenerate or unbounded planning loops, so
    /// they are rejected here rather than during planning.
    pub fn validate(&self) -> Result<(), TrajPlanError> {
        if !(self.detection_range_m > 0.0) {
            return Err(TrajPlanError::InvalidParams(format!(
                "detection_range_m must be positive, got {}",
                self.detection_range_m
            )));
        }
        if !(self.vehicle_width_m > 0.0) {
            return Err(TrajPlanError::InvalidParams(format!(
                "vehicle_width_m must be positive, got {}",
                self.vehicle_width_m
            )));
        }
        if !(self.step_distance_m > 0.0) {
            return Err(TrajPlanError::InvalidParams(format!(
                "step_distance_m must be positive, got {}",
                self.step_distance_m
            )));
        }
        if self.max_steps == 0 {
            return Err(TrajPlanError::InvalidParams(
                "max_steps must be greater than zero".into(),
            ));
        }
        if !(self.side_switch_cooldown_s >= 0.0) {
            return Err(TrajPlanError::InvalidParams(format!(
                "side_switch_cooldown_s must not be negative, got {}",
                self.side_switch_cooldown_s
            )));
        }
        if self.num_rays < 2 {
            return Err(TrajPlanError::InvalidParams(format!(
                "num_rays must be at least 2, got {}",
                self.num_rays
            )));
        }
        if self
            .candidate_angles_deg
            .iter()
            .any(|a| !a.is_finite() || *a <= 0.0)
        {
            return Err(TrajPlanError::InvalidParams(format!(
                "candidate_angles_deg must all be positive, got {:?}",
                self.candidate_angles_deg
            )));
        }
        if !(self.lateral_offset_min_factor > 0.0)
            || self.lateral_offset_max_factor < self.lateral_offset_min_factor
        {
            return Err(TrajPlanError::InvalidParams(format!(
                "lateral offset factors must satisfy 0 < min <= max, got {} and {}",
                self.lateral_offset_min_factor, self.lateral_offset_max_factor
            )));
        }

        Ok(())
    }
}
