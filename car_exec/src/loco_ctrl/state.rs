//! Implementations for the LocoCtrl state structure

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::trace;
use nalgebra::Vector3;
use serde::Serialize;

// Internal
use super::{LocoCtrlError, Params, NUM_STR_AXES, NUM_WHEELS};
use crate::loc::Pose;
use crate::path::Path;
use util::{
    archive::{Archived, ArchiveError, Archiver},
    module::State,
    params,
    session::Session,
};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Locomotion control module state
#[derive(Default)]
pub struct LocoCtrl {
    pub(crate) params: Params,

    pub(crate) report: StatusReport,
    arch_report: Archiver,

    pub(crate) output: Option<OutputData>,
}

/// Input data to Locomotion Control.
#[derive(Clone, Default)]
pub struct InputData {
    /// The path planned this cycle. May be empty, in which case the vehicle
    /// holds position.
    pub path: Path,

    /// The vehicle's current pose.
    pub pose: Pose,

    /// The vehicle's current speed.
    ///
    /// Units: meters/second
    pub speed_ms: f64,
}

/// Output demands from LocoCtrl that the vehicle must execute.
#[derive(Clone, Copy, Serialize, Debug)]
pub struct OutputData {
    /// Steer axis absolute position demand for the front wheels, positive
    /// turning the vehicle left.
    ///
    /// Units: radians
    pub str_abs_pos_rad: [f64; NUM_STR_AXES],

    /// Drive torque demand per wheel, ordered front left, front right, rear
    /// left, rear right. Only the front wheels are driven.
    ///
    /// Units: newton meters
    pub drv_torque_nm: [f64; NUM_WHEELS],
}

/// Status report for LocoCtrl processing.
#[derive(Clone, Copy, Default, Serialize, Debug)]
pub struct StatusReport {
    /// Index of the selected pursuit target within the path
    pub target_index: usize,

    /// The steer demand issued this cycle
    pub steer_rad: f64,

    /// True if drive torque was cut because the vehicle is at the speed
    /// limit
    pub speed_limited: bool,

    /// True if no path was available this cycle
    pub path_empty: bool,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for OutputData {
    fn default() -> Self {
        OutputData {
            str_abs_pos_rad: [0.0; NUM_STR_AXES],
            drv_torque_nm: [0.0; NUM_WHEELS],
        }
    }
}

impl State for LocoCtrl {
    type InitData = &'static str;
    type InitError = LocoCtrlError;

    type InputData = InputData;
    type OutputData = OutputData;
    type StatusReport = StatusReport;
    type ProcError = LocoCtrlError;

    /// Initialise the LocoCtrl module.
    ///
    /// Expected init data is the path to the parameter file.
    fn init(
        &mut self,
        init_data: Self::InitData,
        session: &Session,
    ) -> Result<(), Self::InitError> {
        self.params = params::load(init_data)?;
        self.params.validate()?;

        self.arch_report = Archiver::from_path(session, "loco_ctrl/status_report.csv")?;

        Ok(())
    }

    /// Perform cyclic processing of Locomotion Control.
    fn proc(
        &mut self,
        input_data: &Self::InputData,
    ) -> Result<(Self::OutputData, Self::StatusReport), Self::ProcError> {
        // Clear the status report
        self.report = StatusReport::default();

        // With no path to follow hold position
        if input_data.path.is_empty() {
            self.report.path_empty = true;

            let output = OutputData::default();
            self.output = Some(output);
            return Ok((output, self.report));
        }

        let pose = &input_data.pose;
        let front_axle_m =
            pose.position_m + pose.forward() * self.params.front_axle_offset_m;

        // Select the pursuit target: the first waypoint beyond the lookahead
        // distance, falling back to the final waypoint
        let points = &input_data.path.points_m;
        let mut target_index = points.len() - 1;
        for (index, point) in points.iter().enumerate() {
            if (point - front_axle_m).norm() > self.params.lookahead_m {
                target_index = index;
                break;
            }
        }
        self.report.target_index = target_index;

        let to_target: Vector3<f64> = points[target_index] - front_axle_m;

        let steer_rad = if to_target.norm() > std::f64::EPSILON {
            // Steer from the lateral component of the target direction in
            // the body frame, positive to the left
            let local = pose
                .attitude_q
                .inverse_transform_vector(&to_target.normalize());
            local.y.clamp(-1.0, 1.0) * self.params.max_steer_angle_rad
        } else {
            0.0
        };
        self.report.steer_rad = steer_rad;

        // Front wheel drive, cutting torque at the speed limit
        let torque_nm = if input_data.speed_ms < self.params.max_speed_ms {
            self.params.motor_torque_nm
        } else {
            self.report.speed_limited = true;
            0.0
        };

        let output = OutputData {
            str_abs_pos_rad: [steer_rad; NUM_STR_AXES],
            drv_torque_nm: [torque_nm, torque_nm, 0.0, 0.0],
        };

        trace!(
            "LocoCtrl output:\n    str: {:?}\n    drv: {:?}",
            output.str_abs_pos_rad,
            output.drv_torque_nm
        );

        self.output = Some(output);

        Ok((output, self.report))
    }
}

impl Archived for LocoCtrl {
    fn write(&mut self) -> Result<(), ArchiveError> {
        self.arch_report.serialise(self.report)
    }
}
