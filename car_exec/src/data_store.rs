//! # Data Store

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use nalgebra::Vector3;

// Internal
use crate::{loc::Pose, loco_ctrl, path::Path, traj_plan};
use util::archive::Archiver;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Global data store for the executable.
#[derive(Default)]
pub struct DataStore {
    // Cycle management
    /// Number of cycles already executed
    pub num_cycles: u128,

    /// True if this cycle falls on a 1Hz boundary
    pub is_1_hz_cycle: bool,

    /// Elapsed session time at the start of the cycle
    pub elapsed_s: f64,

    // Localisation
    pub pose: Option<Pose>,

    // Goal
    pub goal_m: Option<Vector3<f64>>,

    // TrajPlan
    pub traj_plan: traj_plan::TrajPlan,
    pub path: Path,
    pub traj_plan_report: traj_plan::StatusReport,
    pub traj_plan_arch: Archiver,

    // LocoCtrl
    pub loco_ctrl: loco_ctrl::LocoCtrl,
    pub loco_ctrl_output: loco_ctrl::OutputData,
    pub loco_ctrl_status_rpt: loco_ctrl::StatusReport,

    // Monitoring counters
    /// Number of consecutive cycle overruns
    pub num_consec_cycle_overruns: u64,
}

// ---------------------------------------------------------------------------
// IMPLS
// ---------------------------------------------------------------------------

impl DataStore {
    /// Perform actions required at the start of a cycle.
    ///
    /// Clears those items that need clearing at the start of a cycle, and
    /// sets the 1Hz cycle flag.
    pub fn cycle_start(&mut self, cycle_frequency_hz: f64) {
        self.is_1_hz_cycle = self.num_cycles % (cycle_frequency_hz as u128) == 0;

        self.path = Path::new_empty();
        self.traj_plan_report = traj_plan::StatusReport::default();
        self.loco_ctrl_output = loco_ctrl::OutputData::default();
        self.loco_ctrl_status_rpt = loco_ctrl::StatusReport::default();

        self.elapsed_s = util::session::get_elapsed_seconds();
    }
}
