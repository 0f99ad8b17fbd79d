//! Main car-side executable entry point.
//!
//! # Architecture
//!
//! The general execution methodology consists of:
//!
//!     - Initialise all modules
//!     - Main loop:
//!         - Pose acquisition from the simulated vehicle
//!         - Trajectory planning (obstacle avoiding path to the goal)
//!         - Locomotion control processing (pursuit of the planned path)
//!         - Vehicle kinematics update
//!         - Goal zone check
//!         - Archive writing
//!
//! The executable takes an optional single argument naming the scenario file
//! (relative to the `params` directory) to run; without it a default
//! scenario is used. The `CAR_SW_ROOT` environment variable must point at
//! the repository root.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use color_eyre::{
    eyre::{eyre, WrapErr},
    Report,
};
use log::{debug, info, warn};
use std::env;
use std::thread;
use std::time::{Duration, Instant};

// Internal
use car_lib::{
    data_store::DataStore,
    loco_ctrl,
    path::Path,
    world::{Scenario, World},
};
use util::{
    archive::{Archived, Archiver},
    logger::{logger_init, LevelFilter},
    module::State,
    session::Session,
};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Target period of one cycle.
const CYCLE_PERIOD_S: f64 = 0.10;

/// Number of cycles per second
const CYCLE_FREQUENCY_HZ: f64 = 1.0 / CYCLE_PERIOD_S;

/// The mission is abandoned if the goal zone hasn't been reached after this
/// many cycles.
const MAX_MISSION_CYCLES: u128 = 6000;

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Executable main function, entry point.
fn main() -> Result<(), Report> {
    // ---- EARLY INITIALISATION ----

    // Initialise session
    let session = Session::new("car_exec", "sessions").wrap_err("Failed to create the session")?;

    // Initialise logger
    logger_init(LevelFilter::Trace, &session).wrap_err("Failed to initialise logging")?;

    // Log information on this execution.
    info!("Car Software Executable\n");
    info!("Session directory: {:?}\n", session.session_root);

    // ---- LOAD SCENARIO ----

    // Collect all arguments
    let args: Vec<String> = env::args().collect();

    debug!("CLI arguments: {:?}", args);

    let scenario_file = match args.len() {
        1 => "scenario_parking.toml".to_string(),
        2 => args[1].clone(),
        _ => {
            return Err(eyre!(
                "Expected either zero or one argument, found {}",
                args.len() - 1
            ))
        }
    };

    info!("Loading scenario from \"{}\"", scenario_file);

    let scenario: Scenario =
        util::params::load(&scenario_file).wrap_err("Could not load the scenario")?;

    let mut world = World::from_scenario(&scenario).wrap_err("Could not build the world")?;

    info!(
        "World contains {} obstacles, goal at {:?}\n",
        world.num_obstacles(),
        world.goal_m
    );

    // ---- INITIALISE DATASTORE ----

    info!("Initialising modules...");

    let mut ds = DataStore::default();

    // ---- INITIALISE MODULES ----

    ds.traj_plan
        .init("traj_plan.toml")
        .wrap_err("Failed to initialise TrajPlan")?;
    info!("TrajPlan init complete");

    ds.loco_ctrl
        .init("loco_ctrl.toml", &session)
        .wrap_err("Failed to initialise LocoCtrl")?;
    info!("LocoCtrl init complete");

    ds.traj_plan_arch = Archiver::from_path(&session, "traj_plan/status_report.csv")
        .wrap_err("Failed to initialise the TrajPlan archive")?;

    ds.goal_m = Some(world.goal_m);

    info!("Module initialisation complete\n");

    // ---- MAIN LOOP ----

    info!("Begining main loop\n");

    let mut zone_reached = false;

    loop {
        // Get cycle start time
        let cycle_start_instant = Instant::now();

        // Clear items that need wiping at the start of the cycle
        ds.cycle_start(CYCLE_FREQUENCY_HZ);

        // ---- DATA INPUT ----

        ds.pose = Some(world.vehicle.pose());

        // ---- TRAJECTORY PLANNING ----

        // The cooldown advances in the same time base as the loop itself
        ds.traj_plan.update_cooldown(CYCLE_PERIOD_S);

        match (ds.pose, ds.goal_m) {
            (Some(pose), Some(goal_m)) => {
                let (path, report) = ds.traj_plan.current_path(&pose, goal_m, &world);
                ds.path = path;
                ds.traj_plan_report = report;
            }
            _ => {
                // Without a pose and a goal there is nothing to plan. Leave
                // the path empty so that LocoCtrl holds position.
                ds.path = Path::new_empty();
            }
        }

        // ---- LOCOMOTION CONTROL ----

        let loco_ctrl_input = loco_ctrl::InputData {
            path: ds.path.clone(),
            pose: ds.pose.unwrap_or_default(),
            speed_ms: world.vehicle.speed_ms(),
        };

        match ds.loco_ctrl.proc(&loco_ctrl_input) {
            Ok((output, report)) => {
                ds.loco_ctrl_output = output;
                ds.loco_ctrl_status_rpt = report;
            }
            Err(e) => {
                // A LocoCtrl error leaves the default (zero torque) output in
                // place, so just issue the warning and continue.
                warn!("Error during LocoCtrl processing: {}", e)
            }
        };

        // ---- VEHICLE UPDATE ----

        let throttle = if ds.loco_ctrl_output.drv_torque_nm[0] > 0.0 {
            1.0
        } else {
            0.0
        };
        world.vehicle.step(
            ds.loco_ctrl_output.str_abs_pos_rad[0],
            throttle,
            CYCLE_PERIOD_S,
        );

        // ---- GOAL ZONE ----

        if let Some(ref zone) = world.goal_zone {
            if zone.is_satisfied(&world.vehicle.pose()) {
                info!("Goal zone reached after {} cycles", ds.num_cycles);
                zone_reached = true;
            }
        }

        // ---- WRITE ARCHIVES ----

        if let Err(e) = ds.traj_plan_arch.serialise(&ds.traj_plan_report) {
            warn!("Could not archive the TrajPlan report: {}", e);
        }
        if let Err(e) = ds.loco_ctrl.write() {
            warn!("Could not write LocoCtrl archives: {}", e);
        }

        // Snapshot the planned path once a second for offline visualisation
        if ds.is_1_hz_cycle {
            session.save(format!("paths/path_{:07}.json", ds.num_cycles), &ds.path);
        }

        if zone_reached {
            break;
        }

        if ds.num_cycles >= MAX_MISSION_CYCLES {
            warn!("Mission timed out after {} cycles", ds.num_cycles);
            break;
        }

        // ---- CYCLE MANAGEMENT ----

        let cycle_dur = Instant::now() - cycle_start_instant;

        // Get sleep duration
        match Duration::from_secs_f64(CYCLE_PERIOD_S).checked_sub(cycle_dur) {
            Some(d) => {
                ds.num_consec_cycle_overruns = 0;
                thread::sleep(d);
            }
            None => {
                warn!(
                    "Cycle overran by {:.06} s",
                    cycle_dur.as_secs_f64() - CYCLE_PERIOD_S
                );
                ds.num_consec_cycle_overruns += 1;
            }
        }

        // Increment cycle counter
        ds.num_cycles += 1;
    }

    // ---- SHUTDOWN ----

    info!("End of execution");

    Ok(())
}
