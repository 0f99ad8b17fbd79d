//! # Trajectory Planning Test
//!
//! This binary runs the trajectory planner against a built in obstacle field
//! without the full executable. It is designed to allow quick and easy
//! development of the planner itself: the planned path is logged, saved into
//! the session directory and printed as JSON for plotting.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use color_eyre::{eyre::WrapErr, Result};
use log::info;
use nalgebra::Vector3;

use car_lib::{
    loc::Pose,
    traj_plan::{LayerMask, Params, TrajPlan},
    world::{Obstacle, World},
};
use util::{
    logger::{logger_init, LevelFilter},
    session::Session,
};

// ------------------------------------------------------------------------------------------------
// MAIN
// ------------------------------------------------------------------------------------------------

fn main() -> Result<()> {
    // ---- EARLY INITIALISATION ----

    // Initialise session
    let session = Session::new("plan_test", "sessions").wrap_err("Failed to create the session")?;

    // Initialise logger
    logger_init(LevelFilter::Trace, &session).wrap_err("Failed to initialise logging")?;

    info!("Trajectory Planning Test\n");

    // ---- BUILD THE WORLD ----

    let world = World::new(vec![
        Obstacle::circle(12.0, 0.5, 1.5, LayerMask::OBSTACLE),
        Obstacle::circle(22.0, -2.0, 1.0, LayerMask::OBSTACLE),
        Obstacle::rect(30.0, 3.0, 0.5, 4.0, LayerMask::OBSTACLE),
    ]);

    // ---- PLAN ----

    let mut planner = TrajPlan::with_params(Params::default())?;

    let pose = Pose::default();
    let goal_m = Vector3::new(40.0, 0.0, 0.0);

    let (path, report) = planner.current_path(&pose, goal_m, &world);

    info!(
        "Planned {} points in {} steps (truncated: {})",
        path.get_num_points(),
        report.num_steps,
        report.truncated
    );
    info!(
        "Committed side: {:?}, goal offset: {:.3} m",
        report.avoidance_side, report.goal_offset_m
    );
    info!(
        "Path length: {:.2} m",
        path.get_length().unwrap_or(0.0)
    );

    // ---- OUTPUT ----

    session.save("plan_test_path.json", &path);

    println!(
        "{}",
        serde_json::to_string_pretty(&path).wrap_err("Could not serialise the path")?
    );

    Ok(())
}
