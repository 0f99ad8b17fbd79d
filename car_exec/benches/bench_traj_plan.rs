//! # Trajectory Planner Benchmark

use criterion::{criterion_group, criterion_main, Criterion};
use nalgebra::Vector3;

use car_lib::{
    loc::Pose,
    traj_plan::{LayerMask, Params, TrajPlan},
    world::{Obstacle, World},
};

fn traj_plan_benchmark(c: &mut Criterion) {
    // ---- Build a field of pillars between the start and the goal ----

    // Rows of pillars with passable gaps, offset row to row so the planner
    // has to weave
    let mut obstacles = Vec::new();
    for row in 0..8 {
        let x_m = 10.0 + 10.0 * row as f64;
        let y_offset_m = if row % 2 == 0 { 0.0 } else { 3.0 };
        for slot in -2..=2 {
            obstacles.push(Obstacle::circle(
                x_m,
                6.0 * slot as f64 + y_offset_m,
                0.8,
                LayerMask::OBSTACLE,
            ));
        }
    }

    let world = World::new(obstacles);

    let pose = Pose::default();
    let goal_m = Vector3::new(90.0, 0.0, 0.0);

    // Bench a full planning call, fresh planner each iteration so the side
    // hysteresis state doesn't leak between runs
    c.bench_function("TrajPlan::current_path", |b| {
        b.iter(|| {
            let mut planner = TrajPlan::with_params(Params::default()).unwrap();
            planner.current_path(&pose, goal_m, &world)
        })
    });
}

criterion_group!(benches, traj_plan_benchmark);
criterion_main!(benches);
