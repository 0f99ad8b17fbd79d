//! # World module
//!
//! This module provides the simulated environment the vehicle drives in: a
//! static field of obstacles, the kinematic vehicle itself and an optional
//! goal zone. The world implements the planner's [`ObstacleSensor`]
//! capability through deterministic geometric raycasts, so planning against
//! a fixed world is reproducible.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod obstacle;
mod scenario;
mod vehicle;
mod zone;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use nalgebra::{Vector2, Vector3};

// Internal
pub use obstacle::*;
pub use scenario::*;
pub use vehicle::*;
pub use zone::*;

use crate::loc::Pose;
use crate::traj_plan::{LayerMask, ObstacleSensor};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// The simulated environment.
pub struct World {
    obstacles: Vec<Obstacle>,

    /// The vehicle being driven
    pub vehicle: Vehicle,

    /// The goal position in the W frame
    pub goal_m: Vector3<f64>,

    /// Zone which ends the mission when the vehicle settles in it
    pub goal_zone: Option<GoalZone>,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors associated with the world.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    #[error("Invalid scenario: {0}")]
    InvalidScenario(String),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl World {
    /// Build a world containing only obstacles, with the vehicle at the
    /// origin. Mainly useful for tests and benchmarks.
    pub fn new(obstacles: Vec<Obstacle>) -> Self {
        Self {
            obstacles,
            vehicle: Vehicle::new(Pose::default(), 2.8, 3.0),
            goal_m: Vector3::zeros(),
            goal_zone: None,
        }
    }

    /// Build the world described by a scenario.
    pub fn from_scenario(scenario: &Scenario) -> Result<Self, WorldError> {
        if !(scenario.vehicle.wheelbase_m > 0.0) {
            return Err(WorldError::InvalidScenario(format!(
                "vehicle wheelbase_m must be positive, got {}",
                scenario.vehicle.wheelbase_m
            )));
        }
        if !(scenario.vehicle.accel_ms2 > 0.0) {
            return Err(WorldError::InvalidScenario(format!(
                "vehicle accel_ms2 must be positive, got {}",
                scenario.vehicle.accel_ms2
            )));
        }

        let pose = Pose::new(
            scenario.vehicle.start_position_m,
            scenario.vehicle.start_heading_rad,
        );

        Ok(Self {
            obstacles: scenario.obstacles.clone(),
            vehicle: Vehicle::new(pose, scenario.vehicle.wheelbase_m, scenario.vehicle.accel_ms2),
            goal_m: scenario.goal_m,
            goal_zone: scenario.goal_zone.clone(),
        })
    }

    pub fn num_obstacles(&self) -> usize {
        self.obstacles.len()
    }
}

impl ObstacleSensor for World {
    /// Cast a ray against the static obstacle field.
    ///
    /// The query is planar: the origin and direction are projected onto the
    /// ground plane.
    fn raycast(
        &self,
        origin_m: Vector3<f64>,
        direction: Vector3<f64>,
        max_dist_m: f64,
        layers: LayerMask,
    ) -> Option<f64> {
        let origin = Vector2::new(origin_m.x, origin_m.y);
        let dir = Vector2::new(direction.x, direction.y);

        let norm = dir.norm();
        if norm < std::f64::EPSILON {
            return None;
        }
        let dir = dir / norm;

        self.obstacles
            .iter()
            .filter(|obstacle| obstacle.layers.intersects(layers))
            .filter_map(|obstacle| obstacle.ray_intersect(origin, dir, max_dist_m))
            .fold(None, |nearest, dist| {
                Some(nearest.map_or(dist, |n: f64| n.min(dist)))
            })
    }
}
