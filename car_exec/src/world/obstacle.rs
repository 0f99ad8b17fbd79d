//! Static obstacle shapes and their ray intersections

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use nalgebra::Vector2;
use serde::Deserialize;

// Internal
use crate::traj_plan::LayerMask;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A static obstacle in the world.
#[derive(Debug, Clone, Deserialize)]
pub struct Obstacle {
    pub shape: Shape,

    /// Layers this obstacle lives on
    pub layers: LayerMask,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Supported obstacle footprints, all planar.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Shape {
    /// A circular pillar
    Circle {
        centre_m: Vector2<f64>,
        radius_m: f64,
    },

    /// An axis aligned rectangular wall
    Rect {
        centre_m: Vector2<f64>,
        half_extents_m: Vector2<f64>,
    },
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Obstacle {
    /// A circular obstacle at the given position.
    pub fn circle(x_m: f64, y_m: f64, radius_m: f64, layers: LayerMask) -> Self {
        Self {
            shape: Shape::Circle {
                centre_m: Vector2::new(x_m, y_m),
                radius_m,
            },
            layers,
        }
    }

    /// An axis aligned rectangular obstacle at the given position.
    pub fn rect(x_m: f64, y_m: f64, half_x_m: f64, half_y_m: f64, layers: LayerMask) -> Self {
        Self {
            shape: Shape::Rect {
                centre_m: Vector2::new(x_m, y_m),
                half_extents_m: Vector2::new(half_x_m, half_y_m),
            },
            layers,
        }
    }

    /// Distance along the ray at which it first meets this obstacle, or
    /// `None` if it doesn't within `max_dist_m`.
    ///
    /// `direction` must be unit length. A ray starting inside the obstacle
    /// hits at distance zero.
    pub fn ray_intersect(
        &self,
        origin_m: Vector2<f64>,
        direction: Vector2<f64>,
        max_dist_m: f64,
    ) -> Option<f64> {
        match self.shape {
            Shape::Circle { centre_m, radius_m } => {
                ray_circle(origin_m, direction, centre_m, radius_m, max_dist_m)
            }
            Shape::Rect {
                centre_m,
                half_extents_m,
            } => ray_rect(origin_m, direction, centre_m, half_extents_m, max_dist_m),
        }
    }
}

// -----------------------------------------------------------------------------------------------
// FUNCTIONS
// -----------------------------------------------------------------------------------------------

fn ray_circle(
    origin: Vector2<f64>,
    dir: Vector2<f64>,
    centre: Vector2<f64>,
    radius: f64,
    max_dist: f64,
) -> Option<f64> {
    let to_centre = centre - origin;
    let along = to_centre.dot(&dir);

    // Squared distance from the centre to the closest point on the ray's
    // line
    let closest_sq = to_centre.norm_squared() - along * along;
    let radius_sq = radius * radius;
    if closest_sq > radius_sq {
        return None;
    }

    let half_chord = (radius_sq - closest_sq).sqrt();
    let near = along - half_chord;

    if near >= 0.0 {
        if near <= max_dist {
            Some(near)
        } else {
            None
        }
    } else if along + half_chord >= 0.0 {
        // Origin is inside the circle
        Some(0.0)
    } else {
        None
    }
}

fn ray_rect(
    origin: Vector2<f64>,
    dir: Vector2<f64>,
    centre: Vector2<f64>,
    half_extents: Vector2<f64>,
    max_dist: f64,
) -> Option<f64> {
    let low = centre - half_extents;
    let high = centre + half_extents;

    // Slab intersection on each axis
    let mut t_near = std::f64::NEG_INFINITY;
    let mut t_far = std::f64::INFINITY;

    for axis in 0..2 {
        if dir[axis].abs() < std::f64::EPSILON {
            // Ray parallel to this slab, it either always overlaps or never
            if origin[axis] < low[axis] || origin[axis] > high[axis] {
                return None;
            }
        } else {
            let inv = 1.0 / dir[axis];
            let mut t0 = (low[axis] - origin[axis]) * inv;
            let mut t1 = (high[axis] - origin[axis]) * inv;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }

            t_near = t_near.max(t0);
            t_far = t_far.min(t1);
            if t_near > t_far {
                return None;
            }
        }
    }

    if t_far < 0.0 {
        return None;
    }

    // Origin inside the rectangle hits at zero
    let t = t_near.max(0.0);
    if t <= max_dist {
        Some(t)
    } else {
        None
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_ray_circle() {
        let pillar = Obstacle::circle(5.0, 0.0, 1.0, LayerMask::OBSTACLE);

        // Head on hit at the near surface
        let hit = pillar.ray_intersect(Vector2::zeros(), Vector2::x(), 20.0);
        assert_relative_eq!(hit.unwrap(), 4.0, epsilon = 1e-9);

        // Grazing miss
        assert!(pillar
            .ray_intersect(Vector2::new(0.0, 1.5), Vector2::x(), 20.0)
            .is_none());

        // Pointing away
        assert!(pillar
            .ray_intersect(Vector2::zeros(), -Vector2::x(), 20.0)
            .is_none());

        // Origin inside hits immediately
        let hit = pillar.ray_intersect(Vector2::new(5.0, 0.0), Vector2::x(), 20.0);
        assert_relative_eq!(hit.unwrap(), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_ray_rect() {
        let wall = Obstacle::rect(5.0, 0.0, 0.5, 5.0, LayerMask::OBSTACLE);

        let hit = wall.ray_intersect(Vector2::zeros(), Vector2::x(), 20.0);
        assert_relative_eq!(hit.unwrap(), 4.5, epsilon = 1e-9);

        // Parallel ray offset past the wall's extent misses
        assert!(wall
            .ray_intersect(Vector2::new(0.0, 6.0), Vector2::x(), 20.0)
            .is_none());

        // Diagonal hit
        let dir = Vector2::new(1.0, 1.0).normalize();
        let hit = wall.ray_intersect(Vector2::new(0.0, -4.0), dir, 20.0);
        assert_relative_eq!(hit.unwrap(), 4.5 * 2.0_f64.sqrt(), epsilon = 1e-9);
    }
}
