//! Collision response against a moving wall
//!
//! The ball's velocity is reflected in the wall's frame, not the world
//! frame: a spinning polygon's wall has its own velocity (ω × r) at the
//! contact point, and that velocity is carried back into the result.

use glam::Vec2;

use super::collision::Collision;
use super::polygon::Polygon;
use super::state::CircleBody;
use crate::config::PhysicsConfig;

/// Outcome of resolving one contact
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Response {
    /// Post-collision ball velocity (world frame)
    pub velocity: Vec2,
    /// Offset that moves the ball out of the wall
    pub position_correction: Vec2,
    /// False when the ball was already separating and velocity was kept
    pub approaching: bool,
}

/// Resolve a single contact
///
/// The position correction is always `normal * depth`. The velocity only
/// changes when the ball moves into the wall relative to the wall itself.
pub fn resolve(
    collision: &Collision,
    circle: &CircleBody,
    polygon: &Polygon,
    config: &PhysicsConfig,
) -> Response {
    let normal = collision.normal;
    let position_correction = normal * collision.depth;

    let wall_vel = polygon.edge_velocity_at(collision.point);
    let rel = circle.vel - wall_vel;
    let approach = rel.dot(normal);

    if approach >= 0.0 {
        return Response {
            velocity: circle.vel,
            position_correction,
            approaching: false,
        };
    }

    let vn = normal * approach;
    let vt = rel - vn;
    let new_rel = -config.restitution * vn + (1.0 - config.wall_friction) * vt;

    Response {
        velocity: new_rel + wall_vel,
        position_correction,
        approaching: true,
    }
}
