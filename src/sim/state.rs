//! Simulation state and core body types
//!
//! Everything a tick reads or writes lives in `SimulationState`, which is a
//! plain `Copy` value owned by whoever drives the simulation.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::polygon::Polygon;
use crate::config::PhysicsConfig;
use crate::consts::*;
use crate::error::SimError;

/// The ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CircleBody {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Carried for multi-body extensions; the wall response ignores it
    #[serde(default = "default_mass")]
    pub mass: f32,
}

fn default_mass() -> f32 {
    DEFAULT_BALL_MASS
}

impl CircleBody {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32) -> Self {
        Self {
            pos,
            vel,
            radius,
            mass: DEFAULT_BALL_MASS,
        }
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    /// Kinetic energy per unit mass
    #[inline]
    pub fn specific_energy(&self) -> f32 {
        0.5 * self.vel.length_squared()
    }
}

/// Complete simulation state (deterministic, serializable)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationState {
    pub config: PhysicsConfig,
    pub polygon: Polygon,
    pub ball: CircleBody,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl SimulationState {
    /// Build a hexagon scenario
    pub fn create(
        config: PhysicsConfig,
        initial_position: Vec2,
        initial_velocity: Vec2,
        ball_radius: f32,
        polygon_center: Vec2,
        polygon_circumradius: f32,
        initial_rotation: f32,
    ) -> Result<Self, SimError> {
        Self::create_with_sides(
            config,
            DEFAULT_SIDES,
            initial_position,
            initial_velocity,
            ball_radius,
            polygon_center,
            polygon_circumradius,
            initial_rotation,
        )
    }

    /// Build a scenario with an arbitrary regular polygon
    #[allow(clippy::too_many_arguments)]
    pub fn create_with_sides(
        config: PhysicsConfig,
        sides: usize,
        initial_position: Vec2,
        initial_velocity: Vec2,
        ball_radius: f32,
        polygon_center: Vec2,
        polygon_circumradius: f32,
        initial_rotation: f32,
    ) -> Result<Self, SimError> {
        config.validate()?;

        if !(ball_radius > 0.0) || !ball_radius.is_finite() {
            return Err(SimError::invalid(format!(
                "ball radius must be positive and finite, got {ball_radius}"
            )));
        }
        if !initial_position.is_finite() || !initial_velocity.is_finite() {
            return Err(SimError::invalid("initial position and velocity must be finite"));
        }

        let polygon = Polygon::new(
            sides,
            polygon_center,
            polygon_circumradius,
            initial_rotation,
            config.angular_velocity,
        )?;

        // The ball has to fit between opposite walls or it can never settle
        if ball_radius >= polygon.apothem() {
            return Err(SimError::invalid(format!(
                "ball radius {ball_radius} does not fit inside polygon (apothem {})",
                polygon.apothem()
            )));
        }

        log::debug!(
            "Created {}-gon simulation: R={}, ball r={}, ω={}",
            sides,
            polygon_circumradius,
            ball_radius,
            config.angular_velocity
        );

        Ok(Self {
            config,
            polygon,
            ball: CircleBody::new(initial_position, initial_velocity, ball_radius),
            time_ticks: 0,
        })
    }

    /// Read-only projection for rendering or recording
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            time_ticks: self.time_ticks,
            ball_position: self.ball.pos,
            ball_velocity: self.ball.vel,
            rotation: self.polygon.rotation,
            polygon_vertices: self.polygon.vertices(),
        }
    }

    /// Whether the ball center is still inside the container
    pub fn ball_contained(&self) -> bool {
        self.polygon.contains_point(self.ball.pos)
    }
}

/// What a renderer or recorder sees of a state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub time_ticks: u64,
    pub ball_position: Vec2,
    pub ball_velocity: Vec2,
    pub rotation: f32,
    pub polygon_vertices: Vec<Vec2>,
}

/// Free-function form of [`SimulationState::snapshot`]
pub fn snapshot(state: &SimulationState) -> Snapshot {
    state.snapshot()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> PhysicsConfig {
        PhysicsConfig {
            gravity: 500.0,
            damping: 0.999,
            restitution: 0.9,
            wall_friction: 0.1,
            angular_velocity: 5.0,
        }
    }

    #[test]
    fn test_create_hexagon() {
        let state = SimulationState::create(
            config(),
            Vec2::new(400.0, 300.0),
            Vec2::new(200.0, -100.0),
            15.0,
            Vec2::new(400.0, 300.0),
            250.0,
            0.0,
        )
        .unwrap();
        assert_eq!(state.polygon.sides(), 6);
        assert_eq!(state.polygon.angular_velocity, 5.0);
        assert_eq!(state.ball.mass, 1.0);
        assert_eq!(state.time_ticks, 0);
        assert!(state.ball_contained());
    }

    #[test]
    fn test_create_rejects_bad_ball() {
        let make = |radius: f32| {
            SimulationState::create(config(), Vec2::ZERO, Vec2::ZERO, radius, Vec2::ZERO, 100.0, 0.0)
        };
        assert!(matches!(make(-1.0), Err(SimError::InvalidConfig(_))));
        assert!(matches!(make(0.0), Err(SimError::InvalidConfig(_))));
        // Wider than the hexagon's apothem (~86.6)
        assert!(matches!(make(90.0), Err(SimError::InvalidConfig(_))));
        assert!(make(10.0).is_ok());
    }

    #[test]
    fn test_create_rejects_bad_config() {
        let mut bad = config();
        bad.restitution = 1.5;
        let result =
            SimulationState::create(bad, Vec2::ZERO, Vec2::ZERO, 10.0, Vec2::ZERO, 100.0, 0.0);
        assert!(matches!(result, Err(SimError::InvalidConfig(_))));
    }

    #[test]
    fn test_snapshot_matches_state() {
        let state = SimulationState::create_with_sides(
            config(),
            5,
            Vec2::new(1.0, 2.0),
            Vec2::new(3.0, 4.0),
            5.0,
            Vec2::ZERO,
            100.0,
            0.5,
        )
        .unwrap();
        let snap = snapshot(&state);
        assert_eq!(snap.ball_position, Vec2::new(1.0, 2.0));
        assert_eq!(snap.ball_velocity, Vec2::new(3.0, 4.0));
        assert_eq!(snap.polygon_vertices.len(), 5);
        assert_eq!(snap.polygon_vertices, state.polygon.vertices());
        assert_eq!(snap.rotation, 0.5);
    }

    #[test]
    fn test_snapshot_serializes() {
        let state =
            SimulationState::create(config(), Vec2::ZERO, Vec2::ZERO, 10.0, Vec2::ZERO, 100.0, 0.0)
                .unwrap();
        let json = serde_json::to_string(&state.snapshot()).unwrap();
        assert!(json.contains("\"ball_position\""));
        let back: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.polygon_vertices.len(), 6);
    }
}
