//! Physics parameters and scenario presets
//!
//! `PhysicsConfig` is fixed for the lifetime of a simulation. A `Scenario`
//! bundles it with the initial conditions and can be loaded from JSON.

use std::path::Path;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_SIDES;
use crate::error::SimError;
use crate::sim::SimulationState;

/// Per-simulation physics constants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicsConfig {
    /// Acceleration along +y (pixels/s²)
    pub gravity: f32,
    /// Multiplicative velocity factor applied once per tick, in (0, 1]
    pub damping: f32,
    /// Fraction of normal relative speed kept after a bounce, in [0, 1]
    pub restitution: f32,
    /// Fraction of tangential relative speed lost at a contact, in [0, 1]
    pub wall_friction: f32,
    /// Polygon spin (radians/s)
    pub angular_velocity: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        ScenarioPreset::Classic.scenario().physics
    }
}

impl PhysicsConfig {
    /// Reject out-of-range parameters; nothing is clamped
    pub fn validate(&self) -> Result<(), SimError> {
        if !self.gravity.is_finite() {
            return Err(SimError::invalid(format!("gravity must be finite, got {}", self.gravity)));
        }
        if !(self.damping > 0.0 && self.damping <= 1.0) {
            return Err(SimError::invalid(format!(
                "damping must be in (0, 1], got {}",
                self.damping
            )));
        }
        if !(0.0..=1.0).contains(&self.restitution) {
            return Err(SimError::invalid(format!(
                "restitution must be in [0, 1], got {}",
                self.restitution
            )));
        }
        if !(0.0..=1.0).contains(&self.wall_friction) {
            return Err(SimError::invalid(format!(
                "wall friction must be in [0, 1], got {}",
                self.wall_friction
            )));
        }
        if !self.angular_velocity.is_finite() {
            return Err(SimError::invalid(format!(
                "angular velocity must be finite, got {}",
                self.angular_velocity
            )));
        }
        Ok(())
    }
}

/// Built-in scenarios
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ScenarioPreset {
    /// Fast spin, mild gravity, lossy walls with friction
    #[default]
    Classic,
    /// Heavy gravity, slower spin, springy walls
    Bouncy,
    /// Zero-loss walls, no gravity or damping
    Elastic,
}

impl ScenarioPreset {
    pub const ALL: [ScenarioPreset; 3] = [
        ScenarioPreset::Classic,
        ScenarioPreset::Bouncy,
        ScenarioPreset::Elastic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ScenarioPreset::Classic => "classic",
            ScenarioPreset::Bouncy => "bouncy",
            ScenarioPreset::Elastic => "elastic",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" | "default" => Some(ScenarioPreset::Classic),
            "bouncy" => Some(ScenarioPreset::Bouncy),
            "elastic" | "lossless" => Some(ScenarioPreset::Elastic),
            _ => None,
        }
    }

    /// Parameters and initial conditions for this preset
    pub fn scenario(&self) -> Scenario {
        let center = Vec2::new(400.0, 300.0);
        match self {
            ScenarioPreset::Classic => Scenario {
                physics: PhysicsConfig {
                    gravity: 500.0,
                    damping: 0.999,
                    restitution: 0.9,
                    wall_friction: 0.1,
                    angular_velocity: 5.0,
                },
                sides: DEFAULT_SIDES,
                polygon_center: center,
                circumradius: 250.0,
                initial_rotation: 0.0,
                ball_radius: 15.0,
                ball_position: center,
                ball_velocity: Vec2::new(200.0, -100.0),
            },
            // Per-frame values of 0.5 px/frame² and 0.05 rad/frame at 60 fps
            ScenarioPreset::Bouncy => Scenario {
                physics: PhysicsConfig {
                    gravity: 1800.0,
                    damping: 0.995,
                    restitution: 0.8,
                    wall_friction: 0.05,
                    angular_velocity: 3.0,
                },
                sides: DEFAULT_SIDES,
                polygon_center: center,
                circumradius: 200.0,
                initial_rotation: 0.0,
                ball_radius: 10.0,
                ball_position: center - Vec2::new(0.0, 100.0),
                ball_velocity: Vec2::ZERO,
            },
            ScenarioPreset::Elastic => Scenario {
                physics: PhysicsConfig {
                    gravity: 0.0,
                    damping: 1.0,
                    restitution: 1.0,
                    wall_friction: 0.0,
                    angular_velocity: 1.2,
                },
                sides: DEFAULT_SIDES,
                polygon_center: center,
                circumradius: 150.0,
                initial_rotation: 0.0,
                ball_radius: 10.0,
                ball_position: center,
                ball_velocity: Vec2::new(300.0, 120.0),
            },
        }
    }
}

/// Physics plus initial conditions, the unit a driver starts from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub physics: PhysicsConfig,
    #[serde(default = "default_sides")]
    pub sides: usize,
    pub polygon_center: Vec2,
    pub circumradius: f32,
    #[serde(default)]
    pub initial_rotation: f32,
    pub ball_radius: f32,
    pub ball_position: Vec2,
    #[serde(default)]
    pub ball_velocity: Vec2,
}

fn default_sides() -> usize {
    DEFAULT_SIDES
}

impl Default for Scenario {
    fn default() -> Self {
        ScenarioPreset::default().scenario()
    }
}

impl Scenario {
    /// Parse a scenario from JSON text
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        let scenario: Scenario = serde_json::from_str(json)?;
        scenario.physics.validate()?;
        Ok(scenario)
    }

    /// Load a scenario file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let scenario = Self::from_json(&json)?;
        log::info!("Loaded scenario from {}", path.display());
        Ok(scenario)
    }

    pub fn to_json(&self) -> Result<String, SimError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Replace the launch velocity with a seeded random one
    ///
    /// The velocity is uniform over the disc of radius `max_speed`, so the
    /// same seed always gives the same launch.
    pub fn with_random_launch(mut self, seed: u64, max_speed: f32) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let angle = rng.random_range(0.0..std::f32::consts::TAU);
        let speed = max_speed * rng.random::<f32>().sqrt();
        self.ball_velocity = crate::polar_to_cartesian(speed, angle);
        self
    }

    /// Validate and build the initial state
    pub fn into_state(self) -> Result<SimulationState, SimError> {
        SimulationState::create_with_sides(
            self.physics,
            self.sides,
            self.ball_position,
            self.ball_velocity,
            self.ball_radius,
            self.polygon_center,
            self.circumradius,
            self.initial_rotation,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_build() {
        for preset in ScenarioPreset::ALL {
            let state = preset.scenario().into_state();
            assert!(state.is_ok(), "{} failed: {:?}", preset.as_str(), state.err());
        }
    }

    #[test]
    fn test_preset_names_round_trip() {
        for preset in ScenarioPreset::ALL {
            assert_eq!(ScenarioPreset::from_str(preset.as_str()), Some(preset));
        }
        assert_eq!(ScenarioPreset::from_str("LOSSLESS"), Some(ScenarioPreset::Elastic));
        assert_eq!(ScenarioPreset::from_str("spiral"), None);
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let base = PhysicsConfig::default();
        assert!(base.validate().is_ok());

        let cases = [
            PhysicsConfig { restitution: -0.1, ..base },
            PhysicsConfig { restitution: 1.01, ..base },
            PhysicsConfig { damping: 0.0, ..base },
            PhysicsConfig { damping: 1.5, ..base },
            PhysicsConfig { wall_friction: -0.5, ..base },
            PhysicsConfig { wall_friction: 2.0, ..base },
            PhysicsConfig { gravity: f32::INFINITY, ..base },
            PhysicsConfig { angular_velocity: f32::NAN, ..base },
            PhysicsConfig { restitution: f32::NAN, ..base },
        ];
        for cfg in cases {
            assert!(
                matches!(cfg.validate(), Err(SimError::InvalidConfig(_))),
                "accepted {cfg:?}"
            );
        }
    }

    #[test]
    fn test_validate_accepts_bounds() {
        let base = PhysicsConfig::default();
        assert!(PhysicsConfig { restitution: 0.0, ..base }.validate().is_ok());
        assert!(PhysicsConfig { restitution: 1.0, ..base }.validate().is_ok());
        assert!(PhysicsConfig { damping: 1.0, ..base }.validate().is_ok());
        assert!(PhysicsConfig { gravity: -300.0, ..base }.validate().is_ok());
    }

    #[test]
    fn test_json_round_trip() {
        let scenario = ScenarioPreset::Bouncy.scenario();
        let json = scenario.to_json().unwrap();
        let back = Scenario::from_json(&json).unwrap();
        assert_eq!(back, scenario);
    }

    #[test]
    fn test_json_defaults() {
        let json = r#"{
            "physics": {
                "gravity": 100.0,
                "damping": 1.0,
                "restitution": 0.5,
                "wall_friction": 0.0,
                "angular_velocity": 0.0
            },
            "polygon_center": [0.0, 0.0],
            "circumradius": 100.0,
            "ball_radius": 5.0,
            "ball_position": [0.0, 0.0]
        }"#;
        let scenario = Scenario::from_json(json).unwrap();
        assert_eq!(scenario.sides, 6);
        assert_eq!(scenario.ball_velocity, Vec2::ZERO);
        assert_eq!(scenario.initial_rotation, 0.0);
    }

    #[test]
    fn test_json_rejects_bad_physics() {
        let json = ScenarioPreset::Classic
            .scenario()
            .to_json()
            .unwrap()
            .replace("\"damping\": 0.999", "\"damping\": 0.0");
        assert!(matches!(Scenario::from_json(&json), Err(SimError::InvalidConfig(_))));
        assert!(matches!(Scenario::from_json("{"), Err(SimError::Parse(_))));
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("hex-bounce-{}.json", std::process::id()));
        std::fs::write(&path, ScenarioPreset::Elastic.scenario().to_json().unwrap()).unwrap();
        let loaded = Scenario::load(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded, ScenarioPreset::Elastic.scenario());

        assert!(matches!(
            Scenario::load("/definitely/not/here.json"),
            Err(SimError::Io(_))
        ));
    }

    #[test]
    fn test_random_launch_is_seeded() {
        let a = Scenario::default().with_random_launch(42, 300.0);
        let b = Scenario::default().with_random_launch(42, 300.0);
        let c = Scenario::default().with_random_launch(43, 300.0);
        assert_eq!(a.ball_velocity, b.ball_velocity);
        assert_ne!(a.ball_velocity, c.ball_velocity);
        assert!(a.ball_velocity.length() <= 300.0 + 1e-3);
    }
}
