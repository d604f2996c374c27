//! Hex Bounce - a ball bouncing inside a spinning regular polygon
//!
//! Core modules:
//! - `sim`: Deterministic simulation (polygon, collision probe, response, stepper)
//! - `config`: Physics parameters, scenario presets and scenario files
//! - `driver`: Fixed timestep driver for render/record loops
//! - `error`: Error type shared by construction and loading

pub mod config;
pub mod driver;
pub mod error;
pub mod sim;

pub use config::{PhysicsConfig, Scenario, ScenarioPreset};
pub use driver::FixedStepDriver;
pub use error::SimError;

use glam::Vec2;

/// Simulation constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame the driver will try to catch up on (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Number of sides of the default container
    pub const DEFAULT_SIDES: usize = 6;
    /// Default ball mass (unused by the single-body response)
    pub const DEFAULT_BALL_MASS: f32 = 1.0;
}

/// Wrap an angle into [0, 2π)
#[inline]
pub fn wrap_angle(angle: f32) -> f32 {
    use std::f32::consts::TAU;
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Normalize a vector, failing on zero length instead of returning zero
pub fn try_normalize(v: Vec2) -> Result<Vec2, SimError> {
    let len = v.length();
    if len > 0.0 && len.is_finite() {
        Ok(v / len)
    } else {
        Err(SimError::DegenerateGeometry)
    }
}
