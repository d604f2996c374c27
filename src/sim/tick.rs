//! Fixed timestep simulation tick
//!
//! Advances the ball and polygon by one step. Every tick is evaluated from
//! scratch: there is no resting-contact state carried between ticks.

use super::collision::deepest_contact;
use super::response::resolve;
use super::state::SimulationState;

/// What happened during one step
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepOutcome {
    /// No edge touched the ball
    Free,
    /// One contact (the deepest) was resolved
    Contact {
        edge_index: usize,
        depth: f32,
        /// False when the ball was already separating (position-only fix)
        bounced: bool,
    },
}

impl StepOutcome {
    #[inline]
    pub fn is_contact(&self) -> bool {
        matches!(self, StepOutcome::Contact { .. })
    }
}

/// Advance the state by `dt` seconds
pub fn advance(state: SimulationState, dt: f32) -> SimulationState {
    step(state, dt).0
}

/// Advance the state by `dt` seconds and report the contact, if any
///
/// A non-positive or non-finite `dt` returns the state unchanged.
pub fn step(mut state: SimulationState, dt: f32) -> (SimulationState, StepOutcome) {
    if !(dt > 0.0) || !dt.is_finite() {
        return (state, StepOutcome::Free);
    }

    let config = state.config;
    state.polygon.advance_rotation(dt);

    // Integrate: gravity along world +y, then one damping factor per tick
    let ball = &mut state.ball;
    ball.vel.y += config.gravity * dt;
    ball.vel *= config.damping;
    ball.pos += ball.vel * dt;

    state.time_ticks += 1;

    let Some(contact) = deepest_contact(&state.polygon, &state.ball) else {
        return (state, StepOutcome::Free);
    };

    let response = resolve(&contact, &state.ball, &state.polygon, &config);
    state.ball.pos += response.position_correction;
    state.ball.vel = response.velocity;

    log::debug!(
        "tick {}: edge {} depth {:.3} bounced={}",
        state.time_ticks,
        contact.edge_index,
        contact.depth,
        response.approaching
    );

    (
        state,
        StepOutcome::Contact {
            edge_index: contact.edge_index,
            depth: contact.depth,
            bounced: response.approaching,
        },
    )
}
