//! Fixed timestep driver
//!
//! Turns variable frame times into whole `SIM_DT` ticks, the way a render
//! loop would call the simulation.

use crate::consts::*;
use crate::sim::{SimulationState, Snapshot, step};

/// Accumulates frame time and runs fixed ticks
#[derive(Debug, Clone)]
pub struct FixedStepDriver {
    pub state: SimulationState,
    accumulator: f32,
    /// Total resolved contacts since creation
    contacts: u64,
    /// Set once the ball center has been seen outside the polygon
    escaped: bool,
}

impl FixedStepDriver {
    pub fn new(state: SimulationState) -> Self {
        Self {
            state,
            accumulator: 0.0,
            contacts: 0,
            escaped: false,
        }
    }

    /// Run as many ticks as `frame_dt` allows; returns the substep count
    pub fn update(&mut self, frame_dt: f32) -> u32 {
        let frame_dt = if frame_dt.is_finite() {
            frame_dt.clamp(0.0, MAX_FRAME_DT)
        } else {
            0.0
        };
        self.accumulator += frame_dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let (next, outcome) = step(self.state, SIM_DT);
            self.state = next;
            self.accumulator -= SIM_DT;
            substeps += 1;

            if outcome.is_contact() {
                self.contacts += 1;
            }
            if !self.escaped && !self.state.ball_contained() {
                self.escaped = true;
                log::warn!(
                    "Ball left the polygon at tick {} (pos {:?})",
                    self.state.time_ticks,
                    self.state.ball.pos
                );
            }
        }

        // Drop the backlog we refused to simulate
        if substeps == MAX_SUBSTEPS && self.accumulator >= SIM_DT {
            log::debug!("Dropping {:.4}s of simulation backlog", self.accumulator);
            self.accumulator = 0.0;
        }

        substeps
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    pub fn contacts(&self) -> u64 {
        self.contacts
    }

    pub fn escaped(&self) -> bool {
        self.escaped
    }

    /// Fraction of a tick waiting in the accumulator (for interpolation)
    pub fn alpha(&self) -> f32 {
        self.accumulator / SIM_DT
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScenarioPreset;

    fn driver() -> FixedStepDriver {
        FixedStepDriver::new(ScenarioPreset::Classic.scenario().into_state().unwrap())
    }

    #[test]
    fn test_update_runs_whole_ticks() {
        let mut d = driver();
        // 60 Hz frames at 120 Hz simulation: two ticks per frame
        let mut total = 0;
        for _ in 0..10 {
            total += d.update(1.0 / 60.0 + 1e-6);
        }
        assert_eq!(total, 20);
        assert_eq!(d.state.time_ticks, 20);
        assert!(d.alpha() >= 0.0 && d.alpha() < 1.0);
    }

    #[test]
    fn test_update_carries_remainder() {
        let mut d = driver();
        assert_eq!(d.update(SIM_DT * 0.6), 0);
        assert_eq!(d.update(SIM_DT * 0.6), 1);
        assert_eq!(d.state.time_ticks, 1);
    }

    #[test]
    fn test_substep_cap() {
        let mut d = driver();
        // A one-second hitch is clamped and capped
        assert_eq!(d.update(1.0), MAX_SUBSTEPS);
        assert_eq!(d.state.time_ticks, MAX_SUBSTEPS as u64);
        assert!(d.alpha() < 1.0);
    }

    #[test]
    fn test_bad_frame_time_ignored() {
        let mut d = driver();
        assert_eq!(d.update(-1.0), 0);
        assert_eq!(d.update(f32::NAN), 0);
        assert_eq!(d.state.time_ticks, 0);
    }

    #[test]
    fn test_counts_contacts_and_stays_contained() {
        let mut d = driver();
        for _ in 0..(60 * 5) {
            d.update(1.0 / 60.0);
        }
        assert!(d.contacts() > 0);
        assert!(!d.escaped());
    }
}
