//! Deterministic simulation module
//!
//! All physics lives here. This module must be pure and deterministic:
//! - Caller-supplied timestep only
//! - State passed in and returned, no globals
//! - Stable edge iteration order
//! - No rendering or platform dependencies

pub mod collision;
pub mod polygon;
pub mod response;
pub mod state;
pub mod tick;

pub use collision::{Collision, all_contacts, deepest_contact, probe};
pub use polygon::{Edge, Polygon};
pub use response::{Response, resolve};
pub use state::{CircleBody, SimulationState, Snapshot, snapshot};
pub use tick::{StepOutcome, advance, step};
