//! Errors raised while building or loading a simulation
//!
//! `advance` itself never fails; everything here is caught at construction.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    /// A zero-length vector was normalized
    #[error("degenerate geometry: cannot normalize a zero-length vector")]
    DegenerateGeometry,

    /// Construction parameters out of range
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Scenario file could not be read
    #[error("failed to read scenario file: {0}")]
    Io(#[from] std::io::Error),

    /// Scenario file is not valid JSON for a scenario
    #[error("failed to parse scenario file: {0}")]
    Parse(#[from] serde_json::Error),
}

impl SimError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        SimError::InvalidConfig(msg.into())
    }
}
