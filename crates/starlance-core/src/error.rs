//! Error types for the combat simulation.
//!
//! Simulation ticks never fail; errors only come from loading tuning and
//! persisting telemetry.

use thiserror::Error;

/// Result type alias using [`SimError`].
pub type Result<T> = std::result::Result<T, SimError>;

#[derive(Debug, Error)]
pub enum SimError {
    /// Tuning JSON could not be parsed.
    #[error("Failed to parse tuning: {0}")]
    TuningParse(#[from] serde_json::Error),

    /// A tuning value is outside the range the simulation can run with.
    #[error("Invalid tuning value '{field}': {reason}")]
    InvalidTuning {
        field: &'static str,
        reason: String,
    },

    /// The telemetry store rejected a save.
    #[error("Telemetry store failed: {0}")]
    TelemetryStore(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
