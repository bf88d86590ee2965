//! Typed errors surfaced at the simulation boundary
//!
//! The engine rejects malformed input up front instead of letting NaN or
//! Infinity propagate into the ledger and downstream formatting.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimulationError {
    /// A parameter failed boundary validation before the simulation ran
    #[error("invalid input for {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    /// A query-string parameter could not be parsed into its typed field
    #[error("malformed query parameter `{key}`: {reason}")]
    MalformedQuery { key: String, reason: String },
}

impl SimulationError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        SimulationError::InvalidInput {
            field,
            reason: reason.into(),
        }
    }
}
