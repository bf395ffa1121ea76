//! Engine error taxonomy
//!
//! Error codes:
//! - ROWFOLD_NOT_FOUND
//! - ROWFOLD_EMPTY_AGGREGATE
//! - ROWFOLD_UNPARSEABLE_KEY
//! - ROWFOLD_CONFLICTING_KEY
//! - ROWFOLD_INVALID_CONFIG
//! - ROWFOLD_OVERFLOW
//! - ROWFOLD_SERIALIZATION
//!
//! Every error is recoverable at the call site. Nothing in the engine is
//! fatal to the process.

use thiserror::Error;

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

/// Engine errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("No record with identifier '{id}'")]
    NotFound { id: String },

    #[error("{operation} over zero records has no value")]
    EmptyAggregate { operation: &'static str },

    #[error("Identifier '{id}' is not numeric: {reason}")]
    UnparseableKey { id: String, reason: String },

    #[error("Identifier '{id}' appears more than once and no merge policy allows it")]
    ConflictingKey { id: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("{operation} overflowed a 64-bit integer")]
    Overflow { operation: &'static str },

    #[error("Serialization failed: {0}")]
    Serialization(String),
}

impl EngineError {
    /// Create an empty aggregate error
    pub fn empty(operation: &'static str) -> Self {
        EngineError::EmptyAggregate { operation }
    }

    /// Create an invalid configuration error
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        EngineError::InvalidConfig(reason.into())
    }

    /// Returns the stable string code for this error
    pub fn code(&self) -> &'static str {
        match self {
            EngineError::NotFound { .. } => "ROWFOLD_NOT_FOUND",
            EngineError::EmptyAggregate { .. } => "ROWFOLD_EMPTY_AGGREGATE",
            EngineError::UnparseableKey { .. } => "ROWFOLD_UNPARSEABLE_KEY",
            EngineError::ConflictingKey { .. } => "ROWFOLD_CONFLICTING_KEY",
            EngineError::InvalidConfig(_) => "ROWFOLD_INVALID_CONFIG",
            EngineError::Overflow { .. } => "ROWFOLD_OVERFLOW",
            EngineError::Serialization(_) => "ROWFOLD_SERIALIZATION",
        }
    }

    /// Errors are surfaced to the caller, never raised as a process failure
    pub fn is_recoverable(&self) -> bool {
        true
    }

    /// Returns true if this error means "no value" rather than bad input
    pub fn is_absence(&self) -> bool {
        matches!(
            self,
            EngineError::NotFound { .. } | EngineError::EmptyAggregate { .. }
        )
    }
}

impl From<serde_json::Error> for EngineError {
    fn from(err: serde_json::Error) -> Self {
        EngineError::Serialization(err.to_string())
    }
}
