//! Executor error types
//!
//! Error codes:
//! - ROWFOLD_QUERY_INVALID (REJECT)
//! - ROWFOLD_EXECUTION_FAILED (ERROR)

use std::fmt;

use crate::errors::EngineError;

/// Severity levels for executor errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Query rejected before touching any record
    Reject,
    /// Query was valid but its aggregate step failed
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Reject => write!(f, "REJECT"),
            Severity::Error => write!(f, "ERROR"),
        }
    }
}

/// Executor-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutorErrorCode {
    /// Malformed or contradictory query specification
    QueryInvalid,
    /// The aggregate step had no value or overflowed
    ExecutionFailed,
}

impl ExecutorErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            ExecutorErrorCode::QueryInvalid => "ROWFOLD_QUERY_INVALID",
            ExecutorErrorCode::ExecutionFailed => "ROWFOLD_EXECUTION_FAILED",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        match self {
            ExecutorErrorCode::QueryInvalid => Severity::Reject,
            ExecutorErrorCode::ExecutionFailed => Severity::Error,
        }
    }
}

impl fmt::Display for ExecutorErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Executor error type with context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutorError {
    code: ExecutorErrorCode,
    message: String,
    source: Option<EngineError>,
}

impl ExecutorError {
    /// Create a query invalid error
    pub fn query_invalid(reason: impl Into<String>) -> Self {
        Self {
            code: ExecutorErrorCode::QueryInvalid,
            message: reason.into(),
            source: None,
        }
    }

    /// Returns the error code
    pub fn code(&self) -> ExecutorErrorCode {
        self.code
    }

    /// Returns the severity level
    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the engine error behind this one, if any
    pub fn engine_error(&self) -> Option<&EngineError> {
        self.source.as_ref()
    }
}

impl From<EngineError> for ExecutorError {
    fn from(err: EngineError) -> Self {
        let code = match err {
            EngineError::InvalidConfig(_) | EngineError::Serialization(_) => {
                ExecutorErrorCode::QueryInvalid
            }
            _ => ExecutorErrorCode::ExecutionFailed,
        };
        Self {
            code,
            message: err.to_string(),
            source: Some(err),
        }
    }
}

impl fmt::Display for ExecutorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            self.code.severity(),
            self.code.code(),
            self.message
        )
    }
}

impl std::error::Error for ExecutorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

/// Result type for executor operations
pub type ExecutorResult<T> = Result<T, ExecutorError>;
