//! Report error types

use std::io;

use thiserror::Error;

use crate::errors::EngineError;

/// Result type for report rendering
pub type ReportResult<T> = Result<T, ReportError>;

/// Failures while rendering a report
#[derive(Debug, Error)]
pub enum ReportError {
    /// The output sink rejected a write
    #[error("Report output failed: {0}")]
    Io(#[from] io::Error),

    /// A computation behind a section failed
    #[error("Report section failed: {0}")]
    Engine(#[from] EngineError),
}

impl ReportError {
    /// Returns the stable string code for this error
    pub fn code(&self) -> &'static str {
        match self {
            ReportError::Io(_) => "ROWFOLD_REPORT_IO",
            ReportError::Engine(e) => e.code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_code_passes_through() {
        let err: ReportError = EngineError::empty("sum").into();
        assert_eq!(err.code(), "ROWFOLD_EMPTY_AGGREGATE");
    }

    #[test]
    fn test_io_code() {
        let err: ReportError = io::Error::new(io::ErrorKind::BrokenPipe, "closed").into();
        assert_eq!(err.code(), "ROWFOLD_REPORT_IO");
        assert!(err.to_string().contains("closed"));
    }
}
