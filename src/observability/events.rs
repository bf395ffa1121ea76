//! Observable events
//!
//! Events are explicit and typed. Only the query and report layers emit
//! them; operators and aggregates stay silent.

use std::fmt;

use super::logger::Severity;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Query
    /// Query spec passed validation and ran
    QueryExecuted,
    /// Query spec failed validation
    QueryRejected,
    /// Valid query whose aggregate step failed
    QueryFailed,

    // Data quality
    /// Records left out of an ordering or lookup
    RecordsExcluded,
    /// Identifier collision under the reject policy
    ConflictRejected,

    // Report
    ReportStart,
    SectionRendered,
    ReportComplete,
}

impl Event {
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::QueryExecuted => "QUERY_COMPLETE",
            Event::QueryRejected => "QUERY_REJECTED",
            Event::QueryFailed => "QUERY_FAILED",
            Event::RecordsExcluded => "RECORDS_EXCLUDED",
            Event::ConflictRejected => "CONFLICT_REJECTED",
            Event::ReportStart => "REPORT_BEGIN",
            Event::SectionRendered => "REPORT_SECTION",
            Event::ReportComplete => "REPORT_COMPLETE",
        }
    }

    /// Severity the event is logged at by default
    pub fn severity(&self) -> Severity {
        match self {
            Event::QueryRejected | Event::RecordsExcluded | Event::ConflictRejected => {
                Severity::Warn
            }
            Event::QueryFailed => Severity::Error,
            Event::SectionRendered => Severity::Trace,
            Event::QueryExecuted | Event::ReportStart | Event::ReportComplete => Severity::Info,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
