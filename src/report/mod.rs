//! Reporting layer
//!
//! Presentation only: renders engine results as plain text to any
//! `io::Write` and logs report progress through an
//! [`observability::Logger`](crate::observability::Logger). Nothing here
//! computes; every value comes from the engine modules.

mod employee;
mod errors;
mod writer;

pub use employee::{EmployeeReport, ReportOptions};
pub use errors::{ReportError, ReportResult};
pub use writer::ReportWriter;
