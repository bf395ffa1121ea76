//! Observability subsystem
//!
//! Structured JSON line logging and typed events.
//!
//! # Principles
//!
//! 1. Observability is read-only
//! 2. No side effects on results
//! 3. No background threads
//! 4. Deterministic output
//!
//! # Usage
//!
//! ```
//! use rowfold::observability::{Event, Logger};
//!
//! let mut logger = Logger::new(Vec::new());
//! logger.event(Event::QueryExecuted, &[("returned", "3")]);
//! let out = String::from_utf8(logger.into_inner()).unwrap();
//! assert!(out.starts_with("{\"event\":\"QUERY_COMPLETE\""));
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};
