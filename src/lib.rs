//! rowfold - A deterministic, in-memory tabular aggregation engine
//!
//! Sorting, filtering, grouping and aggregation over flat employee records.
//! Every operator borrows its input and returns new collections; nothing is
//! mutated and identical input always yields identical output.
//!
//! ```
//! use rowfold::aggregator::total_per_group;
//! use rowfold::record::Record;
//!
//! let staff = vec![
//!     Record::new("1", "John", "john@dxc.com", "IT", 5000),
//!     Record::new("2", "Alice", "alice@dxc.com", "HR", 6000),
//!     Record::new("3", "Bob", "bob@dxc.com", "IT", 7000),
//! ];
//! let dept = |r: &Record| r.department().to_string();
//! let totals = total_per_group(&staff, dept, |r| r.salary()).unwrap();
//! assert_eq!(totals["IT"], 12000);
//! assert_eq!(totals["HR"], 6000);
//! ```

mod errors;

pub mod aggregator;
pub mod executor;
pub mod keys;
pub mod observability;
pub mod operators;
pub mod record;
pub mod report;
pub mod serialize;

pub use errors::{EngineError, EngineResult};
