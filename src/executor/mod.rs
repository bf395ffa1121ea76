//! Query executor subsystem
//!
//! Runs a declarative [`QuerySpec`] over a record slice and returns borrowed
//! results with counters.
//!
//! # Execution Flow (strict order)
//!
//! 1. Validate the spec (before any record is read)
//! 2. Filter strictly according to predicates
//! 3. Apply sort (if specified)
//! 4. Apply limit or page
//! 5. Return ordered results
//!
//! An aggregate query runs steps 1 to 3, then folds salary over the matches
//! (or over each group of them) instead of cutting a window.
//!
//! # Invariants
//!
//! - Deterministic execution: same spec + same records = same result
//! - No type coercion in predicates
//! - Input slice is never reordered

mod errors;
mod executor;
mod filters;
mod query;
mod result;

pub use errors::{ExecutorError, ExecutorErrorCode, ExecutorResult, Severity};
pub use executor::QueryExecutor;
pub use filters::PredicateFilter;
pub use query::{Aggregate, AggregateOp, FilterOp, Predicate, QuerySpec};
pub use result::{AggregateResult, AggregateValue, Aggregated, ExecutionResult};
