//! Aggregator subsystem
//!
//! Reduces a record sequence, or each group of one, to scalar or record
//! summaries: count, sum, average, min/max-by, reduce-to-extreme.
//!
//! # Invariants
//!
//! - Empty input yields `EmptyAggregate`, never NaN or a silent zero
//! - Extremes break ties by first occurrence
//! - `reduce_to_highest` and `max_by` agree on every non-empty input

mod aggregate;
mod grouped;

pub use aggregate::{
    average_by, count, max_by, min_by, reduce_to_highest, reduce_to_lowest, sum_by, summarize,
    Summary,
};
pub use grouped::{
    average_per_group, collect_per_group, count_per_group, max_per_group, min_per_group,
    set_per_group, sorted_names_per_group, summary_per_group, total_per_group,
};
