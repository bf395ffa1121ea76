//! Query operators
//!
//! A fixed catalogue of pure operations over a borrowed record slice:
//!
//! - filter / partition / lookup
//! - sort (stable), top-N, bottom-N
//! - pagination
//! - group-by (single level, nested, re-sorted)
//! - deduplication
//! - identifier maps with explicit conflict policies
//!
//! # Invariants
//!
//! - Inputs are only borrowed; no operator reorders or alters them
//! - Sorting is stable
//! - Group members keep input order

mod dedupe;
mod filters;
mod grouping;
mod identity;
mod pagination;
mod result;
mod sorter;

pub use dedupe::{dedupe_by_id, dedupe_by_value, find_duplicates_by};
pub use filters::{all_match, any_match, filter, find_by_id, none_match, partition, require_by_id};
pub use grouping::{
    count_by, distinct_keys, group_by, group_by_nested, sort_groups_by_count_desc,
    sort_within_groups, Groups, NestedGroups,
};
pub use identity::{map_by_id, ConflictPolicy, Keep, MergeFn};
pub use pagination::{page_of, page_slice, paginate, PageRequest};
pub use result::{Exclusion, Page, Partition, Selection};
pub use sorter::{bottom_n, sort, sort_by, sort_by_numeric_id, sorted_text, top_n};

pub(crate) use grouping::group_refs;
pub(crate) use sorter::sort_refs;
