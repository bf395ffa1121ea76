//! Predicate filtering, partitioning and lookup
//!
//! All functions borrow the input and keep its order.

use super::result::Partition;
use crate::errors::{EngineError, EngineResult};
use crate::record::Record;

/// Keeps records satisfying `predicate`
pub fn filter<'a, P>(records: &'a [Record], predicate: P) -> Vec<&'a Record>
where
    P: Fn(&Record) -> bool,
{
    records.iter().filter(|r| predicate(r)).collect()
}

/// Splits records into those satisfying `predicate` and the rest
pub fn partition<'a, P>(records: &'a [Record], predicate: P) -> Partition<'a>
where
    P: Fn(&Record) -> bool,
{
    let (matching, rest): (Vec<&Record>, Vec<&Record>) =
        records.iter().partition(|r| predicate(r));
    Partition { matching, rest }
}

/// Returns true if any record satisfies `predicate`
pub fn any_match<P>(records: &[Record], predicate: P) -> bool
where
    P: Fn(&Record) -> bool,
{
    records.iter().any(predicate)
}

/// Returns true if every record satisfies `predicate` (vacuously true when empty)
pub fn all_match<P>(records: &[Record], predicate: P) -> bool
where
    P: Fn(&Record) -> bool,
{
    records.iter().all(predicate)
}

/// Returns true if no record satisfies `predicate`
pub fn none_match<P>(records: &[Record], predicate: P) -> bool
where
    P: Fn(&Record) -> bool,
{
    !any_match(records, predicate)
}

/// Returns the first record with the given identifier
pub fn find_by_id<'a>(records: &'a [Record], id: &str) -> Option<&'a Record> {
    records.iter().find(|r| r.id() == id)
}

/// Like [`find_by_id`], but absence is an error
pub fn require_by_id<'a>(records: &'a [Record], id: &str) -> EngineResult<&'a Record> {
    find_by_id(records, id).ok_or_else(|| EngineError::NotFound { id: id.to_string() })
}
