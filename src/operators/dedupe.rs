//! Deduplication
//!
//! Both variants keep the first occurrence and preserve input order.

use std::collections::HashSet;
use std::hash::Hash;

use crate::record::Record;

/// Drops records structurally equal to an earlier one
pub fn dedupe_by_value(records: &[Record]) -> Vec<&Record> {
    let mut seen: HashSet<&Record> = HashSet::with_capacity(records.len());
    records.iter().filter(|r| seen.insert(*r)).collect()
}

/// Keeps only the first record per identifier, whatever its other fields
pub fn dedupe_by_id(records: &[Record]) -> Vec<&Record> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(records.len());
    records.iter().filter(|r| seen.insert(r.id())).collect()
}

/// Records whose key was already produced by an earlier record
///
/// Case-insensitive checks are the caller's business: normalise inside `key`.
pub fn find_duplicates_by<K, F>(records: &[Record], key: F) -> Vec<&Record>
where
    K: Hash + Eq,
    F: Fn(&Record) -> K,
{
    let mut seen: HashSet<K> = HashSet::with_capacity(records.len());
    records.iter().filter(|r| !seen.insert(key(r))).collect()
}
