//! Result types for operators that return more than a plain sequence

use serde::Serialize;

use crate::record::Record;

/// Two-way split of a sequence, input order kept in both halves
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition<'a> {
    /// Records satisfying the predicate
    pub matching: Vec<&'a Record>,
    /// Everything else
    pub rest: Vec<&'a Record>,
}

impl Partition<'_> {
    /// Total records across both halves
    pub fn len(&self) -> usize {
        self.matching.len() + self.rest.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A record left out of one operation because its key could not be derived
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Exclusion {
    /// Identifier of the excluded record
    pub id: String,
    /// Why the key could not be derived
    pub reason: String,
}

/// Output of an operation that may drop records with unusable keys
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection<'a> {
    /// Records that took part, in result order
    pub records: Vec<&'a Record>,
    /// Records that were dropped, in input order
    pub excluded: Vec<Exclusion>,
}

impl Selection<'_> {
    /// Returns true if every input record took part
    pub fn is_complete(&self) -> bool {
        self.excluded.is_empty()
    }

    /// Number of input records considered
    pub fn considered(&self) -> usize {
        self.records.len() + self.excluded.len()
    }
}

/// One page of a paginated sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    /// Items on this page
    pub items: Vec<T>,
    /// 1-based page number that was requested
    pub page: u64,
    /// Requested page size
    pub size: u64,
    /// Items in the whole sequence
    pub total_items: u64,
    /// Pages needed to cover the sequence at this size
    pub total_pages: u64,
}

impl<T> Page<T> {
    /// Returns true if no items fell on this page
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns true if a later page has items
    pub fn has_next(&self) -> bool {
        self.page >= 1 && self.page < self.total_pages
    }

    /// Returns an iterator over the items
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }
}
