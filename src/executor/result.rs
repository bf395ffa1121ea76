//! Result types for query execution

use indexmap::IndexMap;
use serde::Serialize;

use crate::keys::GroupKey;
use crate::operators::PageRequest;
use crate::record::Record;

/// Result of query execution
///
/// Records borrow from the slice the query ran over.
#[derive(Debug, Clone, Serialize)]
pub struct ExecutionResult<'a> {
    /// Records in result order
    pub records: Vec<&'a Record>,
    /// Number of records examined
    pub scanned_count: usize,
    /// Number of records that passed the filter
    pub matched_count: usize,
    /// Number of records returned
    pub returned_count: usize,
    /// Whether limit or page cut the matched set
    pub limit_applied: bool,
    /// Page served, when the query paged
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<PageRequest>,
}

impl<'a> ExecutionResult<'a> {
    /// Creates an empty result
    pub fn empty() -> Self {
        Self {
            records: Vec::new(),
            scanned_count: 0,
            matched_count: 0,
            returned_count: 0,
            limit_applied: false,
            page: None,
        }
    }

    /// Returns true if no records were returned
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Record> + '_ {
        self.records.iter().copied()
    }

    /// Total pages of the matched set at the requested size
    pub fn total_pages(&self) -> Option<u64> {
        let page = self.page?;
        if page.size == 0 {
            return Some(0);
        }
        Some((self.matched_count as u64).div_ceil(page.size))
    }

    /// Identifiers of the returned records, in order
    pub fn ids(&self) -> Vec<&'a str> {
        self.records.iter().copied().map(Record::id).collect()
    }
}

/// Value of one aggregate
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AggregateValue<'a> {
    Count(usize),
    Int(i64),
    Float(f64),
    /// Extreme record, first occurrence winning ties
    Record(&'a Record),
}

/// Whole-match or per-group aggregate output
#[derive(Debug, Clone, PartialEq)]
pub enum Aggregated<'a> {
    Total(AggregateValue<'a>),
    /// Groups in first-occurrence order of the sorted matches
    Grouped(IndexMap<GroupKey, AggregateValue<'a>>),
}

/// Result of an aggregate query
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateResult<'a> {
    pub value: Aggregated<'a>,
    pub scanned_count: usize,
    pub matched_count: usize,
}

impl<'a> AggregateResult<'a> {
    /// The whole-match value, if the step was not grouped
    pub fn total(&self) -> Option<&AggregateValue<'a>> {
        match &self.value {
            Aggregated::Total(value) => Some(value),
            Aggregated::Grouped(_) => None,
        }
    }

    /// Value for one group, if the step was grouped and the group exists
    pub fn group(&self, key: &GroupKey) -> Option<&AggregateValue<'a>> {
        match &self.value {
            Aggregated::Total(_) => None,
            Aggregated::Grouped(groups) => groups.get(key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_execution_result_empty() {
        let result = ExecutionResult::empty();
        assert!(result.is_empty());
        assert_eq!(result.len(), 0);
        assert_eq!(result.total_pages(), None);
    }

    #[test]
    fn test_total_pages() {
        let mut result = ExecutionResult::empty();
        result.matched_count = 10;
        result.page = Some(PageRequest::new(1, 3));
        assert_eq!(result.total_pages(), Some(4));

        result.page = Some(PageRequest::new(1, 0));
        assert_eq!(result.total_pages(), Some(0));
    }
}
