//! Query specification
//!
//! A `QuerySpec` is plain data: hosts build it in code or parse it from JSON,
//! then hand it to [`QueryExecutor`](super::QueryExecutor). Validation runs
//! before any record is touched.
//!
//! ```json
//! {
//!   "filter": [{"field": "department", "op": "eq", "value": "IT"}],
//!   "sort": [{"field": "salary", "direction": "desc"}],
//!   "limit": 3
//! }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::errors::{ExecutorError, ExecutorResult};
use crate::keys::{Field, SortKey, SortSpec};
use crate::operators::PageRequest;

/// Comparison operator of a predicate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterOp {
    Eq,
    Ne,
    Gt,
    Gte,
    Lt,
    Lte,
}

impl FilterOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterOp::Eq => "eq",
            FilterOp::Ne => "ne",
            FilterOp::Gt => "gt",
            FilterOp::Gte => "gte",
            FilterOp::Lt => "lt",
            FilterOp::Lte => "lte",
        }
    }
}

/// A single field comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Predicate {
    pub field: Field,
    pub op: FilterOp,
    pub value: Value,
}

impl Predicate {
    pub fn new(field: Field, op: FilterOp, value: impl Into<Value>) -> Self {
        Self {
            field,
            op,
            value: value.into(),
        }
    }

    pub fn eq(field: Field, value: impl Into<Value>) -> Self {
        Self::new(field, FilterOp::Eq, value)
    }

    pub fn ne(field: Field, value: impl Into<Value>) -> Self {
        Self::new(field, FilterOp::Ne, value)
    }

    pub fn gt(field: Field, value: impl Into<Value>) -> Self {
        Self::new(field, FilterOp::Gt, value)
    }

    pub fn gte(field: Field, value: impl Into<Value>) -> Self {
        Self::new(field, FilterOp::Gte, value)
    }

    pub fn lt(field: Field, value: impl Into<Value>) -> Self {
        Self::new(field, FilterOp::Lt, value)
    }

    pub fn lte(field: Field, value: impl Into<Value>) -> Self {
        Self::new(field, FilterOp::Lte, value)
    }

    /// Checks that the value has the field's type
    fn validate(&self) -> ExecutorResult<()> {
        let ok = match self.field {
            Field::Salary => self.value.is_i64(),
            Field::Id | Field::Name | Field::Email | Field::Department => self.value.is_string(),
        };
        if !ok {
            return Err(ExecutorError::query_invalid(format!(
                "predicate on '{}' cannot compare against {}",
                self.field.as_str(),
                self.value
            )));
        }
        Ok(())
    }
}

/// Aggregate function of an aggregate step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregateOp {
    Count,
    Sum,
    Average,
    Min,
    Max,
}

impl AggregateOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            AggregateOp::Count => "count",
            AggregateOp::Sum => "sum",
            AggregateOp::Average => "average",
            AggregateOp::Min => "min",
            AggregateOp::Max => "max",
        }
    }
}

/// Aggregates salary over the matched records, optionally per group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Aggregate {
    pub op: AggregateOp,
    #[serde(default)]
    pub group_by: Option<Field>,
}

impl Aggregate {
    pub fn total(op: AggregateOp) -> Self {
        Self { op, group_by: None }
    }

    pub fn per_group(op: AggregateOp, field: Field) -> Self {
        Self {
            op,
            group_by: Some(field),
        }
    }
}

/// Filter, order and window over a record slice
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QuerySpec {
    /// Conjunction of predicates; empty matches everything
    #[serde(default)]
    pub filter: Vec<Predicate>,
    /// Sort keys in priority order
    #[serde(default)]
    pub sort: Vec<SortKey>,
    #[serde(default)]
    pub limit: Option<u64>,
    #[serde(default)]
    pub page: Option<PageRequest>,
    /// Aggregate step run by `QueryExecutor::aggregate`
    #[serde(default)]
    pub aggregate: Option<Aggregate>,
}

impl QuerySpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses and validates a JSON query
    pub fn from_json(text: &str) -> ExecutorResult<Self> {
        let spec: QuerySpec = serde_json::from_str(text)
            .map_err(|e| ExecutorError::query_invalid(format!("malformed query: {}", e)))?;
        spec.validate()?;
        Ok(spec)
    }

    pub fn with_filter(mut self, predicate: Predicate) -> Self {
        self.filter.push(predicate);
        self
    }

    pub fn with_sort(mut self, key: SortKey) -> Self {
        self.sort.push(key);
        self
    }

    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_page(mut self, page: PageRequest) -> Self {
        self.page = Some(page);
        self
    }

    pub fn with_aggregate(mut self, aggregate: Aggregate) -> Self {
        self.aggregate = Some(aggregate);
        self
    }

    /// Sort keys as a comparator chain
    pub fn sort_spec(&self) -> SortSpec {
        SortSpec::from_keys(self.sort.clone())
    }

    /// Validate the query
    pub fn validate(&self) -> ExecutorResult<()> {
        if self.limit == Some(0) {
            return Err(ExecutorError::query_invalid("limit must be > 0"));
        }
        if self.limit.is_some() && self.page.is_some() {
            return Err(ExecutorError::query_invalid(
                "limit and page cannot be combined",
            ));
        }
        if self.aggregate.is_some() && (self.limit.is_some() || self.page.is_some()) {
            return Err(ExecutorError::query_invalid(
                "aggregate runs over every match and cannot take limit or page",
            ));
        }
        for predicate in &self.filter {
            predicate.validate()?;
        }
        Ok(())
    }
}
