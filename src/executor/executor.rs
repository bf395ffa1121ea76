//! Query executor
//!
//! Execution flow (strict order):
//! 1. Scan records in input order
//! 2. Filter strictly according to predicates
//! 3. Apply sort (stable; if specified)
//! 4. Apply limit, or cut the requested page
//! 5. Return ordered results with counters
//!
//! `aggregate` replaces steps 4 and 5 with the query's aggregate step.

use indexmap::IndexMap;
use std::io::Write;

use super::errors::{ExecutorError, ExecutorResult};
use super::filters::PredicateFilter;
use super::query::{AggregateOp, QuerySpec};
use super::result::{AggregateResult, AggregateValue, Aggregated, ExecutionResult};
use crate::aggregator::{average_by, max_by, min_by, sum_by};
use crate::errors::EngineResult;
use crate::keys::SortSpec;
use crate::observability::{Event, Logger};
use crate::operators::{group_refs, page_slice, sort_refs};
use crate::record::Record;

/// Runs a validated [`QuerySpec`] over record slices
#[derive(Debug, Clone)]
pub struct QueryExecutor {
    spec: QuerySpec,
    sort: SortSpec,
}

impl QueryExecutor {
    /// Validates the spec and prepares an executor for it
    pub fn new(spec: QuerySpec) -> ExecutorResult<Self> {
        spec.validate()?;
        let sort = spec.sort_spec();
        Ok(Self { spec, sort })
    }

    /// Parses, validates and prepares a JSON query
    pub fn from_json(text: &str) -> ExecutorResult<Self> {
        Self::new(QuerySpec::from_json(text)?)
    }

    pub fn spec(&self) -> &QuerySpec {
        &self.spec
    }

    /// Filtered matches in sort order
    fn matches<'a>(&self, records: &'a [Record]) -> Vec<&'a Record> {
        let mut candidates: Vec<&'a Record> = records
            .iter()
            .filter(|r| PredicateFilter::matches(r, &self.spec.filter))
            .collect();
        sort_refs(&mut candidates, &self.sort);
        candidates
    }

    /// Executes the query. Same spec + same records = same result.
    pub fn execute<'a>(&self, records: &'a [Record]) -> ExecutionResult<'a> {
        let mut candidates = self.matches(records);
        let matched_count = candidates.len();

        if let Some(page) = self.spec.page {
            candidates = page_slice(&candidates, &page).to_vec();
        } else if let Some(limit) = self.spec.limit {
            let limit = usize::try_from(limit).unwrap_or(usize::MAX);
            candidates.truncate(limit);
        }

        ExecutionResult {
            returned_count: candidates.len(),
            scanned_count: records.len(),
            matched_count,
            limit_applied: candidates.len() < matched_count,
            page: self.spec.page,
            records: candidates,
        }
    }

    /// Executes the query and logs its counters
    pub fn execute_logged<'a, W: Write>(
        &self,
        records: &'a [Record],
        logger: &mut Logger<W>,
    ) -> ExecutionResult<'a> {
        let result = self.execute(records);
        let scanned = result.scanned_count.to_string();
        let matched = result.matched_count.to_string();
        let returned = result.returned_count.to_string();
        let limit_applied = result.limit_applied.to_string();
        logger.event(
            Event::QueryExecuted,
            &[
                ("scanned", scanned.as_str()),
                ("matched", matched.as_str()),
                ("returned", returned.as_str()),
                ("limit_applied", limit_applied.as_str()),
            ],
        );
        result
    }

    /// Runs the aggregate step over the sorted matches.
    ///
    /// Fails with `ROWFOLD_QUERY_INVALID` when the query has no aggregate
    /// step, and with `ROWFOLD_EXECUTION_FAILED` when an ungrouped aggregate
    /// other than count sees no matches or a sum overflows. A grouped step
    /// over no matches yields no groups.
    pub fn aggregate<'a>(&self, records: &'a [Record]) -> ExecutorResult<AggregateResult<'a>> {
        let step = self
            .spec
            .aggregate
            .ok_or_else(|| ExecutorError::query_invalid("query has no aggregate step"))?;
        let matches = self.matches(records);

        let value = match step.group_by {
            None => Aggregated::Total(fold(step.op, &matches)?),
            Some(field) => Aggregated::Grouped(
                group_refs(matches.iter().copied(), &field)
                    .into_iter()
                    .map(|(key, members)| fold(step.op, &members).map(|v| (key, v)))
                    .collect::<EngineResult<IndexMap<_, _>>>()?,
            ),
        };

        Ok(AggregateResult {
            value,
            scanned_count: records.len(),
            matched_count: matches.len(),
        })
    }

    /// Runs the aggregate step and logs its outcome
    ///
    /// Failures are logged as `QUERY_FAILED` before the error is returned.
    pub fn aggregate_logged<'a, W: Write>(
        &self,
        records: &'a [Record],
        logger: &mut Logger<W>,
    ) -> ExecutorResult<AggregateResult<'a>> {
        match self.aggregate(records) {
            Ok(result) => {
                let scanned = result.scanned_count.to_string();
                let matched = result.matched_count.to_string();
                let op = self.spec.aggregate.map_or("none", |a| a.op.as_str());
                logger.event(
                    Event::QueryExecuted,
                    &[
                        ("scanned", scanned.as_str()),
                        ("matched", matched.as_str()),
                        ("aggregate", op),
                    ],
                );
                Ok(result)
            }
            Err(err) => {
                logger.event(
                    Event::QueryFailed,
                    &[("code", err.code().code()), ("reason", err.message())],
                );
                Err(err)
            }
        }
    }

    /// Validates, executes and logs in one step
    ///
    /// A rejected spec is logged as `QUERY_REJECTED` before the error is
    /// returned.
    pub fn run<'a, W: Write>(
        spec: QuerySpec,
        records: &'a [Record],
        logger: &mut Logger<W>,
    ) -> ExecutorResult<ExecutionResult<'a>> {
        match Self::new(spec) {
            Ok(executor) => Ok(executor.execute_logged(records, logger)),
            Err(err) => {
                logger.event(
                    Event::QueryRejected,
                    &[("code", err.code().code()), ("reason", err.message())],
                );
                Err(err)
            }
        }
    }
}

/// Folds salary over one member list
fn fold<'a>(op: AggregateOp, members: &[&'a Record]) -> EngineResult<AggregateValue<'a>> {
    let members = members.iter().copied();
    match op {
        AggregateOp::Count => Ok(AggregateValue::Count(members.len())),
        AggregateOp::Sum => sum_by(members, Record::salary).map(AggregateValue::Int),
        AggregateOp::Average => average_by(members, Record::salary).map(AggregateValue::Float),
        AggregateOp::Min => min_by(members, Record::salary).map(AggregateValue::Record),
        AggregateOp::Max => max_by(members, Record::salary).map(AggregateValue::Record),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::EngineError;
    use crate::executor::{Aggregate, ExecutorErrorCode, Predicate};
    use crate::keys::{Field, GroupKey, SortKey};
    use crate::operators::PageRequest;

    fn make_records() -> Vec<Record> {
        vec![
            Record::new("1", "John", "john@dxc.com", "IT", 5000),
            Record::new("2", "Alice", "alice@dxc.com", "HR", 6000),
            Record::new("3", "Bob", "bob@dxc.com", "IT", 7000),
            Record::new("4", "Eve", "eve@dxc.com", "FIN", 6500),
            Record::new("5", "Zed", "zed@dxc.com", "IT", 7000),
        ]
    }

    #[test]
    fn test_empty_spec_returns_input_order() {
        let records = make_records();
        let executor = QueryExecutor::new(QuerySpec::new()).unwrap();
        let result = executor.execute(&records);

        assert_eq!(result.ids(), vec!["1", "2", "3", "4", "5"]);
        assert_eq!(result.scanned_count, 5);
        assert_eq!(result.matched_count, 5);
        assert!(!result.limit_applied);
    }

    #[test]
    fn test_filter_then_sort() {
        let records = make_records();
        let spec = QuerySpec::new()
            .with_filter(Predicate::eq(Field::Department, "IT"))
            .with_sort(SortKey::desc(Field::Salary))
            .with_sort(SortKey::asc(Field::Name));
        let result = QueryExecutor::new(spec).unwrap().execute(&records);

        assert_eq!(result.ids(), vec!["3", "5", "1"]);
        assert_eq!(result.matched_count, 3);
    }

    #[test]
    fn test_sort_is_stable() {
        let records = make_records();
        let spec = QuerySpec::new().with_sort(SortKey::desc(Field::Salary));
        let result = QueryExecutor::new(spec).unwrap().execute(&records);

        // Bob and Zed tie at 7000 and keep input order
        assert_eq!(result.ids(), vec!["3", "5", "4", "2", "1"]);
    }

    #[test]
    fn test_limit_enforced() {
        let records = make_records();
        let spec = QuerySpec::new()
            .with_sort(SortKey::desc(Field::Salary))
            .with_limit(2);
        let result = QueryExecutor::new(spec).unwrap().execute(&records);

        assert_eq!(result.ids(), vec!["3", "5"]);
        assert!(result.limit_applied);
        assert_eq!(result.returned_count, 2);
    }

    #[test]
    fn test_limit_larger_than_matches() {
        let records = make_records();
        let spec = QuerySpec::new().with_limit(50);
        let result = QueryExecutor::new(spec).unwrap().execute(&records);

        assert_eq!(result.len(), 5);
        assert!(!result.limit_applied);
    }

    #[test]
    fn test_page_cut() {
        let records = make_records();
        let spec = QuerySpec::new().with_page(PageRequest::new(2, 2));
        let result = QueryExecutor::new(spec).unwrap().execute(&records);

        assert_eq!(result.ids(), vec!["3", "4"]);
        assert_eq!(result.total_pages(), Some(3));
        assert!(result.limit_applied);
    }

    #[test]
    fn test_page_out_of_range_is_empty() {
        let records = make_records();
        let spec = QuerySpec::new().with_page(PageRequest::new(9, 2));
        let result = QueryExecutor::new(spec).unwrap().execute(&records);

        assert!(result.is_empty());
        assert_eq!(result.matched_count, 5);
    }

    #[test]
    fn test_input_untouched() {
        let records = make_records();
        let before = records.clone();
        let spec = QuerySpec::new().with_sort(SortKey::asc(Field::Name));
        let _ = QueryExecutor::new(spec).unwrap().execute(&records);
        assert_eq!(records, before);
    }

    #[test]
    fn test_replay_stability() {
        let records = make_records();
        let executor = QueryExecutor::from_json(
            r#"{"sort": [{"field": "department"}, {"field": "salary", "direction": "desc"}]}"#,
        )
        .unwrap();

        let first = executor.execute(&records).ids();
        for _ in 0..10 {
            assert_eq!(executor.execute(&records).ids(), first);
        }
    }

    #[test]
    fn test_run_logs_counters() {
        let records = make_records();
        let mut logger = Logger::new(Vec::new());
        let spec = QuerySpec::new().with_limit(1);
        let result = QueryExecutor::run(spec, &records, &mut logger).unwrap();
        assert_eq!(result.len(), 1);

        let out = String::from_utf8(logger.into_inner()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["event"], "QUERY_COMPLETE");
        assert_eq!(parsed["matched"], "5");
        assert_eq!(parsed["returned"], "1");
        assert_eq!(parsed["limit_applied"], "true");
    }

    #[test]
    fn test_run_logs_rejection() {
        let records = make_records();
        let mut logger = Logger::new(Vec::new());
        let spec = QuerySpec::new().with_limit(0);
        let err = QueryExecutor::run(spec, &records, &mut logger).unwrap_err();
        assert_eq!(err.code(), ExecutorErrorCode::QueryInvalid);

        let out = String::from_utf8(logger.into_inner()).unwrap();
        assert!(out.contains("QUERY_REJECTED"));
        assert!(out.contains("ROWFOLD_QUERY_INVALID"));
    }

    #[test]
    fn test_aggregate_total() {
        let records = make_records();
        let spec = QuerySpec::new()
            .with_filter(Predicate::eq(Field::Department, "IT"))
            .with_aggregate(Aggregate::total(AggregateOp::Sum));
        let result = QueryExecutor::new(spec).unwrap().aggregate(&records).unwrap();

        assert_eq!(result.total(), Some(&AggregateValue::Int(19000)));
        assert_eq!(result.matched_count, 3);
        assert_eq!(result.scanned_count, 5);
    }

    #[test]
    fn test_aggregate_per_group_follows_sort() {
        let records = make_records();
        let spec = QuerySpec::new()
            .with_sort(SortKey::asc(Field::Department))
            .with_aggregate(Aggregate::per_group(AggregateOp::Max, Field::Department));
        let result = QueryExecutor::new(spec).unwrap().aggregate(&records).unwrap();

        let Aggregated::Grouped(groups) = &result.value else {
            panic!("expected grouped output");
        };
        let keys: Vec<_> = groups.keys().map(|k| k.to_string()).collect();
        assert_eq!(keys, vec!["FIN", "HR", "IT"]);

        // Bob and Zed tie at 7000; the first match wins
        let it = result.group(&GroupKey::Text("IT".into()));
        assert_eq!(it, Some(&AggregateValue::Record(&records[2])));
    }

    #[test]
    fn test_aggregate_over_no_matches() {
        let records = make_records();
        let none = Predicate::eq(Field::Department, "OPS");

        let spec = QuerySpec::new()
            .with_filter(none.clone())
            .with_aggregate(Aggregate::total(AggregateOp::Average));
        let err = QueryExecutor::new(spec).unwrap().aggregate(&records).unwrap_err();
        assert_eq!(err.code(), ExecutorErrorCode::ExecutionFailed);
        assert_eq!(err.engine_error(), Some(&EngineError::empty("average")));

        let spec = QuerySpec::new()
            .with_filter(none.clone())
            .with_aggregate(Aggregate::total(AggregateOp::Count));
        let result = QueryExecutor::new(spec).unwrap().aggregate(&records).unwrap();
        assert_eq!(result.total(), Some(&AggregateValue::Count(0)));

        let spec = QuerySpec::new()
            .with_filter(none)
            .with_aggregate(Aggregate::per_group(AggregateOp::Sum, Field::Department));
        let result = QueryExecutor::new(spec).unwrap().aggregate(&records).unwrap();
        assert_eq!(result.value, Aggregated::Grouped(Default::default()));
    }

    #[test]
    fn test_aggregate_requires_step() {
        let records = make_records();
        let executor = QueryExecutor::new(QuerySpec::new()).unwrap();
        let err = executor.aggregate(&records).unwrap_err();
        assert_eq!(err.code(), ExecutorErrorCode::QueryInvalid);
    }

    #[test]
    fn test_aggregate_overflow_logged() {
        let records = vec![
            Record::new("1", "A", "a@dxc.com", "IT", i64::MAX),
            Record::new("2", "B", "b@dxc.com", "IT", 1),
        ];
        let spec = QuerySpec::new().with_aggregate(Aggregate::total(AggregateOp::Sum));
        let mut logger = Logger::new(Vec::new());
        let err = QueryExecutor::new(spec)
            .unwrap()
            .aggregate_logged(&records, &mut logger)
            .unwrap_err();
        assert_eq!(err.code(), ExecutorErrorCode::ExecutionFailed);

        let out = String::from_utf8(logger.into_inner()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["event"], "QUERY_FAILED");
        assert_eq!(parsed["severity"], "ERROR");
        assert_eq!(parsed["code"], "ROWFOLD_EXECUTION_FAILED");
    }
}
