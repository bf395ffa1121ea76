//! The full employee report
//!
//! Walks every engine operation over one record slice and renders the
//! results as numbered sections. All computation is delegated to the engine;
//! this module only chooses parameters and formats.

use std::io::{self, Write};

use serde::{Deserialize, Serialize};

use super::errors::ReportResult;
use super::writer::{bracketed, summary_line, ReportWriter};
use crate::aggregator::{
    average_by, average_per_group, collect_per_group, count_per_group, max_by, max_per_group,
    min_by, reduce_to_highest, set_per_group, sorted_names_per_group, sum_by, summarize,
    summary_per_group, total_per_group,
};
use crate::errors::{EngineError, EngineResult};
use crate::keys::{BandLadder, Field, SortKey, SortSpec};
use crate::observability::Logger;
use crate::operators::{
    all_match, any_match, bottom_n, count_by, dedupe_by_value, distinct_keys, find_by_id,
    find_duplicates_by, group_by, group_by_nested, map_by_id, paginate, partition, sort,
    sort_by_numeric_id, sort_groups_by_count_desc, sort_within_groups, sorted_text, top_n,
    ConflictPolicy, PageRequest,
};
use crate::record::{raise_all, Record};
use crate::serialize::{csv_header, join_field, to_csv_lines, to_json_array};

/// Parameters of the employee report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportOptions {
    pub title: String,
    /// Identifier looked up in the find-by-id section
    pub find_id: String,
    /// Strict lower bound for the any-match section
    pub any_above: i64,
    /// Inclusive lower bound for the all-match section
    pub all_at_least: i64,
    pub top_n: i64,
    pub bottom_n: i64,
    /// Inclusive salary threshold of the partition section
    pub partition_at: i64,
    pub page: PageRequest,
    pub raise_percent: f64,
    pub bands: BandLadder,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            title: "Employee report".to_string(),
            find_id: "3".to_string(),
            any_above: 7000,
            all_at_least: 4800,
            top_n: 3,
            bottom_n: 2,
            partition_at: 6000,
            page: PageRequest::new(2, 3),
            raise_percent: 10.0,
            bands: BandLadder::standard(),
        }
    }
}

impl ReportOptions {
    pub fn validate(&self) -> EngineResult<()> {
        self.bands.validate()?;
        if self.page.page == 0 || self.page.size == 0 {
            return Err(EngineError::invalid_config(
                "report page and size must be >= 1",
            ));
        }
        if !self.raise_percent.is_finite() {
            return Err(EngineError::invalid_config("raise_percent must be finite"));
        }
        Ok(())
    }
}

/// Renders the full report over a record slice
#[derive(Debug, Clone)]
pub struct EmployeeReport<'a> {
    records: &'a [Record],
    options: ReportOptions,
}

impl<'a> EmployeeReport<'a> {
    /// Report with default options
    pub fn new(records: &'a [Record]) -> Self {
        Self {
            records,
            options: ReportOptions::default(),
        }
    }

    pub fn with_options(records: &'a [Record], options: ReportOptions) -> EngineResult<Self> {
        options.validate()?;
        Ok(Self { records, options })
    }

    pub fn options(&self) -> &ReportOptions {
        &self.options
    }

    /// Renders the whole report to a string, without logging
    pub fn full(records: &'a [Record]) -> ReportResult<String> {
        let (out, _) = Self::new(records).write_to(Vec::new(), Logger::new(io::sink()))?;
        Ok(String::from_utf8_lossy(&out).into_owned())
    }

    /// Header, every section and closing rule; returns the sinks
    pub fn write_to<W: Write, L: Write>(
        &self,
        out: W,
        logger: Logger<L>,
    ) -> ReportResult<(W, Logger<L>)> {
        let mut writer = ReportWriter::new(out, logger);
        writer.begin(&self.options.title)?;
        self.render(&mut writer)?;
        Ok(writer.finish()?)
    }

    /// Writes every section to an already started writer
    pub fn render<W: Write, L: Write>(&self, w: &mut ReportWriter<W, L>) -> ReportResult<()> {
        let records = self.records;
        let o = &self.options;
        let salary = Record::salary;

        w.section("Records")?;
        w.records(records)?;

        // Ordering
        w.section("Sort by id (lexicographic)")?;
        w.records(sort(records, &SortSpec::by(SortKey::asc(Field::Id))))?;

        w.section("Sort by id (numeric)")?;
        let numeric = sort_by_numeric_id(records);
        w.records(numeric.records.iter().copied())?;
        w.exclusions(&numeric.excluded)?;

        w.section("Sort by salary (descending)")?;
        w.records(sort(records, &SortSpec::by(SortKey::desc(Field::Salary))))?;

        w.section("Stable sort by salary (ties keep input order)")?;
        w.records(sort(records, &SortSpec::by(SortKey::asc(Field::Salary))))?;

        w.section("Sort by department, salary (descending), name")?;
        let composite = SortSpec::by(SortKey::asc(Field::Department))
            .then(SortKey::desc(Field::Salary))
            .then(SortKey::asc(Field::Name));
        w.records(sort(records, &composite))?;

        w.section("Names sorted alphabetically")?;
        w.list(sorted_text(records, Record::name))?;

        // Lookup and predicates
        w.section(&format!("Find by id = {}", o.find_id))?;
        w.record_or_none(find_by_id(records, &o.find_id))?;

        w.section(&format!("Any salary > {}", o.any_above))?;
        w.value(any_match(records, |r| r.salary() > o.any_above))?;

        w.section(&format!("All salaries >= {}", o.all_at_least))?;
        w.value(all_match(records, |r| r.salary() >= o.all_at_least))?;

        // Scalar aggregates
        w.section("Highest salary")?;
        w.record_or_none(present(max_by(records, salary))?)?;

        w.section("Lowest salary")?;
        w.record_or_none(present(min_by(records, salary))?)?;

        w.section("Reduce to highest-paid")?;
        w.record_or_none(present(reduce_to_highest(records, salary))?)?;

        w.section("Sum of salaries")?;
        w.value_or_none(present(sum_by(records, salary))?)?;

        w.section("Average salary")?;
        w.value_or_none(present(average_by(records, salary))?.map(|a| format!("{:.2}", a)))?;

        w.section("Salary summary")?;
        match present(summarize(records, salary))? {
            Some(summary) => w.summary(&summary)?,
            None => w.value("none")?,
        }

        // Grouping
        w.section("Group by department")?;
        w.groups(&group_by(records, department))?;

        w.section("Highest salary per department")?;
        w.map(&max_per_group(records, department, salary)?)?;

        w.section("Total salary per department")?;
        w.map(&total_per_group(records, department, salary)?)?;

        w.section("Average salary per department")?;
        w.map_with(&average_per_group(records, department, salary)?, |a| {
            format!("{:.2}", a)
        })?;

        w.section("Salary summary per department")?;
        w.map_with(&summary_per_group(records, department, salary)?, summary_line)?;

        w.section("Count by department")?;
        w.map(&count_per_group(records, department))?;

        w.section("Department counts sorted by count (descending)")?;
        w.map(&sort_groups_by_count_desc(&count_by(records, department)))?;

        w.section("Distinct departments")?;
        w.list(distinct_keys(records, department))?;

        w.section("Department -> names")?;
        w.map_with(&set_per_group(records, department, Record::name), |names| {
            bracketed(names)
        })?;

        w.section("Department -> sorted names")?;
        w.map_with(&sorted_names_per_group(records, department), |names| {
            bracketed(names)
        })?;

        w.section("Department -> salaries")?;
        w.map_with(&collect_per_group(records, department, salary), |s| {
            bracketed(s)
        })?;

        w.section("Each department sorted by salary (descending)")?;
        let by_salary = SortSpec::by(SortKey::desc(Field::Salary));
        w.groups(&sort_within_groups(&group_by(records, department), &by_salary))?;

        w.section("Department -> salary band")?;
        let nested = group_by_nested(records, department, o.bands.key_fn());
        w.map_with(&nested, |bands| {
            let parts: Vec<String> = bands
                .iter()
                .map(|(band, members)| format!("{}={}", band, bracketed(members.iter())))
                .collect();
            format!("{{{}}}", parts.join(", "))
        })?;

        // Selection
        w.section(&format!("Top {} by salary", o.top_n))?;
        w.records(top_n(records, salary, o.top_n))?;

        w.section(&format!("Bottom {} by salary", o.bottom_n))?;
        w.records(bottom_n(records, salary, o.bottom_n))?;

        w.section(&format!("Partition by salary >= {}", o.partition_at))?;
        w.partition(&partition(records, |r| r.salary() >= o.partition_at))?;

        w.section(&format!("Page {} (size {})", o.page.page, o.page.size))?;
        w.page(&paginate(records, &o.page))?;

        // Identity
        w.section("Map id -> record (higher salary wins)")?;
        w.map(&map_by_id(records, &ConflictPolicy::KeepHigher(Record::salary))?)?;

        w.section("Identifier uniqueness")?;
        match map_by_id(records, &ConflictPolicy::Reject) {
            Ok(map) => w.value(format!("{} unique identifiers", map.len()))?,
            Err(EngineError::ConflictingKey { id }) => w.conflict(&id)?,
            Err(e) => return Err(e.into()),
        }

        w.section("Duplicate emails")?;
        let duplicates = find_duplicates_by(records, |r| r.email().to_lowercase());
        w.list(duplicates.iter().map(|r| r.email()))?;

        w.section("Distinct by value")?;
        w.records(dedupe_by_value(records))?;

        // Rendering
        w.section("All emails")?;
        w.value(join_field(records, Field::Email, ", "))?;

        w.section("CSV lines")?;
        w.value(csv_header())?;
        for line in to_csv_lines(records) {
            w.value(line)?;
        }

        w.section("JSON")?;
        w.value(to_json_array(records)?)?;

        // Derived records
        w.section(&format!("Salaries raised by {}%", o.raise_percent))?;
        w.records(&raise_all(records, o.raise_percent))?;

        Ok(())
    }
}

fn department(record: &Record) -> String {
    record.department().to_string()
}

/// Absence errors become `None`; anything else propagates
fn present<T>(result: EngineResult<T>) -> EngineResult<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_absence() => Ok(None),
        Err(e) => Err(e),
    }
}
