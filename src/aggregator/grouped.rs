//! Per-group aggregates
//!
//! Each function groups with `operators::group_by` and applies a
//! whole-sequence aggregate to every group independently. Output maps keep
//! the group order of `group_by`. Groups are never empty, so the only error
//! a numeric aggregate can raise here is overflow.

use indexmap::{IndexMap, IndexSet};
use std::hash::Hash;

use super::aggregate::{average_by, max_by, min_by, summarize, sum_by, Summary};
use crate::errors::EngineResult;
use crate::keys::KeyExtractor;
use crate::operators::{count_by, group_by, Groups};
use crate::record::Record;

fn per_group<'a, K, T, A>(groups: Groups<'a, K>, aggregate: A) -> EngineResult<IndexMap<K, T>>
where
    K: Hash + Eq,
    A: Fn(&[&'a Record]) -> EngineResult<T>,
{
    groups
        .into_iter()
        .map(|(k, members)| aggregate(&members).map(|v| (k, v)))
        .collect()
}

/// Records per group
pub fn count_per_group<K, E>(records: &[Record], key: E) -> IndexMap<K, usize>
where
    K: Hash + Eq,
    E: KeyExtractor<K>,
{
    count_by(records, key)
}

/// Sum of `value` per group
pub fn total_per_group<K, E, V>(
    records: &[Record],
    key: E,
    value: V,
) -> EngineResult<IndexMap<K, i64>>
where
    K: Hash + Eq,
    E: KeyExtractor<K>,
    V: Fn(&Record) -> i64,
{
    per_group(group_by(records, key), |m| sum_by(m.iter().copied(), &value))
}

/// Mean of `value` per group
pub fn average_per_group<K, E, V>(
    records: &[Record],
    key: E,
    value: V,
) -> EngineResult<IndexMap<K, f64>>
where
    K: Hash + Eq,
    E: KeyExtractor<K>,
    V: Fn(&Record) -> i64,
{
    per_group(group_by(records, key), |m| average_by(m.iter().copied(), &value))
}

/// Highest record per group, first occurrence winning ties
pub fn max_per_group<'a, K, E, V>(
    records: &'a [Record],
    key: E,
    value: V,
) -> EngineResult<IndexMap<K, &'a Record>>
where
    K: Hash + Eq,
    E: KeyExtractor<K>,
    V: Fn(&Record) -> i64,
{
    per_group(group_by(records, key), |m| max_by(m.iter().copied(), &value))
}

/// Lowest record per group, first occurrence winning ties
pub fn min_per_group<'a, K, E, V>(
    records: &'a [Record],
    key: E,
    value: V,
) -> EngineResult<IndexMap<K, &'a Record>>
where
    K: Hash + Eq,
    E: KeyExtractor<K>,
    V: Fn(&Record) -> i64,
{
    per_group(group_by(records, key), |m| min_by(m.iter().copied(), &value))
}

/// Full summary per group
pub fn summary_per_group<K, E, V>(
    records: &[Record],
    key: E,
    value: V,
) -> EngineResult<IndexMap<K, Summary>>
where
    K: Hash + Eq,
    E: KeyExtractor<K>,
    V: Fn(&Record) -> i64,
{
    per_group(group_by(records, key), |m| summarize(m.iter().copied(), &value))
}

/// Projects every member of each group, keeping input order and duplicates
pub fn collect_per_group<'a, K, T, E, P>(
    records: &'a [Record],
    key: E,
    projection: P,
) -> IndexMap<K, Vec<T>>
where
    K: Hash + Eq,
    E: KeyExtractor<K>,
    P: Fn(&'a Record) -> T,
{
    group_by(records, key)
        .into_iter()
        .map(|(k, members)| (k, members.into_iter().map(&projection).collect()))
        .collect()
}

/// Distinct projected values per group, in first-seen order
pub fn set_per_group<'a, K, T, E, P>(
    records: &'a [Record],
    key: E,
    projection: P,
) -> IndexMap<K, IndexSet<T>>
where
    K: Hash + Eq,
    T: Hash + Eq,
    E: KeyExtractor<K>,
    P: Fn(&'a Record) -> T,
{
    group_by(records, key)
        .into_iter()
        .map(|(k, members)| (k, members.into_iter().map(&projection).collect()))
        .collect()
}

/// Member names per group, sorted lexicographically
pub fn sorted_names_per_group<K, E>(records: &[Record], key: E) -> IndexMap<K, Vec<&str>>
where
    K: Hash + Eq,
    E: KeyExtractor<K>,
{
    let mut names = collect_per_group(records, key, Record::name);
    for list in names.values_mut() {
        list.sort_unstable();
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::EngineError;
    use crate::keys::{BandLadder, Field, GroupKey};

    fn staff() -> Vec<Record> {
        vec![
            Record::new("1", "John", "john@dxc.com", "IT", 5000),
            Record::new("2", "Alice", "alice@dxc.com", "HR", 6000),
            Record::new("3", "Carlo", "carlo@dxc.com", "IT", 7000),
            Record::new("4", "Bea", "bea@dxc.com", "HR", 6000),
        ]
    }

    fn dept(r: &Record) -> String {
        r.department().to_string()
    }

    #[test]
    fn test_totals_and_averages() {
        let input = staff();
        let totals = total_per_group(&input, dept, Record::salary).unwrap();
        assert_eq!(totals["IT"], 12000);
        assert_eq!(totals["HR"], 12000);

        let avgs = average_per_group(&input, dept, Record::salary).unwrap();
        assert_eq!(avgs["IT"], 6000.0);
        assert_eq!(avgs["HR"], 6000.0);
    }

    #[test]
    fn test_extremes_per_group() {
        let input = staff();
        let max = max_per_group(&input, dept, Record::salary).unwrap();
        assert_eq!(max["IT"].id(), "3");
        // Tie on 6000: first occurrence
        assert_eq!(max["HR"].id(), "2");

        let min = min_per_group(&input, dept, Record::salary).unwrap();
        assert_eq!(min["IT"].id(), "1");
        assert_eq!(min["HR"].id(), "2");
    }

    #[test]
    fn test_counts_and_summaries() {
        let input = staff();
        let counts = count_per_group(&input, dept);
        assert_eq!(counts["IT"], 2);

        let summaries = summary_per_group(&input, dept, Record::salary).unwrap();
        assert_eq!(summaries["IT"].max, 7000);
        assert_eq!(summaries["HR"].count, 2);
    }

    #[test]
    fn test_overflow_surfaces_per_group() {
        let input = vec![
            Record::new("1", "A", "a@dxc.com", "IT", i64::MAX),
            Record::new("2", "B", "b@dxc.com", "IT", i64::MAX),
        ];
        let err = total_per_group(&input, dept, Record::salary).unwrap_err();
        assert_eq!(err, EngineError::Overflow { operation: "sum" });
    }

    #[test]
    fn test_projections() {
        let input = staff();
        let salaries = collect_per_group(&input, dept, Record::salary);
        assert_eq!(salaries["HR"], vec![6000, 6000]);

        let distinct = set_per_group(&input, dept, Record::salary);
        assert_eq!(distinct["HR"].len(), 1);

        let names = sorted_names_per_group(&input, dept);
        assert_eq!(names["HR"], vec!["Alice", "Bea"]);
        assert_eq!(names["IT"], vec!["Carlo", "John"]);
    }

    #[test]
    fn test_empty_input_is_empty_map() {
        let empty: Vec<Record> = Vec::new();
        assert!(total_per_group(&empty, dept, Record::salary).unwrap().is_empty());
    }

    #[test]
    fn test_field_and_band_keys() {
        let input = staff();
        let totals = total_per_group(&input, Field::Department, Record::salary).unwrap();
        assert_eq!(totals[&GroupKey::Text("IT".into())], 12000);

        let bands = count_per_group(&input, BandLadder::standard());
        assert_eq!(bands["LOW"], 1);
        assert_eq!(bands["MID"], 2);
        assert_eq!(bands["HIGH"], 1);
    }
}
