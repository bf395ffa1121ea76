//! Whole-sequence aggregates
//!
//! Every function accepts anything that yields `&Record`: a record slice,
//! or the member list of a group via `members.iter().copied()`.
//!
//! Aggregates with no meaningful value over zero records fail with
//! `EmptyAggregate`. A count of zero is a valid count.

use serde::Serialize;

use crate::errors::{EngineError, EngineResult};
use crate::record::Record;

/// Number of records
pub fn count<'a, I>(records: I) -> usize
where
    I: IntoIterator<Item = &'a Record>,
{
    records.into_iter().count()
}

/// Sum of `value` over the records, with overflow checking
pub fn sum_by<'a, I, F>(records: I, value: F) -> EngineResult<i64>
where
    I: IntoIterator<Item = &'a Record>,
    F: Fn(&Record) -> i64,
{
    let mut iter = records.into_iter();
    let first = iter.next().ok_or(EngineError::empty("sum"))?;
    iter.try_fold(value(first), |acc, r| {
        acc.checked_add(value(r))
            .ok_or(EngineError::Overflow { operation: "sum" })
    })
}

/// Arithmetic mean of `value`
pub fn average_by<'a, I, F>(records: I, value: F) -> EngineResult<f64>
where
    I: IntoIterator<Item = &'a Record>,
    F: Fn(&Record) -> i64,
{
    let (total, n) = records
        .into_iter()
        .fold((0i128, 0usize), |(total, n), r| (total + value(r) as i128, n + 1));
    if n == 0 {
        return Err(EngineError::empty("average"));
    }
    Ok(total as f64 / n as f64)
}

/// Record with the largest `value`; the first one wins ties
pub fn max_by<'a, I, F>(records: I, value: F) -> EngineResult<&'a Record>
where
    I: IntoIterator<Item = &'a Record>,
    F: Fn(&Record) -> i64,
{
    let mut best: Option<(&Record, i64)> = None;
    for record in records {
        let v = value(record);
        match best {
            Some((_, current)) if v <= current => {}
            _ => best = Some((record, v)),
        }
    }
    best.map(|(r, _)| r).ok_or(EngineError::empty("max"))
}

/// Record with the smallest `value`; the first one wins ties
pub fn min_by<'a, I, F>(records: I, value: F) -> EngineResult<&'a Record>
where
    I: IntoIterator<Item = &'a Record>,
    F: Fn(&Record) -> i64,
{
    let mut best: Option<(&Record, i64)> = None;
    for record in records {
        let v = value(record);
        match best {
            Some((_, current)) if v >= current => {}
            _ => best = Some((record, v)),
        }
    }
    best.map(|(r, _)| r).ok_or(EngineError::empty("min"))
}

/// Left fold keeping the running highest record.
///
/// Agrees with [`max_by`] on every input.
pub fn reduce_to_highest<'a, I, F>(records: I, value: F) -> EngineResult<&'a Record>
where
    I: IntoIterator<Item = &'a Record>,
    F: Fn(&Record) -> i64,
{
    records
        .into_iter()
        .reduce(|acc, r| if value(acc) >= value(r) { acc } else { r })
        .ok_or(EngineError::empty("reduce"))
}

/// Left fold keeping the running lowest record.
///
/// Agrees with [`min_by`] on every input.
pub fn reduce_to_lowest<'a, I, F>(records: I, value: F) -> EngineResult<&'a Record>
where
    I: IntoIterator<Item = &'a Record>,
    F: Fn(&Record) -> i64,
{
    records
        .into_iter()
        .reduce(|acc, r| if value(acc) <= value(r) { acc } else { r })
        .ok_or(EngineError::empty("reduce"))
}

/// Count, sum, extremes and mean in one pass
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    pub count: usize,
    pub sum: i64,
    pub min: i64,
    pub max: i64,
    pub average: f64,
}

/// Summarises `value` over the records
pub fn summarize<'a, I, F>(records: I, value: F) -> EngineResult<Summary>
where
    I: IntoIterator<Item = &'a Record>,
    F: Fn(&Record) -> i64,
{
    let mut iter = records.into_iter();
    let first = value(iter.next().ok_or(EngineError::empty("summary"))?);
    let mut summary = Summary {
        count: 1,
        sum: first,
        min: first,
        max: first,
        average: 0.0,
    };
    for record in iter {
        let v = value(record);
        summary.count += 1;
        summary.sum = summary
            .sum
            .checked_add(v)
            .ok_or(EngineError::Overflow { operation: "summary" })?;
        summary.min = summary.min.min(v);
        summary.max = summary.max.max(v);
    }
    summary.average = summary.sum as f64 / summary.count as f64;
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn staff() -> Vec<Record> {
        vec![
            Record::new("1", "John", "john@dxc.com", "IT", 5000),
            Record::new("2", "Alice", "alice@dxc.com", "HR", 7000),
            Record::new("3", "Carlo", "carlo@dxc.com", "IT", 7000),
            Record::new("4", "David", "david@dxc.com", "Finance", 4000),
            Record::new("5", "Emma", "emma@dxc.com", "IT", 4000),
        ]
    }

    #[test]
    fn test_count() {
        assert_eq!(count(&staff()), 5);
        assert_eq!(count(&[] as &[Record]), 0);
    }

    #[test]
    fn test_sum_and_average() {
        let input = staff();
        assert_eq!(sum_by(&input, Record::salary).unwrap(), 27000);
        assert_eq!(average_by(&input, Record::salary).unwrap(), 5400.0);
    }

    #[test]
    fn test_empty_aggregates_have_no_value() {
        let empty: Vec<Record> = Vec::new();
        assert_eq!(sum_by(&empty, Record::salary), Err(EngineError::empty("sum")));
        assert_eq!(
            average_by(&empty, Record::salary),
            Err(EngineError::empty("average"))
        );
        assert!(max_by(&empty, Record::salary).is_err());
        assert!(min_by(&empty, Record::salary).is_err());
        assert!(reduce_to_highest(&empty, Record::salary).is_err());
        assert!(summarize(&empty, Record::salary).is_err());
    }

    #[test]
    fn test_sum_of_zeroes_is_a_value() {
        let input = vec![Record::new("1", "Z", "z@dxc.com", "IT", 0)];
        assert_eq!(sum_by(&input, Record::salary).unwrap(), 0);
    }

    #[test]
    fn test_sum_overflow() {
        let input = vec![
            Record::new("1", "A", "a@dxc.com", "IT", i64::MAX),
            Record::new("2", "B", "b@dxc.com", "IT", 1),
        ];
        assert_eq!(
            sum_by(&input, Record::salary),
            Err(EngineError::Overflow { operation: "sum" })
        );
        // Average accumulates wide and does not overflow
        assert!(average_by(&input, Record::salary).is_ok());
    }

    #[test]
    fn test_extremes_first_occurrence_wins() {
        let input = staff();
        assert_eq!(max_by(&input, Record::salary).unwrap().name(), "Alice");
        assert_eq!(min_by(&input, Record::salary).unwrap().name(), "David");
    }

    #[test]
    fn test_reduce_agrees_with_extremes() {
        let input = staff();
        assert_eq!(
            reduce_to_highest(&input, Record::salary).unwrap(),
            max_by(&input, Record::salary).unwrap()
        );
        assert!(std::ptr::eq(
            reduce_to_lowest(&input, Record::salary).unwrap(),
            min_by(&input, Record::salary).unwrap()
        ));
    }

    #[test]
    fn test_summary() {
        let s = summarize(&staff(), Record::salary).unwrap();
        assert_eq!(s.count, 5);
        assert_eq!(s.sum, 27000);
        assert_eq!(s.min, 4000);
        assert_eq!(s.max, 7000);
        assert_eq!(s.average, 5400.0);
    }

    #[test]
    fn test_over_group_members() {
        let input = staff();
        let members: Vec<&Record> = input.iter().filter(|r| r.department() == "IT").collect();
        assert_eq!(sum_by(members.iter().copied(), Record::salary).unwrap(), 16000);
    }
}
