//! Sorting and top/bottom-N selection
//!
//! Every sort here is stable: records that compare equal keep their input
//! order. Outputs borrow from the input slice, which is never reordered.

use std::cmp::Ordering;

use super::result::{Exclusion, Selection};
use crate::keys::{parse_numeric_id, SortSpec};
use crate::record::Record;

/// Sorts records by a composite specification
pub fn sort<'a>(records: &'a [Record], spec: &SortSpec) -> Vec<&'a Record> {
    let mut out: Vec<&Record> = records.iter().collect();
    sort_refs(&mut out, spec);
    out
}

/// Sorts records with a closure comparator
pub fn sort_by<'a, C>(records: &'a [Record], cmp: C) -> Vec<&'a Record>
where
    C: Fn(&Record, &Record) -> Ordering,
{
    let mut out: Vec<&Record> = records.iter().collect();
    out.sort_by(|a, b| cmp(a, b));
    out
}

/// Sorts an already-borrowed sequence in place
pub(crate) fn sort_refs(records: &mut [&Record], spec: &SortSpec) {
    if spec.is_empty() {
        return;
    }
    records.sort_by(|a, b| spec.compare(a, b));
}

/// Sorts by identifier read as an integer.
///
/// Records whose identifier does not parse are left out of the ordering and
/// listed in [`Selection::excluded`].
pub fn sort_by_numeric_id(records: &[Record]) -> Selection<'_> {
    let mut keyed = Vec::with_capacity(records.len());
    let mut excluded = Vec::new();

    for record in records {
        match parse_numeric_id(record) {
            Ok(n) => keyed.push((n, record)),
            Err(e) => excluded.push(Exclusion {
                id: record.id().to_string(),
                reason: e.to_string(),
            }),
        }
    }

    keyed.sort_by_key(|(n, _)| *n);

    Selection {
        records: keyed.into_iter().map(|(_, r)| r).collect(),
        excluded,
    }
}

/// Highest `n` records by `key`.
///
/// Equal to the first `n` records of a stable descending sort. Returns all
/// records when fewer than `n` exist, and nothing when `n <= 0`.
pub fn top_n<'a, K, F>(records: &'a [Record], key: F, n: i64) -> Vec<&'a Record>
where
    K: Ord,
    F: Fn(&Record) -> K,
{
    take_sorted(records, |a, b| key(b).cmp(&key(a)), n)
}

/// Lowest `n` records by `key`, with the same edge rules as [`top_n`]
pub fn bottom_n<'a, K, F>(records: &'a [Record], key: F, n: i64) -> Vec<&'a Record>
where
    K: Ord,
    F: Fn(&Record) -> K,
{
    take_sorted(records, |a, b| key(a).cmp(&key(b)), n)
}

fn take_sorted<'a, C>(records: &'a [Record], cmp: C, n: i64) -> Vec<&'a Record>
where
    C: Fn(&Record, &Record) -> Ordering,
{
    if n <= 0 {
        return Vec::new();
    }
    let mut out = sort_by(records, cmp);
    out.truncate(usize::try_from(n).unwrap_or(usize::MAX));
    out
}

/// Text values read by `accessor`, sorted lexicographically
pub fn sorted_text<'a, F>(records: &'a [Record], accessor: F) -> Vec<&'a str>
where
    F: Fn(&'a Record) -> &'a str,
{
    let mut out: Vec<&str> = records.iter().map(accessor).collect();
    out.sort_unstable();
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::{Field, SortKey};

    fn make(id: &str, name: &str, salary: i64) -> Record {
        Record::new(id, name, format!("{}@dxc.com", name.to_lowercase()), "IT", salary)
    }

    #[test]
    fn test_sort_ascending() {
        let input = vec![make("c", "C", 30), make("a", "A", 20), make("b", "B", 25)];
        let out = sort(&input, &SortSpec::by(SortKey::asc(Field::Salary)));
        let ids: Vec<_> = out.iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_sort_descending() {
        let input = vec![make("c", "C", 30), make("a", "A", 20), make("b", "B", 25)];
        let out = sort(&input, &SortSpec::by(SortKey::desc(Field::Salary)));
        let ids: Vec<_> = out.iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec!["c", "b", "a"]);
    }

    #[test]
    fn test_sort_stable() {
        // Same salary, original order preserved
        let input = vec![make("a", "A", 25), make("b", "B", 25), make("c", "C", 25)];
        for key in [SortKey::asc(Field::Salary), SortKey::desc(Field::Salary)] {
            let out = sort(&input, &SortSpec::by(key));
            let ids: Vec<_> = out.iter().map(|r| r.id()).collect();
            assert_eq!(ids, vec!["a", "b", "c"]);
        }
    }

    #[test]
    fn test_sort_by_id_is_lexicographic() {
        let input = vec![make("10", "J", 1), make("2", "A", 1), make("1", "Z", 1)];
        let out = sort(&input, &SortSpec::by(SortKey::asc(Field::Id)));
        let ids: Vec<_> = out.iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec!["1", "10", "2"]);
    }

    #[test]
    fn test_sort_by_numeric_id_excludes_unparseable() {
        let input = vec![
            make("10", "J", 1),
            make("E-4", "X", 1),
            make("2", "A", 1),
            make("", "Blank", 1),
            make("1", "Z", 1),
        ];
        let sel = sort_by_numeric_id(&input);
        let ids: Vec<_> = sel.records.iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec!["1", "2", "10"]);

        let dropped: Vec<_> = sel.excluded.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(dropped, vec!["E-4", ""]);
        assert_eq!(sel.considered(), input.len());
    }

    #[test]
    fn test_top_and_bottom_n() {
        let input = vec![make("1", "A", 10), make("2", "B", 30), make("3", "C", 20)];
        let top: Vec<_> = top_n(&input, Record::salary, 2).iter().map(|r| r.id()).collect();
        assert_eq!(top, vec!["2", "3"]);

        let bottom: Vec<_> = bottom_n(&input, Record::salary, 2).iter().map(|r| r.id()).collect();
        assert_eq!(bottom, vec!["1", "3"]);
    }

    #[test]
    fn test_top_n_edges() {
        let input = vec![make("1", "A", 10), make("2", "B", 30)];
        assert_eq!(top_n(&input, Record::salary, 5).len(), 2);
        assert!(top_n(&input, Record::salary, 0).is_empty());
        assert!(bottom_n(&input, Record::salary, -3).is_empty());
        assert!(top_n(&[], Record::salary, 3).is_empty());
    }

    #[test]
    fn test_sorted_text() {
        let input = vec![make("1", "Frank", 1), make("2", "Alice", 1), make("3", "Carlo", 1)];
        assert_eq!(sorted_text(&input, Record::name), vec!["Alice", "Carlo", "Frank"]);
    }
}
