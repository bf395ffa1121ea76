//! Group-by operators
//!
//! Groups are insertion ordered: the first record carrying a key fixes that
//! key's position in the map, and members keep their input order. Any other
//! ordering is applied explicitly by a re-sort step.

use indexmap::{IndexMap, IndexSet};
use std::hash::Hash;

use super::sorter::sort_refs;
use crate::keys::{KeyExtractor, SortSpec};
use crate::record::Record;

/// Key -> member records, in first-occurrence order
pub type Groups<'a, K> = IndexMap<K, Vec<&'a Record>>;

/// Outer key -> inner key -> member records
pub type NestedGroups<'a, K1, K2> = IndexMap<K1, IndexMap<K2, Vec<&'a Record>>>;

/// Groups records by the key `key` extracts
pub fn group_by<'a, K, E>(records: &'a [Record], key: E) -> Groups<'a, K>
where
    K: Hash + Eq,
    E: KeyExtractor<K>,
{
    group_refs(records.iter(), &key)
}

pub(crate) fn group_refs<'a, K, E, I>(records: I, key: &E) -> Groups<'a, K>
where
    K: Hash + Eq,
    E: KeyExtractor<K>,
    I: IntoIterator<Item = &'a Record>,
{
    let mut groups: Groups<'a, K> = IndexMap::new();
    for record in records {
        groups.entry(key.key(record)).or_default().push(record);
    }
    groups
}

/// Groups by `outer`, then each outer group again by `inner`
pub fn group_by_nested<'a, K1, K2, E1, E2>(
    records: &'a [Record],
    outer: E1,
    inner: E2,
) -> NestedGroups<'a, K1, K2>
where
    K1: Hash + Eq,
    K2: Hash + Eq,
    E1: KeyExtractor<K1>,
    E2: KeyExtractor<K2>,
{
    group_by(records, outer)
        .into_iter()
        .map(|(k, members)| (k, group_refs(members, &inner)))
        .collect()
}

/// Number of records per key, in first-occurrence order
pub fn count_by<K, E>(records: &[Record], key: E) -> IndexMap<K, usize>
where
    K: Hash + Eq,
    E: KeyExtractor<K>,
{
    let mut counts: IndexMap<K, usize> = IndexMap::new();
    for record in records {
        *counts.entry(key.key(record)).or_insert(0) += 1;
    }
    counts
}

/// Re-orders a count map by count descending, then key ascending
pub fn sort_groups_by_count_desc<K>(counts: &IndexMap<K, usize>) -> IndexMap<K, usize>
where
    K: Hash + Eq + Ord + Clone,
{
    let mut sorted = counts.clone();
    sorted.sort_by(|k1, c1, k2, c2| c2.cmp(c1).then_with(|| k1.cmp(k2)));
    sorted
}

/// Returns a copy of `groups` with each member list sorted by `spec`
pub fn sort_within_groups<'a, K>(groups: &Groups<'a, K>, spec: &SortSpec) -> Groups<'a, K>
where
    K: Hash + Eq + Clone,
{
    groups
        .iter()
        .map(|(k, members)| {
            let mut members = members.clone();
            sort_refs(&mut members, spec);
            (k.clone(), members)
        })
        .collect()
}

/// Distinct keys in first-occurrence order
pub fn distinct_keys<K, E>(records: &[Record], key: E) -> Vec<K>
where
    K: Hash + Eq,
    E: KeyExtractor<K>,
{
    records
        .iter()
        .map(|record| key.key(record))
        .collect::<IndexSet<K>>()
        .into_iter()
        .collect()
}
