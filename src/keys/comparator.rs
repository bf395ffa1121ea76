//! Comparator construction
//!
//! Two flavours are provided:
//! - [`SortSpec`]: a serializable chain of (field, direction) keys
//! - closure combinators ([`comparing`], [`comparing_desc`], [`then`]) over
//!   typed accessors
//!
//! Both evaluate the first key and only fall through to the next on
//! equality. Neither is responsible for stability; operators sort with a
//! stable algorithm.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::field::Field;
use crate::record::Record;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    /// Applies this direction to an ascending ordering
    pub fn apply(&self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

/// One link of a composite comparator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SortKey {
    /// Field to sort by
    pub field: Field,
    /// Sort direction
    #[serde(default)]
    pub direction: SortDirection,
}

impl SortKey {
    pub fn asc(field: Field) -> Self {
        Self {
            field,
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: Field) -> Self {
        Self {
            field,
            direction: SortDirection::Desc,
        }
    }

    /// Compares two records on this key alone
    pub fn compare(&self, a: &Record, b: &Record) -> Ordering {
        let ordering = self.field.value(a).cmp(&self.field.value(b));
        self.direction.apply(ordering)
    }
}

/// Composite sort specification
///
/// An empty chain treats every pair as equal, so a stable sort leaves the
/// input order untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SortSpec {
    keys: Vec<SortKey>,
}

impl SortSpec {
    /// Starts a chain with a single key
    pub fn by(key: SortKey) -> Self {
        Self { keys: vec![key] }
    }

    /// Builds a chain from keys in priority order
    pub fn from_keys(keys: Vec<SortKey>) -> Self {
        Self { keys }
    }

    /// Appends a tie-break key
    pub fn then(mut self, key: SortKey) -> Self {
        self.keys.push(key);
        self
    }

    /// Returns the keys in priority order
    pub fn keys(&self) -> &[SortKey] {
        &self.keys
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Compares two records, falling through keys on equality
    pub fn compare(&self, a: &Record, b: &Record) -> Ordering {
        for key in &self.keys {
            let ordering = key.compare(a, b);
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    }
}

/// Ascending comparator over an owned key
pub fn comparing<K, F>(key: F) -> impl Fn(&Record, &Record) -> Ordering
where
    K: Ord,
    F: Fn(&Record) -> K,
{
    move |a: &Record, b: &Record| key(a).cmp(&key(b))
}

/// Descending comparator over an owned key
pub fn comparing_desc<K, F>(key: F) -> impl Fn(&Record, &Record) -> Ordering
where
    K: Ord,
    F: Fn(&Record) -> K,
{
    move |a: &Record, b: &Record| key(b).cmp(&key(a))
}

/// Ascending comparator over a borrowed text accessor such as `Record::name`
pub fn comparing_text<F>(key: F) -> impl Fn(&Record, &Record) -> Ordering
where
    F: for<'a> Fn(&'a Record) -> &'a str,
{
    move |a: &Record, b: &Record| key(a).cmp(key(b))
}

/// Chains a tie-break comparator after `first`
pub fn then<A, B>(first: A, second: B) -> impl Fn(&Record, &Record) -> Ordering
where
    A: Fn(&Record, &Record) -> Ordering,
    B: Fn(&Record, &Record) -> Ordering,
{
    move |a: &Record, b: &Record| first(a, b).then_with(|| second(a, b))
}
