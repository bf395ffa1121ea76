//! Identifier maps with explicit conflict resolution
//!
//! Building an identifier -> record map from a sequence that may repeat an
//! identifier needs a decision about which record survives. Every call names
//! a [`ConflictPolicy`]; the default policy is [`ConflictPolicy::Reject`], so a
//! collision is never resolved silently.

use indexmap::map::Entry;
use indexmap::IndexMap;
use std::fmt;

use crate::errors::{EngineError, EngineResult};
use crate::record::Record;

/// Which of two colliding records a merge function keeps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keep {
    /// The record already in the map
    Existing,
    /// The record just read
    Incoming,
}

/// Caller-supplied merge function
pub type MergeFn = Box<dyn Fn(&Record, &Record) -> Keep + Send + Sync>;

/// How `map_by_id` resolves an identifier seen twice
#[derive(Default)]
pub enum ConflictPolicy {
    /// Fail with `ConflictingKey` on the first collision
    #[default]
    Reject,
    /// Keep the earlier record
    KeepFirst,
    /// Keep the most recently read record
    KeepLast,
    /// Keep the record with the larger value; the earlier record wins ties
    KeepHigher(fn(&Record) -> i64),
    /// Let a merge function pick, called as `merge(existing, incoming)`
    Merge(MergeFn),
}

impl ConflictPolicy {
    /// Wraps a merge closure
    pub fn merge<F>(f: F) -> Self
    where
        F: Fn(&Record, &Record) -> Keep + Send + Sync + 'static,
    {
        ConflictPolicy::Merge(Box::new(f))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConflictPolicy::Reject => "reject",
            ConflictPolicy::KeepFirst => "keep_first",
            ConflictPolicy::KeepLast => "keep_last",
            ConflictPolicy::KeepHigher(_) => "keep_higher",
            ConflictPolicy::Merge(_) => "merge",
        }
    }

    fn resolve(&self, existing: &Record, incoming: &Record) -> EngineResult<Keep> {
        match self {
            ConflictPolicy::Reject => Err(EngineError::ConflictingKey {
                id: incoming.id().to_string(),
            }),
            ConflictPolicy::KeepFirst => Ok(Keep::Existing),
            ConflictPolicy::KeepLast => Ok(Keep::Incoming),
            ConflictPolicy::KeepHigher(value) => {
                if value(existing) >= value(incoming) {
                    Ok(Keep::Existing)
                } else {
                    Ok(Keep::Incoming)
                }
            }
            ConflictPolicy::Merge(merge) => Ok(merge(existing, incoming)),
        }
    }
}

impl fmt::Debug for ConflictPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ConflictPolicy::{}", self.as_str())
    }
}

/// Builds an identifier -> record map.
///
/// Keys appear in first-occurrence order; a replaced value keeps its key's
/// original position.
pub fn map_by_id<'a>(
    records: &'a [Record],
    policy: &ConflictPolicy,
) -> EngineResult<IndexMap<&'a str, &'a Record>> {
    let mut map: IndexMap<&'a str, &'a Record> = IndexMap::with_capacity(records.len());
    for record in records {
        match map.entry(record.id()) {
            Entry::Vacant(slot) => {
                slot.insert(record);
            }
            Entry::Occupied(mut slot) => {
                if policy.resolve(slot.get(), record)? == Keep::Incoming {
                    slot.insert(record);
                }
            }
        }
    }
    Ok(map)
}
