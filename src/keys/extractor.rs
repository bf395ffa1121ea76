//! Grouping key extraction
//!
//! [`KeyExtractor`] is implemented for any pure `Fn(&Record) -> K`, for a
//! [`Field`] and for a [`BandLadder`]. This module also holds the derived
//! keys that need configuration: salary band ladders and numeric identifier
//! parsing.

use serde::{Deserialize, Serialize};

use super::field::{Field, GroupKey};
use crate::errors::{EngineError, EngineResult};
use crate::record::Record;

/// Derives a grouping key from a record
pub trait KeyExtractor<K> {
    fn key(&self, record: &Record) -> K;
}

impl<K, F> KeyExtractor<K> for F
where
    F: Fn(&Record) -> K,
{
    fn key(&self, record: &Record) -> K {
        self(record)
    }
}

impl KeyExtractor<GroupKey> for Field {
    fn key(&self, record: &Record) -> GroupKey {
        self.value(record).to_owned_key()
    }
}

/// Groups by the salary band label
impl KeyExtractor<String> for BandLadder {
    fn key(&self, record: &Record) -> String {
        self.classify(record.salary()).to_string()
    }
}

/// One rung of a band ladder: values strictly below `below` get `label`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Band {
    pub below: i64,
    pub label: String,
}

/// Maps a numeric value to a label by fixed cutoffs
///
/// Rungs are checked in ascending order; the first rung whose bound exceeds
/// the value wins. Values at or above the last bound get `top`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BandLadder {
    bands: Vec<Band>,
    top: String,
}

impl BandLadder {
    /// Creates a validated ladder.
    ///
    /// Bounds must be strictly ascending and every label non-empty.
    pub fn new(bands: Vec<Band>, top: impl Into<String>) -> EngineResult<Self> {
        let ladder = Self {
            bands,
            top: top.into(),
        };
        ladder.validate()?;
        Ok(ladder)
    }

    /// LOW below 6000, MID below 7000, HIGH otherwise
    pub fn standard() -> Self {
        Self {
            bands: vec![
                Band {
                    below: 6000,
                    label: "LOW".to_string(),
                },
                Band {
                    below: 7000,
                    label: "MID".to_string(),
                },
            ],
            top: "HIGH".to_string(),
        }
    }

    /// Checks ladder shape. Deserialized ladders should be validated before use.
    pub fn validate(&self) -> EngineResult<()> {
        if self.top.trim().is_empty() {
            return Err(EngineError::invalid_config("band ladder top label is empty"));
        }
        for band in &self.bands {
            if band.label.trim().is_empty() {
                return Err(EngineError::invalid_config(format!(
                    "band below {} has an empty label",
                    band.below
                )));
            }
        }
        for pair in self.bands.windows(2) {
            if pair[0].below >= pair[1].below {
                return Err(EngineError::invalid_config(format!(
                    "band bounds must ascend: {} then {}",
                    pair[0].below, pair[1].below
                )));
            }
        }
        Ok(())
    }

    /// Returns the label for a value
    pub fn classify(&self, value: i64) -> &str {
        self.bands
            .iter()
            .find(|band| value < band.below)
            .map(|band| band.label.as_str())
            .unwrap_or(self.top.as_str())
    }

    /// Returns a borrowing salary band extractor for grouping
    pub fn key_fn(&self) -> impl Fn(&Record) -> String + '_ {
        move |record: &Record| self.classify(record.salary()).to_string()
    }

    /// Returns every label, lowest band first
    pub fn labels(&self) -> Vec<&str> {
        self.bands
            .iter()
            .map(|band| band.label.as_str())
            .chain(std::iter::once(self.top.as_str()))
            .collect()
    }
}

/// Parses a record's identifier as an integer.
///
/// Sequence operators that sort by this key drop failing records and report
/// them as exclusions instead of returning this error.
pub fn parse_numeric_id(record: &Record) -> EngineResult<i64> {
    record
        .id()
        .parse::<i64>()
        .map_err(|e| EngineError::UnparseableKey {
            id: record.id().to_string(),
            reason: e.to_string(),
        })
}
