//! Field descriptors
//!
//! Statically-typed stand-ins for "read this column". A [`Field`] can be
//! named in serialized configuration and resolved against a record without
//! any reflection.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use crate::record::Record;

/// A record column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Id,
    Name,
    Email,
    Department,
    Salary,
}

impl Field {
    /// Returns the column name used in configuration and headers
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Id => "id",
            Field::Name => "name",
            Field::Email => "email",
            Field::Department => "department",
            Field::Salary => "salary",
        }
    }

    /// Reads this field from a record without allocating
    pub fn value<'a>(&self, record: &'a Record) -> FieldValue<'a> {
        match self {
            Field::Id => FieldValue::Text(record.id()),
            Field::Name => FieldValue::Text(record.name()),
            Field::Email => FieldValue::Text(record.email()),
            Field::Department => FieldValue::Text(record.department()),
            Field::Salary => FieldValue::Int(record.salary()),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A borrowed field value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Int(i64),
}

impl FieldValue<'_> {
    /// Copies the value into an owned key
    pub fn to_owned_key(&self) -> GroupKey {
        match self {
            FieldValue::Text(s) => GroupKey::Text((*s).to_string()),
            FieldValue::Int(n) => GroupKey::Int(*n),
        }
    }
}

impl PartialOrd for FieldValue<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Integers order before text. A single field always yields one variant,
/// so mixed comparisons only matter for hand-built values.
impl Ord for FieldValue<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (FieldValue::Int(a), FieldValue::Int(b)) => a.cmp(b),
            (FieldValue::Text(a), FieldValue::Text(b)) => a.cmp(b),
            (FieldValue::Int(_), FieldValue::Text(_)) => Ordering::Less,
            (FieldValue::Text(_), FieldValue::Int(_)) => Ordering::Greater,
        }
    }
}

impl fmt::Display for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => write!(f, "{}", s),
            FieldValue::Int(n) => write!(f, "{}", n),
        }
    }
}

/// An owned field value, usable as a map key
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GroupKey {
    Int(i64),
    Text(String),
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupKey::Int(n) => write!(f, "{}", n),
            GroupKey::Text(s) => write!(f, "{}", s),
        }
    }
}
