//! Predicate evaluation against records
//!
//! No type coercion: a number never matches a text field and a string never
//! matches salary. Validated queries cannot reach those arms.

use std::cmp::Ordering;

use serde_json::Value;

use super::query::{FilterOp, Predicate};
use crate::keys::FieldValue;
use crate::record::Record;

/// Evaluates predicates against records
pub struct PredicateFilter;

impl PredicateFilter {
    /// Checks if a record matches all predicates
    pub fn matches(record: &Record, predicates: &[Predicate]) -> bool {
        predicates
            .iter()
            .all(|pred| Self::matches_predicate(record, pred))
    }

    fn matches_predicate(record: &Record, predicate: &Predicate) -> bool {
        let ordering = match Self::compare(predicate.field.value(record), &predicate.value) {
            Some(o) => o,
            None => return false,
        };

        match predicate.op {
            FilterOp::Eq => ordering == Ordering::Equal,
            FilterOp::Ne => ordering != Ordering::Equal,
            FilterOp::Gt => ordering == Ordering::Greater,
            FilterOp::Gte => ordering != Ordering::Less,
            FilterOp::Lt => ordering == Ordering::Less,
            FilterOp::Lte => ordering != Ordering::Greater,
        }
    }

    /// Orders the record's value against the bound, if comparable
    fn compare(actual: FieldValue<'_>, bound: &Value) -> Option<Ordering> {
        match (actual, bound) {
            (FieldValue::Int(a), Value::Number(b)) => b.as_i64().map(|b| a.cmp(&b)),
            (FieldValue::Text(a), Value::String(b)) => Some(a.cmp(b.as_str())),
            _ => None,
        }
    }
}
