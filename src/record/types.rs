//! Record type definitions
//!
//! A record is one immutable row of employee-style tabular data. Fields are
//! private; the engine reads them through accessors only. "Updates" build a
//! new record.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One immutable row
///
/// Equality and hashing are structural over every field, which is what
/// value-based deduplication relies on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Record {
    /// Identifier, unique within a collection by convention only
    #[serde(rename = "empId")]
    id: String,
    /// Display name
    name: String,
    /// Contact address
    email: String,
    /// Grouping dimension
    department: String,
    /// Ordering and aggregation field
    salary: i64,
}

impl Record {
    /// Creates a new record
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        department: impl Into<String>,
        salary: i64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            department: department.into(),
            salary,
        }
    }

    /// Returns the identifier
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the email address
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the department
    pub fn department(&self) -> &str {
        &self.department
    }

    /// Returns the salary
    pub fn salary(&self) -> i64 {
        self.salary
    }

    /// Returns a copy of this record with a different salary.
    pub fn with_salary(&self, salary: i64) -> Self {
        Self {
            salary,
            ..self.clone()
        }
    }

    /// Returns a copy with the salary raised by `percent`.
    ///
    /// The new salary is rounded half up to the nearest whole unit.
    pub fn with_raise_percent(&self, percent: f64) -> Self {
        let raised = self.salary as f64 * (1.0 + percent / 100.0);
        self.with_salary((raised + 0.5).floor() as i64)
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} - {} - {}",
            self.id, self.name, self.department, self.salary
        )
    }
}

/// Applies a percentage raise to every record, leaving the input untouched.
pub fn raise_all(records: &[Record], percent: f64) -> Vec<Record> {
    records
        .iter()
        .map(|r| r.with_raise_percent(percent))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn john() -> Record {
        Record::new("1", "John", "john@dxc.com", "IT", 5000)
    }

    #[test]
    fn test_accessors() {
        let r = john();
        assert_eq!(r.id(), "1");
        assert_eq!(r.name(), "John");
        assert_eq!(r.email(), "john@dxc.com");
        assert_eq!(r.department(), "IT");
        assert_eq!(r.salary(), 5000);
    }

    #[test]
    fn test_structural_equality() {
        assert_eq!(john(), john());
        assert_ne!(john(), john().with_salary(5001));
    }

    #[test]
    fn test_with_salary_leaves_original() {
        let r = john();
        let bumped = r.with_salary(9000);
        assert_eq!(r.salary(), 5000);
        assert_eq!(bumped.salary(), 9000);
        assert_eq!(bumped.id(), r.id());
    }

    #[test]
    fn test_raise_percent_rounds_half_up() {
        // 4805 * 1.1 = 5285.5
        let r = Record::new("6", "Frank", "frank@dxc.com", "Operations", 4805);
        assert_eq!(r.with_raise_percent(10.0).salary(), 5286);
        assert_eq!(john().with_raise_percent(10.0).salary(), 5500);
        assert_eq!(john().with_raise_percent(0.0).salary(), 5000);

        // Exact halves: 121 * 1.5 = 181.5, -121 * 1.5 = -181.5
        let up = Record::new("7", "Pos", "pos@dxc.com", "IT", 121);
        assert_eq!(up.with_raise_percent(50.0).salary(), 182);
        let down = Record::new("8", "Neg", "neg@dxc.com", "IT", -121);
        assert_eq!(down.with_raise_percent(50.0).salary(), -181);
    }

    #[test]
    fn test_raise_all_non_mutating() {
        let input = vec![john(), Record::new("2", "Alice", "alice@dxc.com", "HR", 6000)];
        let snapshot = input.clone();
        let raised = raise_all(&input, 10.0);
        assert_eq!(input, snapshot);
        assert_eq!(raised[0].salary(), 5500);
        assert_eq!(raised[1].salary(), 6600);
    }

    #[test]
    fn test_display() {
        assert_eq!(john().to_string(), "1 - John - IT - 5000");
    }

    #[test]
    fn test_deserialize_from_payload() {
        let payload = json!({
            "empId": "7",
            "name": "Grace",
            "email": "grace@dxc.com",
            "department": "HR",
            "salary": 6200
        });
        let r: Record = serde_json::from_value(payload).unwrap();
        assert_eq!(r, Record::new("7", "Grace", "grace@dxc.com", "HR", 6200));
    }
}
