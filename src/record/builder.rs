//! Incremental record construction

use super::types::Record;
use crate::errors::{EngineError, EngineResult};

/// Builds a [`Record`] field by field
///
/// Only the identifier is mandatory. Text fields default to empty and the
/// salary to zero.
#[derive(Debug, Clone, Default)]
pub struct RecordBuilder {
    id: Option<String>,
    name: String,
    email: String,
    department: String,
    salary: i64,
}

impl RecordBuilder {
    /// Creates an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the identifier
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets the display name
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the email address
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    /// Sets the department
    pub fn department(mut self, department: impl Into<String>) -> Self {
        self.department = department.into();
        self
    }

    /// Sets the salary
    pub fn salary(mut self, salary: i64) -> Self {
        self.salary = salary;
        self
    }

    /// Finishes the record.
    ///
    /// Fails if no identifier was given or the identifier is blank.
    pub fn build(self) -> EngineResult<Record> {
        let id = match self.id {
            Some(id) if !id.trim().is_empty() => id,
            _ => return Err(EngineError::invalid_config("record identifier is required")),
        };
        Ok(Record::new(
            id,
            self.name,
            self.email,
            self.department,
            self.salary,
        ))
    }
}
