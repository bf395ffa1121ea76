//! Minimal structured text rendering
//!
//! Delegates to serde_json, so quotes, backslashes and control characters
//! in text fields are escaped per JSON. Keys: empId, name, email,
//! department, salary.

use crate::errors::EngineResult;
use crate::record::Record;

/// Renders one record as a JSON object
pub fn to_json(record: &Record) -> EngineResult<String> {
    Ok(serde_json::to_string(record)?)
}

/// Renders records as a JSON array, in input order
pub fn to_json_array<'a, I>(records: I) -> EngineResult<String>
where
    I: IntoIterator<Item = &'a Record>,
{
    let refs: Vec<&Record> = records.into_iter().collect();
    Ok(serde_json::to_string(&refs)?)
}
