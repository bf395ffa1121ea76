//! Delimited text rendering
//!
//! Column order: id, name, email, department, salary, separated by `,`.
//!
//! Escaping rule: a text field containing `,`, `"`, `\r` or `\n` is wrapped
//! in double quotes and every `"` inside it is doubled. Other fields are
//! written verbatim. This matches RFC 4180 quoting; no parser is provided.

use std::borrow::Cow;

use crate::keys::Field;
use crate::record::Record;

/// Column order of [`to_csv_line`]
pub const CSV_COLUMNS: [Field; 5] = [
    Field::Id,
    Field::Name,
    Field::Email,
    Field::Department,
    Field::Salary,
];

const DELIMITER: char = ',';

/// Quotes a text field if it would otherwise break the line
pub fn escape_field(value: &str) -> Cow<'_, str> {
    let needs_quoting = value
        .chars()
        .any(|c| c == DELIMITER || c == '"' || c == '\r' || c == '\n');
    if !needs_quoting {
        return Cow::Borrowed(value);
    }
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        if c == '"' {
            out.push('"');
        }
        out.push(c);
    }
    out.push('"');
    Cow::Owned(out)
}

/// Header line naming the columns
pub fn csv_header() -> String {
    CSV_COLUMNS
        .iter()
        .map(Field::as_str)
        .collect::<Vec<_>>()
        .join(",")
}

/// Renders one record as a delimited line (no trailing newline)
pub fn to_csv_line(record: &Record) -> String {
    CSV_COLUMNS
        .iter()
        .map(|field| escape_field(&field.value(record).to_string()).into_owned())
        .collect::<Vec<_>>()
        .join(",")
}

/// Renders each record as a line, in input order
pub fn to_csv_lines<'a, I>(records: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a Record>,
{
    records.into_iter().map(to_csv_line).collect()
}

/// Joins one field of every record with `separator`, unescaped
pub fn join_field<'a, I>(records: I, field: Field, separator: &str) -> String
where
    I: IntoIterator<Item = &'a Record>,
{
    records
        .into_iter()
        .map(|r| field.value(r).to_string())
        .collect::<Vec<_>>()
        .join(separator)
}
