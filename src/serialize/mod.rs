//! Flat serialization
//!
//! Renders records for the caller's own transport or storage. Output only;
//! parsing these forms back is out of scope.

mod csv;
mod json;

pub use csv::{csv_header, escape_field, join_field, to_csv_line, to_csv_lines, CSV_COLUMNS};
pub use json::{to_json, to_json_array};
