//! Comparator and key builders
//!
//! Builds total orders and grouping keys from record fields:
//! - field descriptors resolvable without reflection
//! - composite comparators with per-key direction
//! - derived keys (salary bands, numeric identifiers)

mod comparator;
mod extractor;
mod field;

pub use comparator::{
    comparing, comparing_desc, comparing_text, then, SortDirection, SortKey, SortSpec,
};
pub use extractor::{parse_numeric_id, Band, BandLadder, KeyExtractor};
pub use field::{Field, FieldValue, GroupKey};
