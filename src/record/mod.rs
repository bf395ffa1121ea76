//! Record model
//!
//! Defines the row shape every operator works on. Records are immutable;
//! transformations return new instances.

mod builder;
mod types;

pub use builder::RecordBuilder;
pub use types::{raise_all, Record};
