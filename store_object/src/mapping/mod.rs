//! Class-level mapping metadata
//!
//! This module resolves which properties are stored in which columns and
//! which of those columns identify a row.

pub mod column_mapping;
pub mod primary_key;

pub use column_mapping::{ColumnMapping, ColumnTarget};
pub use primary_key::{PrimaryKey, PrimaryKeyColumns, CONVENTIONAL_PRIMARY_KEY};
