//! Model declaration contract
//!
//! This module defines the trait every mapped model implements.

use crate::row::RowId;
use crate::transform::ValueTransformer;
use thiserror::Error;
use type_mapping::{ConversionError, StoreValue};

/// One declared property of a model, in declaration order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyDef {
    /// Property key (field name)
    pub key: &'static str,
    /// SQL type inferred from the property's Rust type
    pub sql_type: &'static str,
}

impl PropertyDef {
    pub const fn new(key: &'static str, sql_type: &'static str) -> Self {
        Self { key, sql_type }
    }
}

/// Class-level override for where a property is stored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnOverride {
    /// Store the property under a differently named column
    Column(&'static str),
    /// Do not store the property at all
    Omit,
}

/// Failure reading or writing a property by key
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PropertyError {
    #[error("unknown property '{0}'")]
    Unknown(String),

    #[error(transparent)]
    Conversion(#[from] ConversionError),
}

/// Metadata and property access for a model mapped to a table.
///
/// This trait should be derived using the `#[model]` attribute macro, which
/// generates the property list and the accessors from the struct fields:
///
/// ```ignore
/// use rowhaus::prelude::*;
///
/// #[model]
/// #[table(name = "users")]
/// pub struct User {
///     #[primary_key]
///     pub id: Option<i64>,
///
///     #[column(name = "user_name")]
///     pub name: String,
///
///     #[column(omit)]
///     pub session_token: Option<String>,
///
///     #[row_id]
///     pub row_id: RowId,
/// }
/// ```
///
/// The associated functions with default bodies are the optional overrides;
/// they are read once, when the model's descriptor is resolved.
pub trait TableModel: Default + 'static {
    /// The table name in the database
    fn table_name() -> &'static str;

    /// Every property key of the model, in declaration order
    fn properties() -> &'static [PropertyDef];

    /// Properties stored under another column name, or not stored at all.
    /// Properties not listed here are stored under their own name.
    fn columns_by_property_key() -> Vec<(&'static str, ColumnOverride)> {
        Vec::new()
    }

    /// SQL types to use in `CREATE TABLE` instead of the inferred ones
    fn column_types_by_property_key() -> Vec<(&'static str, &'static str)> {
        Vec::new()
    }

    /// Property keys that identify a row. Empty means "use the `id` property".
    fn primary_keys() -> Vec<&'static str> {
        Vec::new()
    }

    /// Value transformers applied between the store and the property
    fn value_transformers() -> Vec<(&'static str, ValueTransformer)> {
        Vec::new()
    }

    /// Read a property as a store value
    fn property(&self, key: &str) -> Result<StoreValue, PropertyError>;

    /// Write a property from a store value
    fn set_property(&mut self, key: &str, value: StoreValue) -> Result<(), PropertyError>;

    fn row_id(&self) -> RowId;

    fn set_row_id(&mut self, row_id: RowId);
}
