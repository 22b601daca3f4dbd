//! Stored row representation
//!
//! This module provides the row identifier handle and the raw row value
//! handed over by the store access layer.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::{self, Display};
use type_mapping::StoreValue;

/// Column alias under which `SELECT` statements return the row identifier
pub const ROW_ID_COLUMN: &str = "__rowid__";

/// The store's internal address of a row, distinct from any primary key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RowId(i64);

impl RowId {
    /// Row not (yet) known to the store
    pub const UNSET: RowId = RowId(-1);

    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    pub const fn get(self) -> i64 {
        self.0
    }

    pub const fn is_set(self) -> bool {
        self.0 != Self::UNSET.0
    }
}

impl Default for RowId {
    fn default() -> Self {
        Self::UNSET
    }
}

impl From<i64> for RowId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One physical row: raw values by column name plus its row identifier
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreRow {
    values: HashMap<String, StoreValue>,
    row_id: RowId,
}

impl StoreRow {
    pub fn new(row_id: RowId) -> Self {
        Self {
            values: HashMap::new(),
            row_id,
        }
    }

    /// Add a column value
    pub fn with_value(mut self, column: &str, value: impl Into<StoreValue>) -> Self {
        self.insert(column, value);
        self
    }

    pub fn insert(&mut self, column: &str, value: impl Into<StoreValue>) {
        self.values.insert(column.to_string(), value.into());
    }

    /// Exact, case-sensitive lookup
    pub fn get(&self, column: &str) -> Option<&StoreValue> {
        self.values.get(column)
    }

    /// Remove and return a column value
    pub fn take(&mut self, column: &str) -> Option<StoreValue> {
        self.values.remove(column)
    }

    pub fn row_id(&self) -> RowId {
        self.row_id
    }

    pub fn set_row_id(&mut self, row_id: RowId) {
        self.row_id = row_id;
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
