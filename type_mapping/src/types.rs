//! Store value definitions
//!
//! This module provides the raw value model of the row store
//! (SQLite storage classes) and basic conversions into it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A raw value as held by one column of a stored row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StoreValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

/// Storage class of a [`StoreValue`], used to report expected/found kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueKind {
    Null,
    Integer,
    Real,
    Text,
    Blob,
}

impl StoreValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            StoreValue::Null => ValueKind::Null,
            StoreValue::Integer(_) => ValueKind::Integer,
            StoreValue::Real(_) => ValueKind::Real,
            StoreValue::Text(_) => ValueKind::Text,
            StoreValue::Blob(_) => ValueKind::Blob,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, StoreValue::Null)
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            StoreValue::Integer(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            StoreValue::Text(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Null => "NULL",
            ValueKind::Integer => "INTEGER",
            ValueKind::Real => "REAL",
            ValueKind::Text => "TEXT",
            ValueKind::Blob => "BLOB",
        };
        f.write_str(name)
    }
}

impl From<String> for StoreValue {
    fn from(val: String) -> Self {
        StoreValue::Text(val)
    }
}

impl From<&str> for StoreValue {
    fn from(val: &str) -> Self {
        StoreValue::Text(val.to_string())
    }
}

impl From<i64> for StoreValue {
    fn from(val: i64) -> Self {
        StoreValue::Integer(val)
    }
}

impl From<i32> for StoreValue {
    fn from(val: i32) -> Self {
        StoreValue::Integer(val as i64)
    }
}

impl From<f64> for StoreValue {
    fn from(val: f64) -> Self {
        StoreValue::Real(val)
    }
}

impl From<bool> for StoreValue {
    fn from(val: bool) -> Self {
        StoreValue::Integer(val as i64)
    }
}

impl From<Vec<u8>> for StoreValue {
    fn from(val: Vec<u8>) -> Self {
        StoreValue::Blob(val)
    }
}

impl<T> From<Option<T>> for StoreValue
where
    T: Into<StoreValue>,
{
    fn from(val: Option<T>) -> Self {
        match val {
            Some(v) => v.into(),
            None => StoreValue::Null,
        }
    }
}
