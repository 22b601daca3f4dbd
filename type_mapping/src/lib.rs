//! Unified value mapping between Rust model properties and the row store
//! This crate provides consistent mapping logic used across the rowhaus ecosystem

pub mod convert;
pub mod sql;
pub mod types;

pub use convert::{ConversionError, FromStoreValue, ToStoreValue};
pub use sql::{is_optional_type, rust_type_to_sqlite_type};
pub use types::{StoreValue, ValueKind};
