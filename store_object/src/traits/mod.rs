//! Traits for model mapping
//!
//! This module contains the contract a model type implements so that the
//! adapter can map it to and from table rows.

pub mod table_model;

pub use table_model::{ColumnOverride, PropertyDef, PropertyError, TableModel};
