//! Error types for the RowHaus crate
//!
//! This module contains all error types that can be returned by RowHaus operations.

use config::ConfigError;
use store_object::AdapterError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RowHausError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Mapping error: {0}")]
    Adapter(#[from] AdapterError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl RowHausError {
    /// Whether the error comes from a broken model declaration
    pub fn is_structural(&self) -> bool {
        matches!(self, Self::Adapter(e) if e.is_structural())
    }
}
