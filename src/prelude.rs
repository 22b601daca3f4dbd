//! Convenience re-exports for common RowHaus usage
//!
//! This prelude module re-exports the most commonly used items from the RowHaus ecosystem,
//! making it easier to import everything you need with a single use statement.
//!
//! # Example
//!
//! ```rust
//! use rowhaus::prelude::*;
//!
//! // Now you have access to all the common RowHaus types and traits
//! ```

// Core RowHaus components
pub use crate::core::RowHaus;
pub use crate::errors::RowHausError;

// Re-export centralized config
pub use config::{AdapterConfig, AppConfig, DatabaseConfig, PlaceholderStyle};

// Re-export commonly used store-object types for convenience
pub use store_object::prelude::*;

// Re-export store_object module for macro-generated code
pub use store_object;

// Re-export table derive for model creation
pub use table_derive::{TableModel, model};

// Common external dependencies
pub use sqlx;
pub use tokio;

// Commonly used sqlx types
pub use sqlx::{Row, SqlitePool};
