//! # RowHaus
//!
//! An object-row mapping adapter for SQLite: models declare their properties
//! at compile time, the adapter resolves and caches how they map to columns,
//! and every statement is built from that metadata with bound values.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rowhaus::prelude::*;
//!
//! #[model]
//! #[table(name = "users")]
//! pub struct User {
//!     #[primary_key]
//!     pub id: Option<i64>,
//!
//!     pub name: String,
//!
//!     #[column(name = "email_address")]
//!     pub email: String,
//!
//!     #[row_id]
//!     pub row_id: RowId,
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig {
//!         database: DatabaseConfig::in_memory(),
//!         adapter: AdapterConfig::default().with_primary_key_constraint(true),
//!     };
//!
//!     let rowhaus = RowHaus::new(config).await?;
//!     rowhaus.auto_migrate::<User>(true).await?;
//!
//!     let mut user = User {
//!         name: "John Doe".to_string(),
//!         email: "john@example.com".to_string(),
//!         ..User::default()
//!     };
//!     rowhaus.insert(&mut user).await?;
//!     println!("Created user {:?} at row {}", user.id, user.row_id);
//!
//!     let users: Vec<User> = rowhaus.all_objects().await?;
//!     assert_eq!(users.len(), 1);
//!
//!     Ok(())
//! }
//! ```

/// Conditional debug logging macros
/// These macros only compile in code when the `debug-logging` feature is enabled
#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        tracing::trace!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {};
}

pub mod core;
pub mod errors;
pub mod migration;
pub mod persistence;
pub mod prelude;

// Generated model code refers to `::rowhaus::...`
extern crate self as rowhaus;

// Re-export the main public types for convenience
pub use crate::core::RowHaus;
pub use crate::errors::RowHausError;

// Re-export centralized config
pub use config::{AdapterConfig, AppConfig, DatabaseConfig, PlaceholderStyle};

// Re-export internal crates used by macros and public API
// These MUST be public for the generated macro code to work correctly
pub use cache_system;
pub use store_object;
pub use table_derive;
pub use type_mapping;

// Re-export external dependencies used in public API
pub use sqlx;
