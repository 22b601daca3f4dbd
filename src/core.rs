//! Core RowHaus functionality
//!
//! This module contains the main RowHaus struct, which owns the SQLite
//! connection pool and the mapping adapter used to talk to it.

use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use std::time::Duration;
use store_object::Adapter;

use crate::errors::RowHausError;
use config::{AdapterConfig, AppConfig, ConfigError, PlaceholderStyle};

/// Main RowHaus coordinator that manages the database connection and the adapter
#[derive(Debug, Clone)]
pub struct RowHaus {
    pool: SqlitePool,
    adapter: Adapter,
}

impl RowHaus {
    /// Create new RowHaus with a database connection
    pub async fn new(config: AppConfig) -> Result<Self, RowHausError> {
        check_adapter_config(&config.adapter)?;
        let database = &config.database;

        let mut pool_options = SqlitePoolOptions::new()
            .max_connections(database.max_connections)
            .min_connections(database.min_connections)
            .acquire_timeout(Duration::from_secs(database.connection_timeout_seconds));

        if database.idle_timeout_seconds > 0 {
            pool_options = pool_options.idle_timeout(Duration::from_secs(database.idle_timeout_seconds));
        }

        // Set max lifetime if specified
        if database.max_lifetime_seconds > 0 {
            pool_options =
                pool_options.max_lifetime(Duration::from_secs(database.max_lifetime_seconds));
        }

        let pool = pool_options.connect(&database.url).await?;
        tracing::info!("Connected to {}", database.url);

        Ok(Self {
            pool,
            adapter: Adapter::new(config.adapter),
        })
    }

    /// Wrap an existing pool
    pub fn from_pool(pool: SqlitePool, adapter_config: AdapterConfig) -> Result<Self, RowHausError> {
        check_adapter_config(&adapter_config)?;
        Ok(Self {
            pool,
            adapter: Adapter::new(adapter_config),
        })
    }

    /// Get database pool reference
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn adapter(&self) -> &Adapter {
        &self.adapter
    }

    /// Check database connection health
    pub async fn health_check(&self) -> Result<(), RowHausError> {
        sqlx::query("SELECT 1").fetch_one(&self.pool).await?;
        Ok(())
    }
}

/// The SQLite driver binds `?` and `?NNN` parameters only
fn check_adapter_config(config: &AdapterConfig) -> Result<(), ConfigError> {
    if config.placeholder_style == PlaceholderStyle::Named {
        return Err(ConfigError::Invalid(
            "named placeholders cannot be executed by the SQLite store".to_string(),
        ));
    }
    Ok(())
}
