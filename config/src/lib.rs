//! # Configuration Management for RowHaus
//!
//! This crate provides centralized configuration structures for the RowHaus
//! components: the SQLite connection used by the store access layer and the
//! statement-rendering options of the mapping adapter.
//!
//! ## Quick Start
//!
//! ### Programmatic Configuration
//! ```rust
//! use config::{AdapterConfig, DatabaseConfig, PlaceholderStyle};
//!
//! let db_config = DatabaseConfig::new("sqlite://app.db".to_string(), 1, 5, 30, 600, 3600);
//!
//! let adapter_config = AdapterConfig::default()
//!     .with_placeholder_style(PlaceholderStyle::Numbered)
//!     .with_primary_key_constraint(true);
//! ```
//!
//! ### TOML File Configuration
//! ```toml
//! [database]
//! url = "sqlite://app.db"
//! min_connections = 1
//! max_connections = 5
//! connection_timeout_seconds = 30
//! idle_timeout_seconds = 600
//! max_lifetime_seconds = 3600
//!
//! [adapter]
//! placeholder_style = "question"   # question | numbered | named
//! create_if_not_exists = true
//! primary_key_constraint = true
//! ```
//!
//! Load configuration:
//! ```rust,no_run
//! use config::AppConfig;
//!
//! // Load from rowhaus.toml (or the path in ROWHAUS_CONFIG)
//! let config = AppConfig::load()?;
//!
//! // Or load from custom path
//! let config = AppConfig::from_file("config/production.toml")?;
//! # Ok::<(), config::ConfigError>(())
//! ```

use serde::{Deserialize, Serialize};
use std::{env, path::Path};
use thiserror::Error;

const DEFAULT_CONFIG_PATH: &str = "./rowhaus.toml";
const CONFIG_PATH_ENV: &str = "ROWHAUS_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Dotenvy error: {0}")]
    Dotenvy(#[from] dotenvy::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    #[serde(default)]
    pub adapter: AdapterConfig,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub min_connections: u32,
    pub max_connections: u32,
    pub connection_timeout_seconds: u64,
    pub idle_timeout_seconds: u64,
    /// 0 disables the lifetime limit
    #[serde(default)]
    pub max_lifetime_seconds: u64,
}

/// How bound values are referenced from generated SQL
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaceholderStyle {
    /// `?`
    #[default]
    Question,
    /// `?1`, `?2`, ...
    Numbered,
    /// `:column`
    Named,
}

/// Statement rendering options of the mapping adapter
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdapterConfig {
    pub placeholder_style: PlaceholderStyle,
    /// Emit `CREATE TABLE IF NOT EXISTS`
    pub create_if_not_exists: bool,
    /// Declare the primary key columns in `CREATE TABLE`
    pub primary_key_constraint: bool,
}

impl AppConfig {
    /// Load configuration from the TOML file named in `.env`/environment or the default path
    pub fn load() -> Result<Self, ConfigError> {
        // A missing .env file is fine; a malformed one is not
        match dotenvy::dotenv() {
            Ok(_) => {}
            Err(e) if e.not_found() => {}
            Err(e) => return Err(e.into()),
        }

        let config = if let Ok(config_path) = env::var(CONFIG_PATH_ENV) {
            Self::from_file(&config_path)
        } else if Path::new(DEFAULT_CONFIG_PATH).exists() {
            Self::from_file(DEFAULT_CONFIG_PATH)
        } else {
            Err(ConfigError::Invalid(format!(
                "Config path must be specified as {} or in {} file",
                CONFIG_PATH_ENV, DEFAULT_CONFIG_PATH
            )))
        }?;

        Ok(config)
    }

    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    fn validate(&self) -> Result<(), ConfigError> {
        if self.database.url.is_empty() {
            return Err(ConfigError::Invalid(
                "Database url cannot be empty".to_string(),
            ));
        }
        if self.database.min_connections == 0 {
            return Err(ConfigError::Invalid(
                "Database min_connections must be greater than 0".to_string(),
            ));
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::Invalid(
                "Database max_connections must be greater than 0".to_string(),
            ));
        }
        if self.database.min_connections > self.database.max_connections {
            return Err(ConfigError::Invalid(
                "Database min_connections cannot be greater than max_connections".to_string(),
            ));
        }
        if self.database.connection_timeout_seconds == 0 {
            return Err(ConfigError::Invalid(
                "Database connection_timeout_seconds must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

impl DatabaseConfig {
    /// Create a new database configuration
    pub fn new(
        url: String,
        min_connections: u32,
        max_connections: u32,
        connection_timeout_seconds: u64,
        idle_timeout_seconds: u64,
        max_lifetime_seconds: u64,
    ) -> Self {
        Self {
            url,
            min_connections,
            max_connections,
            connection_timeout_seconds,
            idle_timeout_seconds,
            max_lifetime_seconds,
        }
    }

    /// Single-connection in-memory database, mostly for tests
    pub fn in_memory() -> Self {
        Self::new("sqlite::memory:".to_string(), 1, 1, 30, 600, 0)
    }
}

impl AdapterConfig {
    pub fn with_placeholder_style(mut self, style: PlaceholderStyle) -> Self {
        self.placeholder_style = style;
        self
    }

    pub fn with_create_if_not_exists(mut self, enabled: bool) -> Self {
        self.create_if_not_exists = enabled;
        self
    }

    pub fn with_primary_key_constraint(mut self, enabled: bool) -> Self {
        self.primary_key_constraint = enabled;
        self
    }
}
