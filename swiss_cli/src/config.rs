//! CLI configuration management.
//!
//! Consolidates environment variable reads and command-line overrides into a
//! validated configuration.

use swiss_tournament::db::{ConfigError, DatabaseConfig};

/// Complete CLI configuration
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Database configuration, `None` when running against the in-memory store
    pub database: Option<DatabaseConfig>,
    /// Print results as JSON instead of tables
    pub json: bool,
}

impl CliConfig {
    /// Load configuration from environment variables
    ///
    /// # Arguments
    ///
    /// * `database_url_override` - Optional database URL (from `--db-url`)
    /// * `in_memory` - Skip the database entirely (from `--in-memory`)
    /// * `json` - JSON output (from `--json`)
    ///
    /// # Errors
    ///
    /// Returns error if no database URL is available or a pool setting is invalid
    pub fn from_env(
        database_url_override: Option<String>,
        in_memory: bool,
        json: bool,
    ) -> Result<Self, ConfigError> {
        if in_memory {
            return Ok(Self {
                database: None,
                json,
            });
        }

        let database_url = database_url_override
            .or_else(|| std::env::var("DATABASE_URL").ok())
            .ok_or_else(|| ConfigError::MissingRequired {
                var: "DATABASE_URL".to_string(),
                hint: "Pass --db-url, set DATABASE_URL, or use --in-memory".to_string(),
            })?;

        if !database_url.starts_with("postgres://") && !database_url.starts_with("postgresql://") {
            return Err(ConfigError::Invalid {
                var: "DATABASE_URL".to_string(),
                reason: "Must be a postgres:// connection string".to_string(),
            });
        }

        let database = DatabaseConfig::with_url(database_url).apply_env()?;

        Ok(Self {
            database: Some(database),
            json,
        })
    }
}
