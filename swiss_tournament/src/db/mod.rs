//! Database module providing PostgreSQL connection pooling and utilities.
//!
//! This module manages the database connection pool using sqlx and the
//! repository abstraction the tournament manager talks to.

use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

pub mod config;
pub mod repository;
pub mod timeouts;

pub use config::{ConfigError, DatabaseConfig};
pub use repository::{InMemoryPlayerRepository, PgPlayerRepository, PlayerRepository};

use crate::tournament::TournamentResult;

/// DDL for the `players` table
pub const SCHEMA: &str = include_str!("schema.sql");

/// Database connection pool wrapper
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create a new database connection pool
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use swiss_tournament::db::{Database, DatabaseConfig};
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let config = DatabaseConfig::from_env()?;
    ///     let db = Database::new(&config).await?;
    ///     db.ensure_schema().await?;
    ///     Ok(())
    /// }
    /// ```
    pub async fn new(config: &DatabaseConfig) -> TournamentResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout_secs))
            .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
            .max_lifetime(Duration::from_secs(config.max_lifetime_secs))
            .connect(&config.database_url)
            .await?;

        log::debug!("Connected to {}", redact_url(&config.database_url));
        Ok(Self { pool })
    }

    /// Build a PostgreSQL player repository sharing this pool
    pub fn player_repository(&self) -> PgPlayerRepository {
        PgPlayerRepository::new(self.pool.clone())
    }

    /// Create the `players` table if it does not exist yet
    pub async fn ensure_schema(&self) -> TournamentResult<()> {
        timeouts::bounded(timeouts::SCHEMA_TIMEOUT, sqlx::query(SCHEMA).execute(&self.pool))
            .await?;
        log::info!("Players table is ready");
        Ok(())
    }

    /// Check if the database connection is healthy
    pub async fn health_check(&self) -> TournamentResult<()> {
        timeouts::bounded_query(sqlx::query("SELECT 1").execute(&self.pool)).await?;
        Ok(())
    }

    /// Close the database connection pool
    pub async fn close(self) {
        self.pool.close().await;
    }
}

/// Strip the password from a connection URL before logging it
pub fn redact_url(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => {
            let credentials = &url[scheme_end + 3..at];
            match credentials.split_once(':') {
                Some((user, _)) => format!("{}{}:***{}", &url[..scheme_end + 3], user, &url[at..]),
                None => url.to_string(),
            }
        }
        _ => url.to_string(),
    }
}
