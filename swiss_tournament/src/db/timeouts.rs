//! Store call deadlines.
//!
//! Every PostgreSQL call goes through one of these wrappers. A stalled
//! connection becomes `StoreTimeout` and a driver error becomes
//! `StoreUnavailable`, so callers only ever see `TournamentError`.

use std::future::Future;
use std::time::Duration;
use tokio::time::timeout;

use crate::tournament::{TournamentError, TournamentResult};

/// Deadline for single statements (5 seconds)
pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(5);

/// Deadline for committing a transaction (10 seconds)
pub const DEFAULT_TRANSACTION_TIMEOUT: Duration = Duration::from_secs(10);

/// Deadline for schema setup (30 seconds)
pub const SCHEMA_TIMEOUT: Duration = Duration::from_secs(30);

/// Run a store call with a deadline
///
/// # Example
///
/// ```no_run
/// use swiss_tournament::db::timeouts::{bounded, DEFAULT_QUERY_TIMEOUT};
/// # use sqlx::PgPool;
/// # async fn example(pool: &PgPool) -> swiss_tournament::TournamentResult<()> {
///
/// let row = bounded(
///     DEFAULT_QUERY_TIMEOUT,
///     sqlx::query("SELECT playername FROM players WHERE id = $1")
///         .bind(1)
///         .fetch_one(pool)
/// ).await?;
///
/// # Ok(())
/// # }
/// ```
pub async fn bounded<F, T>(deadline: Duration, store_call: F) -> TournamentResult<T>
where
    F: Future<Output = Result<T, sqlx::Error>>,
{
    match timeout(deadline, store_call).await {
        Ok(result) => result.map_err(TournamentError::StoreUnavailable),
        Err(_) => {
            log::warn!("Store call exceeded {deadline:?}");
            Err(TournamentError::StoreTimeout(deadline))
        }
    }
}

/// Run a single statement with the default 5 second deadline
pub async fn bounded_query<F, T>(store_call: F) -> TournamentResult<T>
where
    F: Future<Output = Result<T, sqlx::Error>>,
{
    bounded(DEFAULT_QUERY_TIMEOUT, store_call).await
}
