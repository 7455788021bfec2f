//! # Swiss Tournament
//!
//! Player registry, score ledger and next-round pairings for a Swiss-system
//! tournament, backed by PostgreSQL.
//!
//! Players are ranked by wins and paired with the player adjacent to them in
//! the standings: first with second, third with fourth, and so on. Matches are
//! not stored individually; only each player's win and match counters persist.
//!
//! ## Core Modules
//!
//! - [`tournament`]: Tournament manager, standings and pairing logic
//! - [`db`]: Connection pool, configuration and the player repository
//!
//! ## Example
//!
//! ```
//! use swiss_tournament::{InMemoryPlayerRepository, TournamentManager};
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), swiss_tournament::TournamentError> {
//! let tournament = TournamentManager::new(Arc::new(InMemoryPlayerRepository::new()));
//! let alice = tournament.register_player("Alice").await?;
//! let bob = tournament.register_player("Bob").await?;
//! tournament.report_match(alice, bob).await?;
//!
//! let pairings = tournament.swiss_pairings().await?;
//! assert_eq!(pairings.len(), 1);
//! # Ok(())
//! # }
//! ```

/// Database access: pool, configuration, repository.
pub mod db;
pub use db::{Database, DatabaseConfig, InMemoryPlayerRepository, PgPlayerRepository, PlayerRepository};

/// Tournament logic: standings, ledger and pairings.
pub mod tournament;
pub use tournament::{
    Pairing, PlayerId, PlayerStanding, TournamentError, TournamentManager, TournamentResult,
};
