//! Tournament module for Swiss-system play.
//!
//! This module provides:
//! - Player registration and bulk removal
//! - A win/match ledger per player
//! - Standings ranked by wins
//! - Next-round pairings by adjacent rank
//!
//! ## Example
//!
//! ```no_run
//! use swiss_tournament::db::Database;
//! use swiss_tournament::tournament::TournamentManager;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::new(&Default::default()).await?;
//!     let tournament = TournamentManager::new(Arc::new(db.player_repository()));
//!
//!     let alice = tournament.register_player("Alice").await?;
//!     let bob = tournament.register_player("Bob").await?;
//!     tournament.report_match(alice, bob).await?;
//!
//!     for pairing in tournament.swiss_pairings().await? {
//!         println!("{} vs {}", pairing.name1, pairing.name2);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod manager;
pub mod models;
pub mod pairing;

pub use errors::{TournamentError, TournamentResult};
pub use manager::TournamentManager;
pub use models::{Pairing, PlayerId, PlayerStanding};
