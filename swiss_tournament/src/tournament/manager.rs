//! Tournament manager: player registry, score ledger, standings and pairings.

use super::errors::{TournamentError, TournamentResult};
use super::models::{Pairing, PlayerId, PlayerStanding};
use super::pairing;
use crate::db::PlayerRepository;
use std::sync::Arc;

/// Tournament manager
///
/// Holds no state of its own; every call goes to the injected repository.
#[derive(Clone)]
pub struct TournamentManager {
    repo: Arc<dyn PlayerRepository>,
}

impl TournamentManager {
    /// Create a new tournament manager over `repo`
    pub fn new(repo: Arc<dyn PlayerRepository>) -> Self {
        Self { repo }
    }

    /// Zero every player's score and match count
    ///
    /// Players stay registered. Idempotent.
    pub async fn reset_scores(&self) -> TournamentResult<()> {
        self.repo.reset_all().await?;
        log::info!("Reset all scores");
        Ok(())
    }

    /// Remove every player
    ///
    /// Previously issued IDs become invalid.
    pub async fn clear_players(&self) -> TournamentResult<()> {
        self.repo.delete_all().await?;
        log::info!("Cleared all players");
        Ok(())
    }

    /// Number of registered players
    pub async fn count_players(&self) -> TournamentResult<usize> {
        self.repo.count().await
    }

    /// Register a player and return their store-generated ID
    ///
    /// Names need not be unique, but must contain something other than
    /// whitespace. Surrounding whitespace is trimmed.
    pub async fn register_player(&self, name: &str) -> TournamentResult<PlayerId> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TournamentError::InvalidName);
        }

        let id = self.repo.insert(name).await?;
        log::info!("Registered player {id} ({name})");
        Ok(id)
    }

    /// Current standings, score descending, ties by ID ascending
    pub async fn standings(&self) -> TournamentResult<Vec<PlayerStanding>> {
        self.repo.list_by_score().await
    }

    /// Record that `winner` beat `loser`
    ///
    /// # Errors
    ///
    /// * `SelfMatch` if both IDs are the same
    /// * `PlayerNotFound` if either ID is unknown; no counters change
    pub async fn report_match(&self, winner: PlayerId, loser: PlayerId) -> TournamentResult<()> {
        if winner == loser {
            return Err(TournamentError::SelfMatch(winner));
        }

        match self.repo.record_result(winner, loser).await {
            Ok(()) => {
                log::debug!("Recorded match: {winner} beat {loser}");
                Ok(())
            }
            Err(TournamentError::PlayerNotFound(id)) => {
                log::warn!("Match {winner} vs {loser} rejected: unknown player {id}");
                Err(TournamentError::PlayerNotFound(id))
            }
            Err(e) => Err(e),
        }
    }

    /// Pair players for the next round by adjacent rank
    ///
    /// # Errors
    ///
    /// * `OddPlayerCount` if the number of registered players is odd
    pub async fn swiss_pairings(&self) -> TournamentResult<Vec<Pairing>> {
        let standings = self.standings().await?;

        pairing::pair_adjacent(&standings).inspect_err(|e| {
            log::warn!("Pairing failed: {e}");
        })
    }
}
