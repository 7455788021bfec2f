//! Tournament error types.

use std::time::Duration;

use thiserror::Error;

use super::models::PlayerId;

/// Tournament errors
#[derive(Debug, Error)]
pub enum TournamentError {
    /// A supplied player ID does not reference an existing player
    #[error("Player not found: {0}")]
    PlayerNotFound(PlayerId),

    /// Connectivity or transaction failure against the backing store
    #[error("Store unavailable: {0}")]
    StoreUnavailable(#[from] sqlx::Error),

    /// Store did not answer in time
    #[error("Store operation timed out after {0:?}")]
    StoreTimeout(Duration),

    /// Pairing requires an even number of players
    #[error("Cannot pair an odd number of players: {0}")]
    OddPlayerCount(usize),

    /// Winner and loser are the same player
    #[error("Player {0} cannot play a match against themselves")]
    SelfMatch(PlayerId),

    /// Player name is empty or whitespace
    #[error("Player name must not be empty")]
    InvalidName,
}

impl TournamentError {
    /// Whether this error comes from the store rather than from the caller
    pub fn is_store_unavailable(&self) -> bool {
        matches!(
            self,
            TournamentError::StoreUnavailable(_) | TournamentError::StoreTimeout(_)
        )
    }

    /// Get a client-safe error message
    ///
    /// Store errors are sanitized so SQL details and connection strings are
    /// not shown to end users.
    pub fn client_message(&self) -> String {
        match self {
            TournamentError::StoreUnavailable(_) | TournamentError::StoreTimeout(_) => {
                "Tournament store is unavailable".to_string()
            }
            _ => self.to_string(),
        }
    }
}

/// Result type for tournament operations
pub type TournamentResult<T> = Result<T, TournamentError>;
