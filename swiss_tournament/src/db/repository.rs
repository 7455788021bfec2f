//! Repository trait definitions for testability and dependency injection.
//!
//! `PlayerRepository` is the narrow boundary between the tournament manager and
//! the persistent store. The PostgreSQL implementation backs production use;
//! the in-memory one backs tests, benchmarks and throwaway CLI sessions.

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use std::collections::BTreeMap;
use tokio::sync::Mutex;

use super::timeouts::{DEFAULT_TRANSACTION_TIMEOUT, bounded, bounded_query};
use crate::tournament::{PlayerId, PlayerStanding, TournamentError, TournamentResult, pairing};

/// Trait for player store operations
#[async_trait]
pub trait PlayerRepository: Send + Sync {
    /// Set score and matches to 0 for every player
    async fn reset_all(&self) -> TournamentResult<()>;

    /// Delete every player
    async fn delete_all(&self) -> TournamentResult<()>;

    /// Count players
    async fn count(&self) -> TournamentResult<usize>;

    /// Insert a player with zeroed counters, returning the generated ID
    async fn insert(&self, name: &str) -> TournamentResult<PlayerId>;

    /// List all players, score descending then ID ascending
    async fn list_by_score(&self) -> TournamentResult<Vec<PlayerStanding>>;

    /// Credit a win to `winner` and a loss to `loser`, all or nothing
    ///
    /// Fails with `PlayerNotFound` if either ID is unknown.
    async fn record_result(&self, winner: PlayerId, loser: PlayerId) -> TournamentResult<()>;
}

/// Default PostgreSQL implementation of `PlayerRepository`
#[derive(Clone)]
pub struct PgPlayerRepository {
    pool: PgPool,
}

impl PgPlayerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PlayerRepository for PgPlayerRepository {
    async fn reset_all(&self) -> TournamentResult<()> {
        let result = bounded_query(
            sqlx::query("UPDATE players SET score = 0, matches = 0").execute(&self.pool),
        )
        .await?;

        log::debug!("Reset counters on {} players", result.rows_affected());
        Ok(())
    }

    async fn delete_all(&self) -> TournamentResult<()> {
        let result =
            bounded_query(sqlx::query("DELETE FROM players").execute(&self.pool)).await?;

        log::debug!("Deleted {} players", result.rows_affected());
        Ok(())
    }

    async fn count(&self) -> TournamentResult<usize> {
        let row = bounded_query(
            sqlx::query("SELECT count(*) AS total FROM players").fetch_one(&self.pool),
        )
        .await?;

        let total: i64 = row.get("total");
        Ok(usize::try_from(total).unwrap_or_default())
    }

    async fn insert(&self, name: &str) -> TournamentResult<PlayerId> {
        let row = bounded_query(
            sqlx::query(
                "INSERT INTO players (playername, score, matches) VALUES ($1, 0, 0) RETURNING id",
            )
            .bind(name)
            .fetch_one(&self.pool),
        )
        .await?;

        Ok(row.get("id"))
    }

    async fn list_by_score(&self) -> TournamentResult<Vec<PlayerStanding>> {
        let rows = bounded_query(
            sqlx::query(
                "SELECT id, playername, score, matches
                 FROM players
                 ORDER BY score DESC, id ASC",
            )
            .fetch_all(&self.pool),
        )
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| PlayerStanding {
                id: r.get("id"),
                name: r.get("playername"),
                score: r.get("score"),
                matches: r.get("matches"),
            })
            .collect())
    }

    async fn record_result(&self, winner: PlayerId, loser: PlayerId) -> TournamentResult<()> {
        let mut tx = bounded_query(self.pool.begin()).await?;

        let won = bounded_query(
            sqlx::query("UPDATE players SET score = score + 1, matches = matches + 1 WHERE id = $1")
                .bind(winner)
                .execute(&mut *tx),
        )
        .await?;

        // Dropping `tx` without commit rolls back.
        if won.rows_affected() == 0 {
            return Err(TournamentError::PlayerNotFound(winner));
        }

        let lost = bounded_query(
            sqlx::query("UPDATE players SET matches = matches + 1 WHERE id = $1")
                .bind(loser)
                .execute(&mut *tx),
        )
        .await?;

        if lost.rows_affected() == 0 {
            return Err(TournamentError::PlayerNotFound(loser));
        }

        bounded(DEFAULT_TRANSACTION_TIMEOUT, tx.commit()).await?;
        Ok(())
    }
}

/// In-process `PlayerRepository` with store-style generated IDs
///
/// IDs start at 1 and are never reused, even after `delete_all`.
pub struct InMemoryPlayerRepository {
    state: Mutex<MemoryState>,
}

struct MemoryState {
    players: BTreeMap<PlayerId, PlayerStanding>,
    next_id: PlayerId,
}

impl Default for InMemoryPlayerRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryPlayerRepository {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(MemoryState {
                players: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }

    /// Fetch a single player by ID
    pub async fn get(&self, id: PlayerId) -> Option<PlayerStanding> {
        self.state.lock().await.players.get(&id).cloned()
    }
}

#[async_trait]
impl PlayerRepository for InMemoryPlayerRepository {
    async fn reset_all(&self) -> TournamentResult<()> {
        let mut state = self.state.lock().await;
        state.players.values_mut().for_each(PlayerStanding::reset);
        Ok(())
    }

    async fn delete_all(&self) -> TournamentResult<()> {
        self.state.lock().await.players.clear();
        Ok(())
    }

    async fn count(&self) -> TournamentResult<usize> {
        Ok(self.state.lock().await.players.len())
    }

    async fn insert(&self, name: &str) -> TournamentResult<PlayerId> {
        let mut state = self.state.lock().await;
        let id = state.next_id;
        state.next_id += 1;
        state.players.insert(id, PlayerStanding::new(id, name));
        Ok(id)
    }

    async fn list_by_score(&self) -> TournamentResult<Vec<PlayerStanding>> {
        let mut players: Vec<_> = self.state.lock().await.players.values().cloned().collect();
        pairing::rank(&mut players);
        Ok(players)
    }

    async fn record_result(&self, winner: PlayerId, loser: PlayerId) -> TournamentResult<()> {
        let mut state = self.state.lock().await;

        // Validate both before touching either so a failure changes nothing.
        for id in [winner, loser] {
            if !state.players.contains_key(&id) {
                return Err(TournamentError::PlayerNotFound(id));
            }
        }

        if let Some(player) = state.players.get_mut(&winner) {
            player.record_win();
        }
        if let Some(player) = state.players.get_mut(&loser) {
            player.record_loss();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_insert_generates_ids() {
        let repo = InMemoryPlayerRepository::new();

        let first = repo.insert("Alice").await.unwrap();
        let second = repo.insert("Alice").await.unwrap();

        assert_eq!(first, 1, "First player should have ID 1");
        assert_eq!(second, 2, "Duplicate names get distinct IDs");
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_memory_ids_not_reused_after_delete() {
        let repo = InMemoryPlayerRepository::new();
        repo.insert("Alice").await.unwrap();
        repo.insert("Bob").await.unwrap();

        repo.delete_all().await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 0);

        let id = repo.insert("Carol").await.unwrap();
        assert_eq!(id, 3);
        assert!(repo.get(1).await.is_none());
    }

    #[tokio::test]
    async fn test_memory_record_result() {
        let repo = InMemoryPlayerRepository::new();
        let alice = repo.insert("Alice").await.unwrap();
        let bob = repo.insert("Bob").await.unwrap();

        repo.record_result(alice, bob).await.unwrap();

        let alice = repo.get(alice).await.unwrap();
        let bob = repo.get(bob).await.unwrap();
        assert_eq!((alice.score, alice.matches), (1, 1));
        assert_eq!((bob.score, bob.matches), (0, 1));
    }

    #[tokio::test]
    async fn test_memory_record_result_unknown_loser_changes_nothing() {
        let repo = InMemoryPlayerRepository::new();
        let alice = repo.insert("Alice").await.unwrap();

        let err = repo.record_result(alice, 99).await.unwrap_err();
        assert!(matches!(err, TournamentError::PlayerNotFound(99)));

        let alice = repo.get(alice).await.unwrap();
        assert_eq!((alice.score, alice.matches), (0, 0));
    }

    #[tokio::test]
    async fn test_memory_list_by_score_and_reset() {
        let repo = InMemoryPlayerRepository::new();
        let alice = repo.insert("Alice").await.unwrap();
        let bob = repo.insert("Bob").await.unwrap();
        let carol = repo.insert("Carol").await.unwrap();

        repo.record_result(carol, alice).await.unwrap();

        let ids: Vec<_> = repo
            .list_by_score()
            .await
            .unwrap()
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec![carol, alice, bob]);

        repo.reset_all().await.unwrap();
        for player in repo.list_by_score().await.unwrap() {
            assert_eq!((player.score, player.matches), (0, 0));
        }
        assert_eq!(repo.count().await.unwrap(), 3);
    }
}
