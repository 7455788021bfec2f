//! Adjacent-rank Swiss pairing.

use super::errors::{TournamentError, TournamentResult};
use super::models::{Pairing, PlayerStanding};

/// Pair standings position `2k` with position `2k + 1`
///
/// `standings` must already be ranked. Returns `OddPlayerCount` when a player
/// would be left without an opponent; there is no bye.
pub fn pair_adjacent(standings: &[PlayerStanding]) -> TournamentResult<Vec<Pairing>> {
    if standings.len() % 2 != 0 {
        return Err(TournamentError::OddPlayerCount(standings.len()));
    }

    Ok(standings
        .chunks_exact(2)
        .map(|pair| Pairing::new(&pair[0], &pair[1]))
        .collect())
}

/// Sort players by score descending, ties broken by ID ascending
pub fn rank(players: &mut [PlayerStanding]) {
    players.sort_by(|a, b| b.score.cmp(&a.score).then(a.id.cmp(&b.id)));
}
