//! Tournament data models for Swiss-system pairing.

use serde::{Deserialize, Serialize};

/// Player ID type (PostgreSQL `SERIAL`)
pub type PlayerId = i32;

/// A player's row in the standings
///
/// `score` counts wins and `matches` counts matches played, so
/// `score <= matches` always holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStanding {
    /// Store-generated player ID
    pub id: PlayerId,
    /// Display name (not unique)
    pub name: String,
    /// Number of matches won
    pub score: i32,
    /// Number of matches played
    pub matches: i32,
}

impl PlayerStanding {
    /// Create a freshly registered player with no matches played
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            score: 0,
            matches: 0,
        }
    }

    /// Number of matches lost
    pub fn losses(&self) -> i32 {
        self.matches - self.score
    }

    /// Apply a win to this player's counters
    pub(crate) fn record_win(&mut self) {
        self.score += 1;
        self.matches += 1;
    }

    /// Apply a loss to this player's counters
    pub(crate) fn record_loss(&mut self) {
        self.matches += 1;
    }

    /// Zero both counters
    pub(crate) fn reset(&mut self) {
        self.score = 0;
        self.matches = 0;
    }
}

/// One match of the next round: `(id1, name1, id2, name2)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pairing {
    pub id1: PlayerId,
    pub name1: String,
    pub id2: PlayerId,
    pub name2: String,
}

impl Pairing {
    /// Pair two standings rows, higher-ranked player first
    pub fn new(first: &PlayerStanding, second: &PlayerStanding) -> Self {
        Self {
            id1: first.id,
            name1: first.name.clone(),
            id2: second.id,
            name2: second.name.clone(),
        }
    }
}

impl From<Pairing> for (PlayerId, String, PlayerId, String) {
    fn from(p: Pairing) -> Self {
        (p.id1, p.name1, p.id2, p.name2)
    }
}
