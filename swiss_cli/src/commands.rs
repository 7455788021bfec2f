//! Command parsing and execution.

use serde_json::json;
use std::sync::Arc;
use swiss_tournament::{
    Database, InMemoryPlayerRepository, Pairing, PlayerId, PlayerStanding, TournamentError,
    TournamentManager,
};
use thiserror::Error;

/// Errors that can occur during command parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Missing command. Run with --help to see available commands")]
    MissingCommand,

    #[error("'register' requires a player name (e.g., 'register Alice')")]
    MissingName,

    #[error("'report' requires a winner and a loser id (e.g., 'report 1 2')")]
    MissingPlayers,

    #[error("Invalid player id '{0}'. Must be a number")]
    InvalidPlayerId(String),

    #[error("Unexpected argument '{0}'")]
    UnexpectedArgument(String),

    #[error("Unrecognized command '{0}'. Run with --help to see available commands")]
    UnrecognizedCommand(String),
}

/// A single tournament command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create the players table
    Init,
    /// Register a player by name
    Register(String),
    /// Record a match result
    Report { winner: PlayerId, loser: PlayerId },
    /// Show standings
    Standings,
    /// Show next-round pairings
    Pairings,
    /// Show player count
    Count,
    /// Zero all scores
    Reset,
    /// Remove all players
    Clear,
}

impl Command {
    /// Short name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Command::Init => "init",
            Command::Register(_) => "register",
            Command::Report { .. } => "report",
            Command::Standings => "standings",
            Command::Pairings => "pairings",
            Command::Count => "count",
            Command::Reset => "reset",
            Command::Clear => "clear",
        }
    }
}

/// Parse command words into a `Command`.
///
/// Everything after `register` is joined into the player name, so names may
/// contain spaces.
///
/// # Examples
///
/// ```
/// use swiss_cli::commands::{parse_command, Command};
///
/// assert_eq!(parse_command(&["count"]), Ok(Command::Count));
/// assert_eq!(
///     parse_command(&["register", "Chandra", "Nalaar"]),
///     Ok(Command::Register("Chandra Nalaar".to_string()))
/// );
/// assert_eq!(
///     parse_command(&["report", "1", "2"]),
///     Ok(Command::Report { winner: 1, loser: 2 })
/// );
/// ```
pub fn parse_command<S: AsRef<str>>(words: &[S]) -> Result<Command, ParseError> {
    let mut words = words.iter().map(S::as_ref);
    let command = words.next().ok_or(ParseError::MissingCommand)?;

    let parsed = match command {
        "init" => Command::Init,
        "standings" => Command::Standings,
        "pairings" => Command::Pairings,
        "count" => Command::Count,
        "reset" => Command::Reset,
        "clear" => Command::Clear,
        "register" => {
            let name = words.by_ref().collect::<Vec<_>>().join(" ");
            if name.trim().is_empty() {
                return Err(ParseError::MissingName);
            }
            Command::Register(name)
        }
        "report" => {
            let (Some(winner), Some(loser)) = (words.next(), words.next()) else {
                return Err(ParseError::MissingPlayers);
            };
            Command::Report {
                winner: parse_player_id(winner)?,
                loser: parse_player_id(loser)?,
            }
        }
        other => return Err(ParseError::UnrecognizedCommand(other.to_string())),
    };

    match words.next() {
        Some(extra) => Err(ParseError::UnexpectedArgument(extra.to_string())),
        None => Ok(parsed),
    }
}

fn parse_player_id(word: &str) -> Result<PlayerId, ParseError> {
    word.parse()
        .map_err(|_| ParseError::InvalidPlayerId(word.to_string()))
}

/// Result of running a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    Message(String),
    Registered(PlayerId),
    Count(usize),
    Standings(Vec<PlayerStanding>),
    Pairings(Vec<Pairing>),
}

impl Output {
    /// Render as a plain-text table, or as JSON when `json` is set
    pub fn render(&self, json: bool) -> Result<String, serde_json::Error> {
        if json {
            let value = match self {
                Output::Message(message) => json!({ "message": message }),
                Output::Registered(id) => json!({ "id": id }),
                Output::Count(count) => json!({ "count": count }),
                Output::Standings(standings) => serde_json::to_value(standings)?,
                Output::Pairings(pairings) => serde_json::to_value(pairings)?,
            };
            return serde_json::to_string_pretty(&value);
        }

        Ok(match self {
            Output::Message(message) => message.clone(),
            Output::Registered(id) => format!("Registered player {id}"),
            Output::Count(count) => count.to_string(),
            Output::Standings(standings) => {
                let mut out = format!(
                    "{:>6}  {:<24} {:>5} {:>6} {:>7}",
                    "ID", "NAME", "WINS", "LOSSES", "MATCHES"
                );
                for p in standings {
                    out.push_str(&format!(
                        "\n{:>6}  {:<24} {:>5} {:>6} {:>7}",
                        p.id,
                        p.name,
                        p.score,
                        p.losses(),
                        p.matches
                    ));
                }
                out
            }
            Output::Pairings(pairings) => pairings
                .iter()
                .map(|p| format!("{} ({}) vs {} ({})", p.name1, p.id1, p.name2, p.id2))
                .collect::<Vec<_>>()
                .join("\n"),
        })
    }
}

/// A tournament manager plus the database behind it, if any
pub struct Session {
    manager: TournamentManager,
    database: Option<Database>,
}

impl Session {
    /// Session over a PostgreSQL database
    pub fn with_database(database: Database) -> Self {
        let manager = TournamentManager::new(Arc::new(database.player_repository()));
        Self {
            manager,
            database: Some(database),
        }
    }

    /// Session over a fresh in-memory store
    pub fn in_memory() -> Self {
        Self {
            manager: TournamentManager::new(Arc::new(InMemoryPlayerRepository::new())),
            database: None,
        }
    }

    /// Run one command
    pub async fn run(&self, command: Command) -> anyhow::Result<Output> {
        let output = match command {
            Command::Init => match &self.database {
                Some(db) => {
                    db.health_check().await?;
                    db.ensure_schema().await?;
                    Output::Message("Players table is ready".to_string())
                }
                None => Output::Message("In-memory store needs no schema".to_string()),
            },
            Command::Register(name) => Output::Registered(self.manager.register_player(&name).await?),
            Command::Report { winner, loser } => {
                self.manager.report_match(winner, loser).await?;
                Output::Message(format!("Recorded: {winner} beat {loser}"))
            }
            Command::Standings => Output::Standings(self.manager.standings().await?),
            Command::Pairings => Output::Pairings(self.manager.swiss_pairings().await?),
            Command::Count => Output::Count(self.manager.count_players().await?),
            Command::Reset => {
                self.manager.reset_scores().await?;
                Output::Message("All scores reset".to_string())
            }
            Command::Clear => {
                self.manager.clear_players().await?;
                Output::Message("All players removed".to_string())
            }
        };
        Ok(output)
    }

    /// Close the database pool, if there is one
    pub async fn close(self) {
        if let Some(db) = self.database {
            db.close().await;
        }
    }
}

/// User-facing text for a failed command
///
/// Store failures are logged in full and shown as the sanitized
/// `client_message`; everything else is shown with its context chain.
pub fn describe(err: &anyhow::Error) -> String {
    match err.downcast_ref::<TournamentError>() {
        Some(e) => {
            if e.is_store_unavailable() {
                log::error!("{e}");
            }
            e.client_message()
        }
        None => format!("{err:#}"),
    }
}
