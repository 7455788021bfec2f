//! Swiss tournament command-line tool.
//!
//! Runs one command per invocation against PostgreSQL, or a line-per-command
//! session from stdin with `shell`.

use std::io::{self, BufRead, IsTerminal, Write};
use std::time::Instant;

use anyhow::Error;
use log::info;
use pico_args::Arguments;
use swiss_cli::{
    commands::{Command, Session, describe, parse_command},
    config::CliConfig,
    logging,
};
use swiss_tournament::db::{Database, redact_url};

const HELP: &str = "\
Track players and pair rounds of a Swiss-system tournament

USAGE:
  swiss [OPTIONS] COMMAND [ARGS]

COMMANDS:
  init                     Create the players table if missing
  register NAME...         Register a player
  report WINNER LOSER      Record a match result by player id
  standings                Show players ranked by wins
  pairings                 Show next-round pairings
  count                    Show number of registered players
  reset                    Zero all scores, keep players
  clear                    Remove all players
  shell                    Read commands from stdin, one per line

OPTIONS:
  --db-url     URL         Database connection string  [default: env DATABASE_URL]

FLAGS:
  --in-memory              Use a throwaway in-memory store (useful with shell)
  --json                   Print results as JSON
  -h, --help               Print help information

ENVIRONMENT:
  DATABASE_URL             PostgreSQL connection string
  DB_MAX_CONNECTIONS       Pool size  [default: 5]
  RUST_LOG                 Log filter  [default: warn]
";

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let database_url: Option<String> = pargs.opt_value_from_str("--db-url")?;
    let in_memory = pargs.contains("--in-memory");
    let json = pargs.contains("--json");

    let words: Vec<String> = pargs
        .finish()
        .into_iter()
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect();

    logging::init();

    let config = CliConfig::from_env(database_url, in_memory, json)?;

    if let Err(e) = run(&config, &words).await {
        eprintln!("error: {}", describe(&e));
        std::process::exit(1);
    }
    Ok(())
}

/// Open the session, run the command or shell, then close the pool
async fn run(config: &CliConfig, words: &[String]) -> Result<(), Error> {
    let session = match &config.database {
        Some(db_config) => {
            info!("Connecting to database: {}", redact_url(&db_config.database_url));
            Session::with_database(Database::new(db_config).await?)
        }
        None => Session::in_memory(),
    };

    let result = if words.first().map(String::as_str) == Some("shell") {
        run_shell(&session, config.json).await
    } else {
        match parse_command(words) {
            Ok(command) => run_one(&session, command, config.json).await,
            Err(e) => Err(e.into()),
        }
    };

    session.close().await;
    result
}

/// Run a single command and print its output
async fn run_one(session: &Session, command: Command, json: bool) -> Result<(), Error> {
    let name = command.name();
    let start = Instant::now();
    let result = session.run(command).await;
    logging::log_command(name, start.elapsed(), result.is_ok());

    println!("{}", result?.render(json)?);
    Ok(())
}

/// Read commands from stdin until EOF; errors are reported and the session continues
async fn run_shell(session: &Session, json: bool) -> Result<(), Error> {
    let stdin = io::stdin();
    let interactive = stdin.is_terminal();

    loop {
        if interactive {
            print!("swiss> ");
            io::stdout().flush()?;
        }

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let words: Vec<&str> = line.split_whitespace().collect();
        match words.first() {
            None => continue,
            Some(&"exit") | Some(&"quit") => break,
            Some(_) => {}
        }

        let outcome = match parse_command(&words) {
            Ok(command) => run_one(session, command, json).await,
            Err(e) => Err(e.into()),
        };
        if let Err(e) = outcome {
            eprintln!("error: {}", describe(&e));
        }
    }

    Ok(())
}
