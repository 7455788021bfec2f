//! Integration tests for swiss_cli command execution.
//!
//! Drives a full tournament round through parsed commands against the
//! in-memory store.

use swiss_cli::commands::{Output, Session, parse_command};
use swiss_tournament::TournamentError;

async fn run(session: &Session, line: &str) -> anyhow::Result<Output> {
    let words: Vec<&str> = line.split_whitespace().collect();
    session.run(parse_command(&words)?).await
}

#[tokio::test]
async fn test_round_through_commands() {
    let session = Session::in_memory();

    for name in ["Alice Smith", "Bob", "Carol", "Dave"] {
        let output = run(&session, &format!("register {name}")).await.unwrap();
        assert!(matches!(output, Output::Registered(_)));
    }
    assert_eq!(run(&session, "count").await.unwrap(), Output::Count(4));

    run(&session, "report 1 2").await.unwrap();
    run(&session, "report 3 4").await.unwrap();

    let Output::Standings(standings) = run(&session, "standings").await.unwrap() else {
        panic!("expected standings");
    };
    assert_eq!(standings[0].name, "Alice Smith");
    assert_eq!(standings[1].name, "Carol");

    let Output::Pairings(pairings) = run(&session, "pairings").await.unwrap() else {
        panic!("expected pairings");
    };
    assert_eq!((pairings[0].id1, pairings[0].id2), (1, 3));
    assert_eq!((pairings[1].id1, pairings[1].id2), (2, 4));

    let text = Output::Pairings(pairings).render(false).unwrap();
    assert_eq!(text, "Alice Smith (1) vs Carol (3)\nBob (2) vs Dave (4)");
}

#[tokio::test]
async fn test_reset_and_clear_commands() {
    let session = Session::in_memory();
    run(&session, "register Alice").await.unwrap();
    run(&session, "register Bob").await.unwrap();
    run(&session, "report 2 1").await.unwrap();

    run(&session, "reset").await.unwrap();
    let Output::Standings(standings) = run(&session, "standings").await.unwrap() else {
        panic!("expected standings");
    };
    assert!(standings.iter().all(|p| p.score == 0 && p.matches == 0));

    run(&session, "clear").await.unwrap();
    assert_eq!(run(&session, "count").await.unwrap(), Output::Count(0));
}

#[tokio::test]
async fn test_init_without_database() {
    let session = Session::in_memory();
    let output = run(&session, "init").await.unwrap();
    assert!(matches!(output, Output::Message(_)));
}

#[tokio::test]
async fn test_tournament_errors_surface() {
    let session = Session::in_memory();
    run(&session, "register Alice").await.unwrap();

    let err = run(&session, "report 1 5").await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<TournamentError>(),
        Some(TournamentError::PlayerNotFound(5))
    ));

    let err = run(&session, "report 1 1").await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<TournamentError>(),
        Some(TournamentError::SelfMatch(1))
    ));

    let err = run(&session, "pairings").await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<TournamentError>(),
        Some(TournamentError::OddPlayerCount(1))
    ));
}

#[tokio::test]
async fn test_json_output() {
    let session = Session::in_memory();
    run(&session, "register Alice").await.unwrap();
    run(&session, "register Bob").await.unwrap();

    let json = run(&session, "pairings")
        .await
        .unwrap()
        .render(true)
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value[0]["id1"], 1);
    assert_eq!(value[0]["name2"], "Bob");
}
