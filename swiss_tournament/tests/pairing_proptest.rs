/// Property-based tests for standings and pairing using proptest
///
/// Random match histories are replayed against the in-memory repository and
/// the resulting standings and pairings are checked for ordering and coverage.
use proptest::prelude::*;
use std::collections::HashSet;
use std::sync::Arc;
use swiss_tournament::tournament::pairing::{pair_adjacent, rank};
use swiss_tournament::{InMemoryPlayerRepository, PlayerStanding, TournamentManager};

// Strategy to generate a ledger row that satisfies score <= matches
fn standing_strategy() -> impl Strategy<Value = (i32, i32)> {
    (0i32..20).prop_flat_map(|matches| (0..=matches, Just(matches)))
}

// Strategy to generate a field of players with unique IDs
fn field_strategy(min: usize, max: usize) -> impl Strategy<Value = Vec<PlayerStanding>> {
    prop::collection::vec(standing_strategy(), min..=max).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (score, matches))| PlayerStanding {
                id: i as i32 + 1,
                name: format!("player{}", i + 1),
                score,
                matches,
            })
            .collect()
    })
}

// Strategy to generate an even-sized field
fn even_field_strategy() -> impl Strategy<Value = Vec<PlayerStanding>> {
    field_strategy(0, 40).prop_map(|mut field| {
        if field.len() % 2 == 1 {
            field.pop();
        }
        field
    })
}

// Strategy to generate an odd-sized field
fn odd_field_strategy() -> impl Strategy<Value = Vec<PlayerStanding>> {
    field_strategy(1, 41).prop_map(|mut field| {
        if field.len() % 2 == 0 {
            field.pop();
        }
        field
    })
}

fn block_on<F: std::future::Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap()
        .block_on(future)
}

proptest! {
    #[test]
    fn test_rank_is_non_increasing_by_score(mut field in field_strategy(0, 40)) {
        rank(&mut field);

        for window in field.windows(2) {
            prop_assert!(window[0].score >= window[1].score);
            if window[0].score == window[1].score {
                prop_assert!(window[0].id < window[1].id, "ties should be broken by id");
            }
        }
    }

    #[test]
    fn test_even_field_pairs_every_player_once(mut field in even_field_strategy()) {
        rank(&mut field);
        let pairings = pair_adjacent(&field).unwrap();

        prop_assert_eq!(pairings.len(), field.len() / 2);

        let mut seen = HashSet::new();
        for (k, pairing) in pairings.iter().enumerate() {
            // Partners are adjacent in the standings
            prop_assert_eq!(pairing.id1, field[2 * k].id);
            prop_assert_eq!(pairing.id2, field[2 * k + 1].id);
            prop_assert!(seen.insert(pairing.id1));
            prop_assert!(seen.insert(pairing.id2));
        }
        prop_assert_eq!(seen.len(), field.len());
    }

    #[test]
    fn test_odd_field_is_rejected(field in odd_field_strategy()) {
        prop_assert!(pair_adjacent(&field).is_err());
    }

    #[test]
    fn test_replayed_matches_keep_ledger_consistent(
        players in 2usize..12,
        results in prop::collection::vec((0usize..12, 0usize..12), 0..60),
    ) {
        let (standings, expected_wins, expected_matches) = block_on(async {
            let mgr = TournamentManager::new(Arc::new(InMemoryPlayerRepository::new()));
            let mut ids = Vec::new();
            for i in 0..players {
                ids.push(mgr.register_player(&format!("player{i}")).await.unwrap());
            }

            let mut wins = vec![0i32; players];
            let mut matches = vec![0i32; players];
            for (w, l) in results {
                let (w, l) = (w % players, l % players);
                if w == l {
                    continue;
                }
                mgr.report_match(ids[w], ids[l]).await.unwrap();
                wins[w] += 1;
                matches[w] += 1;
                matches[l] += 1;
            }

            (mgr.standings().await.unwrap(), wins, matches)
        });

        prop_assert_eq!(standings.len(), players);
        for player in &standings {
            let index = (player.id - 1) as usize;
            prop_assert_eq!(player.score, expected_wins[index]);
            prop_assert_eq!(player.matches, expected_matches[index]);
            prop_assert!(player.score <= player.matches);
        }
    }
}
