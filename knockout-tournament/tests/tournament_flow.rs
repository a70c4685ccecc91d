//! End-to-end tournament flows over the bracket engine

use knockout_core::{MatchStatus, Player, PlayerId};
use knockout_tournament::{
    Seeding, TournamentConfig, TournamentError, TournamentRegistry, TournamentStatus,
};

// ============================================================================
// TEST FIXTURES
// ============================================================================

fn registry_with_players(n: u64, config: TournamentConfig) -> (TournamentRegistry, knockout_tournament::TournamentId) {
    let mut registry = TournamentRegistry::new();
    let id = registry
        .create(PlayerId(1000), "Pong Night", Some("weekly".to_string()), &config)
        .unwrap()
        .id;
    let tournament = registry.get_mut(id).unwrap();
    for i in 1..=n {
        tournament.join(Player::new(i, format!("player-{}", i))).unwrap();
    }
    (registry, id)
}

// ============================================================================
// FLOWS
// ============================================================================

#[test]
fn test_full_tournament_with_byes() {
    for n in 2..=8 {
        let config = TournamentConfig::default().with_max_players(8);
        let (mut registry, id) = registry_with_players(n, config);
        let tournament = registry.get_mut(id).unwrap();
        tournament.start().unwrap();

        // Play-module loop: start each ready match, then report the left side winning
        loop {
            let next = tournament
                .bracket()
                .and_then(|b| b.ready_pairings().first().copied());
            let Some(pairing) = next else { break };
            tournament.start_match(pairing.match_id).unwrap();
            tournament.record_result(pairing.match_id, 11, 7).unwrap();
        }

        assert_eq!(tournament.status, TournamentStatus::Finished, "n={}", n);
        // Left side always wins, so the first seed takes it
        assert_eq!(tournament.champion().map(|p| p.id), Some(PlayerId(1)), "n={}", n);

        let bracket = tournament.bracket().unwrap();
        assert!(bracket.matches().all(|m| m.status == MatchStatus::Completed));

        let standings = tournament.standings();
        assert_eq!(standings.len(), n as usize);
        assert_eq!(standings[0].placement, Some(1));
        assert!(standings.iter().all(|s| s.placement.is_some()));
    }
}

#[test]
fn test_shuffled_tournament_is_reproducible() {
    let config = TournamentConfig::default()
        .with_max_players(16)
        .with_seeding(Seeding::Shuffled { seed: Some(2024) });

    let (mut a, id_a) = registry_with_players(12, config.clone());
    let (mut b, id_b) = registry_with_players(12, config);
    let draw_a = a.get_mut(id_a).unwrap().start().unwrap().player_ids();
    let draw_b = b.get_mut(id_b).unwrap().start().unwrap().player_ids();
    assert_eq!(draw_a, draw_b);
    assert_eq!(draw_a.len(), 12);
}

#[test]
fn test_three_player_final_waits_for_semifinal() {
    let (mut registry, id) = registry_with_players(3, TournamentConfig::default());
    let tournament = registry.get_mut(id).unwrap();
    tournament.start().unwrap();

    let bracket = tournament.bracket().unwrap();
    let final_id = bracket.final_match().unwrap().id;
    assert_eq!(bracket.get(final_id).unwrap().status, MatchStatus::Pending);
    assert_eq!(
        tournament.record_result(final_id, 3, 1).unwrap_err(),
        TournamentError::MatchNotReady(final_id)
    );

    let semi = tournament.bracket().unwrap().ready_pairings()[0];
    tournament.record_result(semi.match_id, 0, 3).unwrap();
    let bracket = tournament.bracket().unwrap();
    assert_eq!(bracket.get(final_id).unwrap().status, MatchStatus::Ready);

    tournament.record_result(final_id, 3, 1).unwrap();
    assert_eq!(tournament.champion().map(|p| p.id), Some(PlayerId(2)));
}

#[test]
fn test_tournament_serializes_with_bracket() {
    let (mut registry, id) = registry_with_players(4, TournamentConfig::default());
    let tournament = registry.get_mut(id).unwrap();
    tournament.start().unwrap();

    let json = serde_json::to_value(&*tournament).unwrap();
    assert_eq!(json["status"], "ongoing");
    assert_eq!(json["title"], "Pong Night");
    assert_eq!(json["bracket"]["rounds"].as_array().unwrap().len(), 2);
}
