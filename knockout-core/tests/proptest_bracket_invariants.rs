//! Property-based invariant tests for bracket construction and play.
//!
//! 1. Shape: rounds = log2(size), matches = size - 1, byes = size - n.
//! 2. Round sizes halve down to a single final.
//! 3. Status refresh is idempotent.
//! 4. Bye propagation halts within the match count.
//! 5. Playing out the ready queue always produces a champion.
//! 6. Rejected winners leave the bracket unchanged.
//! 7. set_winner followed by clear_winner is a no-op.
//! 8. Snapshots reload to an equal bracket.

use knockout_core::{snapshot, Bracket, MatchStatus, PlayerId, Resolved};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

fn roster(n: usize) -> Vec<PlayerId> {
    (0..n as u64).map(|i| PlayerId(100 + i)).collect()
}

fn roster_strategy() -> impl Strategy<Value = Vec<PlayerId>> {
    (2usize..=40).prop_map(roster)
}

/// Play ready matches, choosing sides from `picks`, until nothing is ready
fn play_out(bracket: &mut Bracket, picks: &[bool]) {
    let mut turn = 0;
    while let Some(pairing) = bracket.ready_pairings().first().copied() {
        let left_wins = picks.get(turn % picks.len().max(1)).copied().unwrap_or(true);
        let winner = if left_wins { pairing.left } else { pairing.right };
        bracket.set_winner(pairing.match_id, winner).unwrap();
        turn += 1;
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Shape
// ═════════════════════════════════════════════════════════════════════════

#[test]
fn shape_for_listed_sizes() {
    for n in 2..=8 {
        let bracket = Bracket::build(&roster(n)).unwrap();
        let size = n.next_power_of_two();
        assert_eq!(bracket.round_count(), size.trailing_zeros() as usize);
        assert_eq!(bracket.match_count(), size - 1);
        assert_eq!(bracket.bye_count(), size - n);
    }
}

proptest! {
    #[test]
    fn shape_matches_next_power_of_two(players in roster_strategy()) {
        let bracket = Bracket::build(&players).unwrap();
        let size = players.len().next_power_of_two();
        prop_assert_eq!(bracket.size(), size);
        prop_assert_eq!(bracket.round_count(), size.trailing_zeros() as usize);
        prop_assert_eq!(bracket.match_count(), size - 1);
        prop_assert_eq!(bracket.bye_count(), size - players.len());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Round sizes halve
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn round_sizes_halve(players in roster_strategy()) {
        let bracket = Bracket::build(&players).unwrap();
        let rounds = bracket.rounds();
        prop_assert_eq!(rounds[0].len(), bracket.size() / 2);
        for pair in rounds.windows(2) {
            prop_assert_eq!(pair[1].len() * 2, pair[0].len());
        }
        prop_assert_eq!(rounds.last().map(Vec::len), Some(1));
        prop_assert!(bracket.validate().is_ok());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Idempotent refresh
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn refresh_is_idempotent(players in roster_strategy(), picks in prop::collection::vec(any::<bool>(), 1..8)) {
        let mut bracket = Bracket::build(&players).unwrap();
        if let Some(pairing) = bracket.ready_pairings().first().copied() {
            let winner = if picks[0] { pairing.left } else { pairing.right };
            bracket.set_winner(pairing.match_id, winner).unwrap();
        }
        bracket.refresh_statuses();
        let once = bracket.clone();
        bracket.refresh_statuses();
        prop_assert_eq!(bracket, once);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Fixpoint termination
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn bye_propagation_terminates(players in roster_strategy()) {
        let mut bracket = Bracket::build(&players).unwrap();
        let passes = bracket.advance_byes();
        prop_assert!(passes >= 1);
        prop_assert!(passes <= bracket.match_count());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Play-out reaches a champion
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn play_out_produces_champion(players in roster_strategy(), picks in prop::collection::vec(any::<bool>(), 1..16)) {
        let mut bracket = Bracket::build(&players).unwrap();
        play_out(&mut bracket, &picks);

        prop_assert!(bracket.is_complete());
        let champion = bracket.champion().unwrap();
        prop_assert!(players.contains(&champion));
        prop_assert!(bracket.matches().all(|m| m.status == MatchStatus::Completed));

        // Every recorded winner is one of that match's resolved opponents
        for m in bracket.matches() {
            if let Some(winner) = m.winner {
                let (left, right) = bracket.resolve_sides(m);
                prop_assert!(left == Resolved::Player(winner) || right == Resolved::Player(winner));
            }
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Rejected winners are no-ops
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn invalid_winner_leaves_bracket_unchanged(players in roster_strategy()) {
        let mut bracket = Bracket::build(&players).unwrap();
        let before = serde_json::to_string(&bracket).unwrap();
        let outsider = PlayerId(1);

        for id in bracket.matches().map(|m| m.id).collect::<Vec<_>>() {
            prop_assert!(bracket.set_winner(id, outsider).is_err());
        }
        prop_assert_eq!(serde_json::to_string(&bracket).unwrap(), before);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 7. Set then clear
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn set_then_clear_round_trips(players in roster_strategy(), picks in prop::collection::vec(any::<bool>(), 1..16), steps in 0usize..8) {
        let mut bracket = Bracket::build(&players).unwrap();

        // Advance a few matches first so later rounds are in play
        for step in 0..steps {
            let Some(pairing) = bracket.ready_pairings().first().copied() else { break };
            let winner = if picks[step % picks.len()] { pairing.left } else { pairing.right };
            bracket.set_winner(pairing.match_id, winner).unwrap();
        }

        if let Some(pairing) = bracket.ready_pairings().last().copied() {
            let before = bracket.clone();
            bracket.set_winner(pairing.match_id, pairing.right).unwrap();
            bracket.clear_winner(pairing.match_id).unwrap();
            prop_assert_eq!(bracket, before);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 8. Snapshot reload
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn snapshot_reload_is_equal(players in roster_strategy(), picks in prop::collection::vec(any::<bool>(), 1..16), steps in 0usize..12) {
        let mut bracket = Bracket::build(&players).unwrap();
        for step in 0..steps {
            let Some(pairing) = bracket.ready_pairings().first().copied() else { break };
            let winner = if picks[step % picks.len()] { pairing.left } else { pairing.right };
            bracket.set_winner(pairing.match_id, winner).unwrap();
        }
        if let Some(pairing) = bracket.ready_pairings().first().copied() {
            bracket.mark_in_progress(pairing.match_id).unwrap();
        }

        let json = snapshot::to_json(&bracket).unwrap();
        let reloaded = snapshot::from_json(&json).unwrap();
        prop_assert_eq!(reloaded, bracket);
    }
}
