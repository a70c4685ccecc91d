//! Bracket construction
//!
//! Seeding is "as listed": the roster is padded with byes up to the next
//! power of two and consecutive slots are paired. Callers that want a random
//! draw shuffle the roster first.

use rustc_hash::FxHashSet;

use crate::bracket::{Bracket, Match, MatchId};
use crate::error::{BracketError, Result};
use crate::roster::{PlayerId, Roster};
use crate::slot::Slot;

impl Bracket {
    /// Build a settled bracket from an ordered list of distinct player ids
    pub fn build(players: &[PlayerId]) -> Result<Self> {
        validate_roster(players)?;

        let size = players.len().next_power_of_two();
        let slots = seed_slots(players, size);
        let rounds = build_rounds(&slots);

        let mut bracket = Bracket::from_rounds(rounds)?;
        bracket.settle();

        tracing::info!(
            "Built bracket: {} players, size {}, {} rounds, {} matches",
            players.len(),
            size,
            bracket.round_count(),
            bracket.match_count()
        );

        Ok(bracket)
    }

    /// Build from a roster, in roster order
    pub fn from_roster(roster: &Roster) -> Result<Self> {
        Self::build(&roster.ids())
    }
}

fn validate_roster(players: &[PlayerId]) -> Result<()> {
    if players.len() < 2 {
        return Err(BracketError::InvalidRosterSize {
            count: players.len(),
        });
    }

    let mut seen = FxHashSet::default();
    for &id in players {
        if !seen.insert(id) {
            return Err(BracketError::DuplicatePlayer(id));
        }
    }

    Ok(())
}

/// Players first, byes fill the rest
fn seed_slots(players: &[PlayerId], size: usize) -> Vec<Slot> {
    let mut slots: Vec<Slot> = players.iter().map(|&id| Slot::player(id)).collect();
    slots.resize(size, Slot::Bye);
    slots
}

/// Round 0 from slot pairs, then halve until the final
fn build_rounds(slots: &[Slot]) -> Vec<Vec<Match>> {
    let mut next_id = 0u32;
    let mut allocate = || {
        let id = MatchId(next_id);
        next_id += 1;
        id
    };

    let first: Vec<Match> = slots
        .chunks(2)
        .enumerate()
        .map(|(order, pair)| Match::new(allocate(), 0, order, pair[0], pair[1]))
        .collect();

    let mut rounds = vec![first];
    loop {
        let next: Vec<Match> = match rounds.last() {
            Some(previous) if previous.len() > 1 => {
                let round = rounds.len();
                previous
                    .chunks(2)
                    .enumerate()
                    .map(|(order, pair)| {
                        Match::new(
                            allocate(),
                            round,
                            order,
                            Slot::winner_of(pair[0].id),
                            Slot::winner_of(pair[1].id),
                        )
                    })
                    .collect()
            }
            _ => break,
        };
        rounds.push(next);
    }

    rounds
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bracket::MatchStatus;

    fn ids(n: u64) -> Vec<PlayerId> {
        (1..=n).map(PlayerId).collect()
    }

    #[test]
    fn test_rejects_small_rosters() {
        assert_eq!(
            Bracket::build(&[]),
            Err(BracketError::InvalidRosterSize { count: 0 })
        );
        assert_eq!(
            Bracket::build(&ids(1)),
            Err(BracketError::InvalidRosterSize { count: 1 })
        );
    }

    #[test]
    fn test_rejects_duplicate_players() {
        let players = vec![PlayerId(1), PlayerId(2), PlayerId(1)];
        assert_eq!(
            Bracket::build(&players),
            Err(BracketError::DuplicatePlayer(PlayerId(1)))
        );
    }

    #[test]
    fn test_shape_for_small_rosters() {
        for n in 2..=8u64 {
            let bracket = Bracket::build(&ids(n)).unwrap();
            let size = (n as usize).next_power_of_two();
            assert_eq!(bracket.size(), size, "n={}", n);
            assert_eq!(bracket.round_count(), size.trailing_zeros() as usize, "n={}", n);
            assert_eq!(bracket.match_count(), size - 1, "n={}", n);
            assert_eq!(bracket.bye_count(), size - n as usize, "n={}", n);
            assert_eq!(bracket.player_ids(), ids(n), "n={}", n);
        }
    }

    #[test]
    fn test_two_players_single_ready_match() {
        let bracket = Bracket::build(&ids(2)).unwrap();
        assert_eq!(bracket.match_count(), 1);
        assert_eq!(bracket.bye_count(), 0);
        let only = bracket.final_match().unwrap();
        assert_eq!(only.left, Slot::player(PlayerId(1)));
        assert_eq!(only.right, Slot::player(PlayerId(2)));
        assert_eq!(only.status, MatchStatus::Ready);
    }

    #[test]
    fn test_three_players_one_bye() {
        let bracket = Bracket::build(&ids(3)).unwrap();
        let first = &bracket.rounds()[0];
        assert_eq!(first[0].status, MatchStatus::Ready);
        assert_eq!(first[1].right, Slot::Bye);
        assert_eq!(first[1].status, MatchStatus::Completed);
        assert_eq!(first[1].winner, Some(PlayerId(3)));

        let completed = first.iter().filter(|m| m.is_completed()).count();
        assert_eq!(completed, 1);

        // Final waits for the real semifinal
        let last = bracket.final_match().unwrap();
        assert_eq!(last.status, MatchStatus::Pending);
        assert_eq!(last.winner, None);
    }

    #[test]
    fn test_later_rounds_reference_previous_pairs() {
        let bracket = Bracket::build(&ids(8)).unwrap();
        for r in 1..bracket.round_count() {
            for (o, m) in bracket.rounds()[r].iter().enumerate() {
                let previous = &bracket.rounds()[r - 1];
                assert_eq!(m.left, Slot::winner_of(previous[2 * o].id));
                assert_eq!(m.right, Slot::winner_of(previous[2 * o + 1].id));
            }
        }
    }

    #[test]
    fn test_ids_are_unique_and_dense() {
        let bracket = Bracket::build(&ids(6)).unwrap();
        let mut all: Vec<u32> = bracket.matches().map(|m| m.id.0).collect();
        all.sort_unstable();
        assert_eq!(all, (0..7).collect::<Vec<_>>());
    }
}
