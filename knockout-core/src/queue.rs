//! Ready queue - what can be played next
//!
//! Derived on demand from current statuses; nothing here is cached.

use serde::{Deserialize, Serialize};

use crate::bracket::{Bracket, Match, MatchId, MatchStatus};
use crate::roster::PlayerId;
use crate::slot::Resolved;

/// A ready match with both opponents resolved
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pairing {
    pub match_id: MatchId,
    pub round: usize,
    pub order: usize,
    pub left: PlayerId,
    pub right: PlayerId,
}

impl Bracket {
    /// Matches with status `ready`, ordered by (round, order)
    pub fn ready_matches(&self) -> Vec<&Match> {
        self.matches()
            .filter(|m| m.status == MatchStatus::Ready)
            .collect()
    }

    /// Ready matches together with the two players to hand to the game
    pub fn ready_pairings(&self) -> Vec<Pairing> {
        self.ready_matches()
            .into_iter()
            .filter_map(|m| match self.resolve_sides(m) {
                (Resolved::Player(left), Resolved::Player(right)) => Some(Pairing {
                    match_id: m.id,
                    round: m.round,
                    order: m.order,
                    left,
                    right,
                }),
                _ => None,
            })
            .collect()
    }

    /// Matches currently being played
    pub fn in_progress_matches(&self) -> Vec<&Match> {
        self.matches()
            .filter(|m| m.status == MatchStatus::InProgress)
            .collect()
    }
}
