//! Slots and slot resolution
//!
//! A [`Slot`] describes who occupies one side of a match. Resolution turns it
//! into a [`Resolved`] value against the current state of the bracket. Nothing
//! resolved is ever cached, so clearing a winner is visible downstream on the
//! next lookup.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::bracket::{Bracket, Match, MatchId};
use crate::roster::PlayerId;

/// One side of a match
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Slot {
    /// A concrete entrant (round 0 only)
    Player { player_id: PlayerId },
    /// Whoever wins the referenced match (round 1 onwards)
    WinnerOf { match_id: MatchId },
    /// Padding entrant (round 0 only)
    Bye,
}

impl Slot {
    pub fn player(id: PlayerId) -> Self {
        Slot::Player { player_id: id }
    }

    pub fn winner_of(id: MatchId) -> Self {
        Slot::WinnerOf { match_id: id }
    }

    pub fn is_bye(&self) -> bool {
        matches!(self, Slot::Bye)
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Player { player_id } => write!(f, "player {}", player_id),
            Slot::WinnerOf { match_id } => write!(f, "winner of {}", match_id),
            Slot::Bye => write!(f, "bye"),
        }
    }
}

/// Value of a slot against the current bracket
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "player_id", rename_all = "snake_case")]
pub enum Resolved {
    Player(PlayerId),
    Bye,
    /// Referenced match has no winner yet
    Unresolved,
}

impl Resolved {
    pub fn player(self) -> Option<PlayerId> {
        match self {
            Resolved::Player(id) => Some(id),
            Resolved::Bye | Resolved::Unresolved => None,
        }
    }

    pub fn is_player(self) -> bool {
        matches!(self, Resolved::Player(_))
    }
}

impl Bracket {
    /// Resolve a slot against this bracket
    ///
    /// `WinnerOf` a match with a recorded winner is that player. `WinnerOf` a
    /// vacant match (both of its sides resolve to a bye) is itself a bye; any
    /// other undecided match is `Unresolved`.
    pub fn resolve(&self, slot: &Slot) -> Resolved {
        match *slot {
            Slot::Player { player_id } => Resolved::Player(player_id),
            Slot::Bye => Resolved::Bye,
            Slot::WinnerOf { match_id } => match self.get(match_id) {
                Some(m) => match m.winner {
                    Some(winner) => Resolved::Player(winner),
                    None if self.is_vacant(m) => Resolved::Bye,
                    None => Resolved::Unresolved,
                },
                None => Resolved::Unresolved,
            },
        }
    }

    /// Resolve both sides of a match
    pub fn resolve_sides(&self, m: &Match) -> (Resolved, Resolved) {
        (self.resolve(&m.left), self.resolve(&m.right))
    }

    /// True when both sides of an undecided match resolve to a bye
    pub(crate) fn is_vacant(&self, m: &Match) -> bool {
        m.winner.is_none()
            && self.resolve(&m.left) == Resolved::Bye
            && self.resolve(&m.right) == Resolved::Bye
    }
}
