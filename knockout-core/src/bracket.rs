//! Bracket data model
//!
//! Matches live in an arena of rounds and are addressed by [`MatchId`]. An id
//! index is rebuilt whenever a bracket is constructed or loaded, so lookups
//! never scan the rounds.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{BracketError, Result};
use crate::roster::PlayerId;
use crate::slot::{Resolved, Slot};

// ============================================================================
// CORE TYPES
// ============================================================================

/// Match identifier, unique within a bracket
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchId(pub u32);

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Derived match status
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    /// At least one side is not a concrete player yet
    #[default]
    Pending,
    /// Both sides are players, nobody has started it
    Ready,
    /// Started by the caller, no winner yet
    InProgress,
    /// Winner recorded, or nobody left to play it
    Completed,
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MatchStatus::Pending => "pending",
            MatchStatus::Ready => "ready",
            MatchStatus::InProgress => "in_progress",
            MatchStatus::Completed => "completed",
        };
        f.write_str(s)
    }
}

/// A single match in the bracket
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    /// 0-based round index
    pub round: usize,
    /// 0-based position within the round
    pub order: usize,
    pub left: Slot,
    pub right: Slot,
    #[serde(default, rename = "winner_id")]
    pub winner: Option<PlayerId>,
    #[serde(default)]
    pub status: MatchStatus,
    /// Set by `mark_in_progress`; keeps the status sticky until the slots change
    #[serde(default)]
    pub started: bool,
}

impl Match {
    pub(crate) fn new(id: MatchId, round: usize, order: usize, left: Slot, right: Slot) -> Self {
        Self {
            id,
            round,
            order,
            left,
            right,
            winner: None,
            status: MatchStatus::Pending,
            started: false,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == MatchStatus::Completed
    }
}

/// Plain nested form of a bracket, used for persistence
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketSnapshot {
    pub rounds: Vec<Vec<Match>>,
}

/// Single-elimination bracket
///
/// Serializes as a [`BracketSnapshot`]; deserializing validates the structure
/// and re-derives every status.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(into = "BracketSnapshot", try_from = "BracketSnapshot")]
pub struct Bracket {
    pub(crate) rounds: Vec<Vec<Match>>,
    index: FxHashMap<MatchId, (usize, usize)>,
}

impl PartialEq for Bracket {
    fn eq(&self, other: &Self) -> bool {
        self.rounds == other.rounds
    }
}

impl Eq for Bracket {}

impl From<Bracket> for BracketSnapshot {
    fn from(bracket: Bracket) -> Self {
        BracketSnapshot {
            rounds: bracket.rounds,
        }
    }
}

impl TryFrom<BracketSnapshot> for Bracket {
    type Error = BracketError;

    fn try_from(snapshot: BracketSnapshot) -> Result<Self> {
        Bracket::from_snapshot(snapshot)
    }
}

// ============================================================================
// CONSTRUCTION
// ============================================================================

impl Bracket {
    /// Index and validate rounds without settling
    pub(crate) fn from_rounds(rounds: Vec<Vec<Match>>) -> Result<Self> {
        let mut index = FxHashMap::default();
        for (r, round) in rounds.iter().enumerate() {
            for (o, m) in round.iter().enumerate() {
                if index.insert(m.id, (r, o)).is_some() {
                    return Err(BracketError::InvariantViolation(format!(
                        "match id {} used more than once",
                        m.id
                    )));
                }
            }
        }

        let bracket = Self { rounds, index };
        bracket.validate()?;
        Ok(bracket)
    }

    /// Rebuild a bracket from a persisted snapshot
    ///
    /// Structure is validated, winners that no longer match a resolved
    /// opponent are dropped, and statuses are recomputed. A stored
    /// `in_progress` status is honoured as the started marker.
    pub fn from_snapshot(snapshot: BracketSnapshot) -> Result<Self> {
        let mut bracket = Self::from_rounds(snapshot.rounds)?;

        for r in 0..bracket.rounds.len() {
            for o in 0..bracket.rounds[r].len() {
                let (left, right) = bracket.resolve_sides(&bracket.rounds[r][o]);
                let m = &mut bracket.rounds[r][o];
                if m.status == MatchStatus::InProgress {
                    m.started = true;
                }
                if let Some(winner) = m.winner {
                    if left != Resolved::Player(winner) && right != Resolved::Player(winner) {
                        tracing::warn!(
                            "Dropping stored winner {} of match {}: not one of its opponents",
                            winner,
                            m.id
                        );
                        m.winner = None;
                    }
                }
            }
        }

        bracket.settle();
        Ok(bracket)
    }

    /// Check structural invariants
    ///
    /// Round sizes halve down to a single final, round 0 holds only distinct
    /// players and byes, and every later match is fed by two adjacent matches of the
    /// previous round.
    pub fn validate(&self) -> Result<()> {
        let violation = |msg: String| Err(BracketError::InvariantViolation(msg));

        let first = match self.rounds.first() {
            Some(round) => round,
            None => return violation("bracket has no rounds".to_string()),
        };
        if !first.len().is_power_of_two() {
            return violation(format!("round 0 has {} matches", first.len()));
        }
        if self.rounds.last().map(Vec::len) != Some(1) {
            return violation("last round is not a single final".to_string());
        }

        let mut entrants = FxHashSet::default();
        for (r, round) in self.rounds.iter().enumerate() {
            if r > 0 && round.len() * 2 != self.rounds[r - 1].len() {
                return violation(format!(
                    "round {} has {} matches, previous round has {}",
                    r,
                    round.len(),
                    self.rounds[r - 1].len()
                ));
            }

            for (o, m) in round.iter().enumerate() {
                if m.round != r || m.order != o {
                    return violation(format!(
                        "match {} is labelled round {} order {} but sits at round {} order {}",
                        m.id, m.round, m.order, r, o
                    ));
                }

                if r == 0 {
                    for slot in [&m.left, &m.right] {
                        match slot {
                            Slot::WinnerOf { .. } => {
                                return violation(format!("round 0 match {} has {}", m.id, slot));
                            }
                            Slot::Player { player_id } if !entrants.insert(*player_id) => {
                                return Err(BracketError::DuplicatePlayer(*player_id));
                            }
                            _ => {}
                        }
                    }
                } else {
                    let previous = &self.rounds[r - 1];
                    let expected_left = Slot::winner_of(previous[2 * o].id);
                    let expected_right = Slot::winner_of(previous[2 * o + 1].id);
                    if m.left != expected_left || m.right != expected_right {
                        return violation(format!(
                            "match {} should be fed by matches {} and {}",
                            m.id,
                            previous[2 * o].id,
                            previous[2 * o + 1].id
                        ));
                    }
                }
            }
        }

        Ok(())
    }
}

// ============================================================================
// QUERIES
// ============================================================================

impl Bracket {
    pub fn rounds(&self) -> &[Vec<Match>] {
        &self.rounds
    }

    pub fn round_count(&self) -> usize {
        self.rounds.len()
    }

    /// Number of round-0 slots (a power of two)
    pub fn size(&self) -> usize {
        self.rounds.first().map_or(0, |r| r.len() * 2)
    }

    pub fn match_count(&self) -> usize {
        self.index.len()
    }

    /// Players seeded into round 0
    pub fn player_ids(&self) -> Vec<PlayerId> {
        self.round_zero_slots()
            .filter_map(|slot| match slot {
                Slot::Player { player_id } => Some(*player_id),
                _ => None,
            })
            .collect()
    }

    /// Byes padding round 0
    pub fn bye_count(&self) -> usize {
        self.round_zero_slots().filter(|slot| slot.is_bye()).count()
    }

    fn round_zero_slots(&self) -> impl Iterator<Item = &Slot> {
        self.rounds
            .first()
            .into_iter()
            .flatten()
            .flat_map(|m| [&m.left, &m.right])
    }

    /// All matches ordered by (round, order)
    pub fn matches(&self) -> impl Iterator<Item = &Match> {
        self.rounds.iter().flatten()
    }

    pub fn get(&self, id: MatchId) -> Option<&Match> {
        self.index
            .get(&id)
            .and_then(|&(r, o)| self.rounds.get(r).and_then(|round| round.get(o)))
    }

    pub(crate) fn position(&self, id: MatchId) -> Result<(usize, usize)> {
        self.index
            .get(&id)
            .copied()
            .ok_or(BracketError::MatchNotFound(id))
    }

    pub(crate) fn match_mut(&mut self, id: MatchId) -> Result<&mut Match> {
        let (r, o) = self.position(id)?;
        Ok(&mut self.rounds[r][o])
    }

    /// Currently resolved opponents of a match, for display
    pub fn opponents(&self, id: MatchId) -> Result<(Resolved, Resolved)> {
        let m = self.get(id).ok_or(BracketError::MatchNotFound(id))?;
        Ok(self.resolve_sides(m))
    }

    pub fn final_match(&self) -> Option<&Match> {
        self.rounds.last().and_then(|round| round.first())
    }

    /// Winner of the final, once decided
    pub fn champion(&self) -> Option<PlayerId> {
        self.final_match().and_then(|m| m.winner)
    }

    pub fn is_complete(&self) -> bool {
        self.champion().is_some()
    }

    /// Human label for a round, counted back from the final
    pub fn round_label(&self, round: usize) -> String {
        let from_end = self.rounds.len().saturating_sub(round + 1);
        match from_end {
            0 => "Final".to_string(),
            1 => "Semifinals".to_string(),
            2 => "Quarterfinals".to_string(),
            _ => {
                let entrants = self.rounds.get(round).map_or(0, |r| r.len() * 2);
                format!("Round of {}", entrants)
            }
        }
    }

    /// Every match downstream of `id`, ordered by (round, order)
    pub fn dependents(&self, id: MatchId) -> Result<Vec<MatchId>> {
        self.position(id)?;

        let mut feeds: FxHashMap<MatchId, Vec<MatchId>> = FxHashMap::default();
        for m in self.matches() {
            for slot in [&m.left, &m.right] {
                if let Slot::WinnerOf { match_id } = slot {
                    feeds.entry(*match_id).or_default().push(m.id);
                }
            }
        }

        let mut affected = FxHashSet::default();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(children) = feeds.get(&current) {
                for &child in children {
                    if affected.insert(child) {
                        stack.push(child);
                    }
                }
            }
        }

        let mut dependents: Vec<MatchId> = affected.into_iter().collect();
        dependents.sort_by_key(|m| self.index.get(m).copied());
        Ok(dependents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(n: u64) -> Vec<PlayerId> {
        (1..=n).map(PlayerId).collect()
    }

    #[test]
    fn test_lookup_by_id() {
        let bracket = Bracket::build(&ids(8)).unwrap();
        for m in bracket.matches() {
            let found = bracket.get(m.id).unwrap();
            assert_eq!(found.round, m.round);
            assert_eq!(found.order, m.order);
        }
        assert!(bracket.get(MatchId(1000)).is_none());
    }

    #[test]
    fn test_round_labels() {
        let bracket = Bracket::build(&ids(16)).unwrap();
        assert_eq!(bracket.round_count(), 4);
        assert_eq!(bracket.round_label(0), "Round of 16");
        assert_eq!(bracket.round_label(1), "Quarterfinals");
        assert_eq!(bracket.round_label(2), "Semifinals");
        assert_eq!(bracket.round_label(3), "Final");
    }

    #[test]
    fn test_dependents_follow_the_path_to_the_final() {
        let bracket = Bracket::build(&ids(8)).unwrap();
        let first = bracket.rounds()[0][0].id;
        let expected = vec![bracket.rounds()[1][0].id, bracket.rounds()[2][0].id];
        assert_eq!(bracket.dependents(first).unwrap(), expected);

        let final_id = bracket.final_match().unwrap().id;
        assert!(bracket.dependents(final_id).unwrap().is_empty());
    }

    #[test]
    fn test_opponents_of_missing_match() {
        let bracket = Bracket::build(&ids(2)).unwrap();
        assert_eq!(
            bracket.opponents(MatchId(7)),
            Err(BracketError::MatchNotFound(MatchId(7)))
        );
    }

    #[test]
    fn test_validate_rejects_winner_of_in_round_zero() {
        let bracket = Bracket::build(&ids(4)).unwrap();
        let mut snapshot = BracketSnapshot::from(bracket);
        snapshot.rounds[0][0].left = Slot::winner_of(MatchId(1));
        assert!(matches!(
            Bracket::from_snapshot(snapshot),
            Err(BracketError::InvariantViolation(_))
        ));
    }

    #[test]
    fn test_validate_rejects_player_in_later_round() {
        let bracket = Bracket::build(&ids(4)).unwrap();
        let mut snapshot = BracketSnapshot::from(bracket);
        snapshot.rounds[1][0].right = Slot::player(PlayerId(3));
        assert!(matches!(
            Bracket::from_snapshot(snapshot),
            Err(BracketError::InvariantViolation(_))
        ));
    }

    #[test]
    fn test_validate_rejects_bad_round_sizes() {
        let bracket = Bracket::build(&ids(8)).unwrap();
        let mut snapshot = BracketSnapshot::from(bracket);
        snapshot.rounds[1].pop();
        assert!(matches!(
            Bracket::from_snapshot(snapshot),
            Err(BracketError::InvariantViolation(_))
        ));
    }

    #[test]
    fn test_validate_rejects_duplicate_ids() {
        let bracket = Bracket::build(&ids(4)).unwrap();
        let mut snapshot = BracketSnapshot::from(bracket);
        snapshot.rounds[0][1].id = snapshot.rounds[0][0].id;
        assert!(matches!(
            Bracket::from_snapshot(snapshot),
            Err(BracketError::InvariantViolation(_))
        ));
    }

    #[test]
    fn test_snapshot_rejects_repeated_player() {
        let bracket = Bracket::build(&ids(4)).unwrap();
        let mut snapshot = BracketSnapshot::from(bracket);
        snapshot.rounds[0][1].left = Slot::player(PlayerId(1));
        snapshot.rounds[0][1].right = Slot::player(PlayerId(2));
        assert_eq!(
            Bracket::from_snapshot(snapshot),
            Err(BracketError::DuplicatePlayer(PlayerId(1)))
        );
    }

    #[test]
    fn test_snapshot_statuses_are_recomputed() {
        let bracket = Bracket::build(&ids(4)).unwrap();
        let mut snapshot = BracketSnapshot::from(bracket.clone());
        for m in snapshot.rounds.iter_mut().flatten() {
            m.status = MatchStatus::Completed;
        }
        let reloaded = Bracket::from_snapshot(snapshot).unwrap();
        assert_eq!(reloaded, bracket);
    }

    #[test]
    fn test_snapshot_drops_foreign_winner() {
        let bracket = Bracket::build(&ids(4)).unwrap();
        let mut snapshot = BracketSnapshot::from(bracket);
        snapshot.rounds[0][0].winner = Some(PlayerId(99));
        let reloaded = Bracket::from_snapshot(snapshot).unwrap();
        assert_eq!(reloaded.rounds()[0][0].winner, None);
        assert_eq!(reloaded.rounds()[0][0].status, MatchStatus::Ready);
    }

    #[test]
    fn test_snapshot_keeps_in_progress_marker() {
        let bracket = Bracket::build(&ids(2)).unwrap();
        let mut snapshot = BracketSnapshot::from(bracket);
        snapshot.rounds[0][0].status = MatchStatus::InProgress;
        snapshot.rounds[0][0].started = false;
        let reloaded = Bracket::from_snapshot(snapshot).unwrap();
        assert_eq!(reloaded.rounds()[0][0].status, MatchStatus::InProgress);
    }
}
