//! Winner registry - the only way to mutate a bracket
//!
//! Every operation validates before touching anything, so a rejected call
//! leaves the bracket unchanged. Successful calls end with the bracket settled.

use crate::bracket::{Bracket, MatchId, MatchStatus};
use crate::error::{BracketError, Result};
use crate::roster::PlayerId;
use crate::slot::Resolved;

impl Bracket {
    /// Record the winner of a ready or in-progress match
    pub fn set_winner(&mut self, match_id: MatchId, player_id: PlayerId) -> Result<()> {
        let m = self
            .get(match_id)
            .ok_or(BracketError::MatchNotFound(match_id))?;

        let playable = matches!(m.status, MatchStatus::Ready | MatchStatus::InProgress);
        let (left, right) = self.resolve_sides(m);
        let contender = left == Resolved::Player(player_id) || right == Resolved::Player(player_id);
        if !playable || !contender {
            return Err(BracketError::InvalidWinner {
                match_id,
                player_id,
            });
        }

        self.match_mut(match_id)?.winner = Some(player_id);
        tracing::debug!("Match {} won by player {}", match_id, player_id);

        self.settle();
        Ok(())
    }

    /// Clear the winner of a match
    ///
    /// A downstream winner is cleared too once its match no longer resolves
    /// to that player facing another player or a bye. Returns the ids of every
    /// match whose winner changed, in (round, order) order. A match without a
    /// winner is left alone, and a match decided by a bye is re-advanced
    /// straight away, so clearing either changes nothing.
    pub fn clear_winner(&mut self, match_id: MatchId) -> Result<Vec<MatchId>> {
        let dependents = self.dependents(match_id)?;
        let Some(previous) = self.match_mut(match_id)?.winner.take() else {
            return Ok(Vec::new());
        };
        self.settle();

        let mut cleared = Vec::new();
        if self.get(match_id).and_then(|m| m.winner) != Some(previous) {
            cleared.push(match_id);
        }

        for id in dependents {
            let m = self.get(id).ok_or(BracketError::MatchNotFound(id))?;
            let Some(winner) = m.winner else { continue };
            let (left, right) = self.resolve_sides(m);
            if !winner_stands(winner, left, right) {
                self.match_mut(id)?.winner = None;
                cleared.push(id);
            }
        }

        if !cleared.is_empty() {
            tracing::debug!("Cleared winners of matches {:?}", cleared);
            self.settle();
        }
        Ok(cleared)
    }

    /// Mark a ready match as started
    pub fn mark_in_progress(&mut self, match_id: MatchId) -> Result<()> {
        let m = self.match_mut(match_id)?;
        if m.status != MatchStatus::Ready {
            return Err(BracketError::NotReady {
                match_id,
                status: m.status,
            });
        }

        m.started = true;
        m.status = MatchStatus::InProgress;
        tracing::debug!("Match {} in progress", match_id);
        Ok(())
    }
}

/// A recorded winner is kept only while its match could still have produced it
fn winner_stands(winner: PlayerId, left: Resolved, right: Resolved) -> bool {
    match (left, right) {
        (Resolved::Player(a), Resolved::Player(b)) => winner == a || winner == b,
        (Resolved::Player(a), Resolved::Bye) | (Resolved::Bye, Resolved::Player(a)) => winner == a,
        _ => false,
    }
}
