//! Status derivation and bye propagation
//!
//! Statuses are never authoritative: they are recomputed from recorded
//! winners, resolved slots and the started marker. Matches are visited in
//! (round, order) order so a round always sees the fresh state of the round
//! that feeds it.

use crate::bracket::{Bracket, Match, MatchStatus};
use crate::slot::Resolved;

impl Bracket {
    /// Recompute every match status
    ///
    /// Total and idempotent. Priority: recorded winner, then two concrete
    /// players (ready, or in progress once started), then a vacant bye-vs-bye
    /// match, otherwise pending.
    pub fn refresh_statuses(&mut self) {
        for r in 0..self.rounds.len() {
            for o in 0..self.rounds[r].len() {
                let (left, right) = self.resolve_sides(&self.rounds[r][o]);
                let m = &mut self.rounds[r][o];
                m.status = derive_status(m, left, right);
            }
        }
    }

    /// Auto-complete matches where a player faces an explicit bye
    ///
    /// Repeats full scans until one pass changes nothing. `Unresolved` never
    /// counts as a bye. Returns the number of scans performed, which never
    /// exceeds the match count.
    pub fn advance_byes(&mut self) -> usize {
        let limit = self.match_count().max(1);
        let mut passes = 0;

        loop {
            passes += 1;
            let mut advanced = 0;

            for r in 0..self.rounds.len() {
                for o in 0..self.rounds[r].len() {
                    if self.rounds[r][o].winner.is_some() {
                        continue;
                    }
                    let winner = match self.resolve_sides(&self.rounds[r][o]) {
                        (Resolved::Player(id), Resolved::Bye) | (Resolved::Bye, Resolved::Player(id)) => id,
                        _ => continue,
                    };

                    let m = &mut self.rounds[r][o];
                    m.winner = Some(winner);
                    m.status = MatchStatus::Completed;
                    advanced += 1;
                    tracing::debug!("Match {} auto-advanced player {} past a bye", m.id, winner);
                }
            }

            if advanced == 0 || passes >= limit {
                break;
            }
        }

        passes
    }

    /// Run status derivation and bye propagation to quiescence
    pub fn settle(&mut self) {
        self.refresh_statuses();
        self.advance_byes();
        self.refresh_statuses();
    }
}

fn derive_status(m: &mut Match, left: Resolved, right: Resolved) -> MatchStatus {
    if m.winner.is_some() {
        return MatchStatus::Completed;
    }

    match (left, right) {
        (Resolved::Player(_), Resolved::Player(_)) => {
            if m.started {
                MatchStatus::InProgress
            } else {
                MatchStatus::Ready
            }
        }
        (Resolved::Bye, Resolved::Bye) => {
            m.started = false;
            MatchStatus::Completed
        }
        _ => {
            m.started = false;
            MatchStatus::Pending
        }
    }
}
