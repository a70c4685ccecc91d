//! Error taxonomy for bracket operations

use crate::bracket::{MatchId, MatchStatus};
use crate::roster::PlayerId;

/// Errors returned by bracket construction, loading and mutation
///
/// Every failing operation leaves the bracket exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BracketError {
    #[error("a bracket needs at least 2 players, got {count}")]
    InvalidRosterSize { count: usize },

    #[error("player {0} appears more than once in the roster")]
    DuplicatePlayer(PlayerId),

    #[error("match {0} not found")]
    MatchNotFound(MatchId),

    #[error("player {player_id} cannot be recorded as winner of match {match_id}")]
    InvalidWinner { match_id: MatchId, player_id: PlayerId },

    #[error("match {match_id} is {status}, only ready matches can start")]
    NotReady { match_id: MatchId, status: MatchStatus },

    #[error("bracket invariant violated: {0}")]
    InvariantViolation(String),
}

pub type Result<T> = std::result::Result<T, BracketError>;
