//! Tournament error types

use knockout_core::{BracketError, MatchId};

use crate::tournament::{TournamentId, TournamentStatus};

/// Errors returned by tournament operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TournamentError {
    #[error("tournament should have a title")]
    BadTitle,

    #[error("a tournament needs room for at least 2 players, got {0}")]
    BadMaxPlayers(usize),

    #[error("tournament {0} not found")]
    NotFound(TournamentId),

    #[error("tournament not in registration")]
    NotInRegistration,

    #[error("tournament already full")]
    TournamentFull,

    #[error("tournament is not ongoing")]
    NotOngoing,

    #[error("tournament is already {0}")]
    Closed(TournamentStatus),

    #[error("draws are not allowed")]
    DrawNotAllowed,

    #[error("result already submitted for match {0}")]
    AlreadyReported(MatchId),

    #[error("players of match {0} not set yet")]
    MatchNotReady(MatchId),

    #[error("results have been recorded, the bracket can no longer be reseeded")]
    ResultsRecorded,

    #[error(transparent)]
    Bracket(#[from] BracketError),
}

impl TournamentError {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            TournamentError::BadTitle => "BAD_TITLE",
            TournamentError::BadMaxPlayers(_) => "BAD_MAX_PLAYERS",
            TournamentError::NotFound(_) => "TOURNAMENT_NOT_FOUND",
            TournamentError::NotInRegistration => "NOT_IN_REGISTRATION",
            TournamentError::TournamentFull => "TOURNAMENT_FULL",
            TournamentError::NotOngoing => "NOT_ONGOING",
            TournamentError::Closed(_) => "TOURNAMENT_CLOSED",
            TournamentError::DrawNotAllowed => "DRAW_NOT_ALLOWED",
            TournamentError::AlreadyReported(_) => "ALREADY_REPORTED",
            TournamentError::MatchNotReady(_) => "MATCH_NOT_READY",
            TournamentError::ResultsRecorded => "RESULTS_RECORDED",
            TournamentError::Bracket(err) => match err {
                BracketError::InvalidRosterSize { .. } => "BAD_ROSTER",
                BracketError::DuplicatePlayer(_) => "BAD_ROSTER",
                BracketError::MatchNotFound(_) => "MATCH_NOT_FOUND",
                BracketError::InvalidWinner { .. } => "INVALID_WINNER",
                BracketError::NotReady { .. } => "MATCH_NOT_READY",
                BracketError::InvariantViolation(_) => "INVARIANT_VIOLATION",
            },
        }
    }
}
