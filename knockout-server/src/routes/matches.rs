//! Match API endpoints
//!
//! Used by the play screen: start a ready match, report its result, or undo
//! a result.

use axum::extract::{Path, State};
use axum::Json;
use knockout_core::{MatchId, PlayerId};
use knockout_tournament::{MatchRecord, TournamentError, TournamentId};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::error::ApiError;
use crate::state::ServerState;
use crate::views::{match_view, MatchView};

/// Mark a ready match as being played
pub async fn start_match(
    State(state): State<Arc<ServerState>>,
    Path((id, match_id)): Path<(u64, u32)>,
) -> Result<Json<MatchView>, ApiError> {
    let mut registry = state.write()?;
    let tournament = registry.get_mut(TournamentId(id))?;
    tournament.start_match(MatchId(match_id))?;

    let bracket = tournament.bracket().ok_or(TournamentError::NotOngoing)?;
    let m = bracket
        .get(MatchId(match_id))
        .ok_or(knockout_core::BracketError::MatchNotFound(MatchId(match_id)))?;
    Ok(Json(match_view(bracket, tournament.participants(), m)))
}

/// Result request: either both scores, or a winner for a walkover
#[derive(Deserialize)]
pub struct ResultRequest {
    #[serde(rename = "scoreP1")]
    pub score_p1: Option<u32>,
    #[serde(rename = "scoreP2")]
    pub score_p2: Option<u32>,
    #[serde(rename = "winnerId")]
    pub winner_id: Option<PlayerId>,
}

/// Report a match result
pub async fn record_result(
    State(state): State<Arc<ServerState>>,
    Path((id, match_id)): Path<(u64, u32)>,
    Json(req): Json<ResultRequest>,
) -> Result<Json<MatchRecord>, ApiError> {
    let mut registry = state.write()?;
    let tournament = registry.get_mut(TournamentId(id))?;
    let match_id = MatchId(match_id);

    let record = match (req.score_p1, req.score_p2, req.winner_id) {
        (Some(left), Some(right), _) => tournament.record_result(match_id, left, right)?,
        (None, None, Some(winner)) => tournament.declare_winner(match_id, winner)?,
        _ => {
            return Err(ApiError::BadRequest(
                "MISSING_SCORES",
                "scoreP1 and scoreP2 should be provided".to_string(),
            ))
        }
    };

    Ok(Json(record))
}

/// Undo a match result and everything downstream of it
pub async fn clear_result(
    State(state): State<Arc<ServerState>>,
    Path((id, match_id)): Path<(u64, u32)>,
) -> Result<Json<Value>, ApiError> {
    let mut registry = state.write()?;
    let cleared = registry
        .get_mut(TournamentId(id))?
        .clear_result(MatchId(match_id))?;
    Ok(Json(json!({ "cleared": cleared })))
}
