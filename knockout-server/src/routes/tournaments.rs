//! Tournament API endpoints
//!
//! Registration, seeding and the read views over a tournament's bracket.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use knockout_core::{Player, PlayerId};
use knockout_tournament::{
    Seeding, Standing, Tournament, TournamentConfig, TournamentError, TournamentId,
    TournamentStatus,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::error::ApiError;
use crate::state::ServerState;
use crate::views::{
    bracket_view, ready_view, BracketView, ReadyView, TournamentDetails, TournamentSummary,
};

const MAX_PAGE: usize = 100;

/// List query params
#[derive(Deserialize)]
pub struct ListParams {
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

#[derive(Serialize)]
pub struct ListResponse {
    pub tournaments: Vec<TournamentSummary>,
    pub limit: usize,
    pub offset: usize,
}

/// List tournaments, newest first
pub async fn list_tournaments(
    State(state): State<Arc<ServerState>>,
    Query(params): Query<ListParams>,
) -> Result<Json<ListResponse>, ApiError> {
    let limit = params.limit.unwrap_or(50);
    let offset = params.offset.unwrap_or(0);
    if limit == 0 || limit > MAX_PAGE {
        return Err(ApiError::BadRequest(
            "BAD_LIMIT",
            format!("limit must be between 1 and {}", MAX_PAGE),
        ));
    }

    let registry = state.read()?;
    let tournaments = registry
        .list(limit, offset)
        .into_iter()
        .map(TournamentSummary::from)
        .collect();

    Ok(Json(ListResponse {
        tournaments,
        limit,
        offset,
    }))
}

/// Create request
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRequest {
    pub owner_id: PlayerId,
    pub title: String,
    pub description: Option<String>,
    pub max_players: Option<usize>,
    #[serde(default)]
    pub shuffle: bool,
    pub seed: Option<u64>,
}

impl CreateRequest {
    fn config(&self) -> TournamentConfig {
        let mut config = TournamentConfig::default();
        if let Some(max_players) = self.max_players {
            config = config.with_max_players(max_players);
        }
        if self.shuffle {
            config = config.with_seeding(Seeding::Shuffled { seed: self.seed });
        }
        config
    }
}

/// Open a tournament for registration
pub async fn create_tournament(
    State(state): State<Arc<ServerState>>,
    Json(req): Json<CreateRequest>,
) -> Result<(StatusCode, Json<TournamentSummary>), ApiError> {
    let config = req.config();
    let mut registry = state.write()?;
    let tournament = registry.create(req.owner_id, &req.title, req.description.clone(), &config)?;
    Ok((StatusCode::CREATED, Json(TournamentSummary::from(tournament))))
}

/// Tournament with its participants
pub async fn get_tournament_details(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<u64>,
) -> Result<Json<TournamentDetails>, ApiError> {
    let registry = state.read()?;
    let tournament = registry.get(TournamentId(id))?;
    Ok(Json(TournamentDetails {
        tournament: TournamentSummary::from(tournament),
        participants: tournament.participants().players().to_vec(),
    }))
}

/// Register a player
pub async fn join_tournament(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<u64>,
    Json(player): Json<Player>,
) -> Result<Json<Value>, ApiError> {
    let mut registry = state.write()?;
    let joined = registry.get_mut(TournamentId(id))?.join(player)?;
    Ok(Json(json!({ "success": true, "joined": joined })))
}

/// Close registration and seed the bracket
pub async fn start_tournament(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<u64>,
) -> Result<Json<BracketView>, ApiError> {
    let mut registry = state.write()?;
    let tournament = registry.get_mut(TournamentId(id))?;
    tournament.start()?;
    seeded_view(tournament)
}

/// Redraw the bracket before any result is in
pub async fn reseed_tournament(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<u64>,
) -> Result<Json<BracketView>, ApiError> {
    let mut registry = state.write()?;
    let tournament = registry.get_mut(TournamentId(id))?;
    tournament.reseed()?;
    seeded_view(tournament)
}

/// Abandon a tournament
pub async fn cancel_tournament(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<u64>,
) -> Result<Json<TournamentSummary>, ApiError> {
    let mut registry = state.write()?;
    let tournament = registry.get_mut(TournamentId(id))?;
    tournament.cancel()?;
    Ok(Json(TournamentSummary::from(&*tournament)))
}

/// Full bracket with resolved opponents
pub async fn get_bracket(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<u64>,
) -> Result<Json<BracketView>, ApiError> {
    let registry = state.read()?;
    seeded_view(registry.get(TournamentId(id))?)
}

/// Matches that can be started now; empty unless the tournament is ongoing
pub async fn get_ready_matches(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<u64>,
) -> Result<Json<Vec<ReadyView>>, ApiError> {
    let registry = state.read()?;
    let tournament = registry.get(TournamentId(id))?;
    let bracket = match tournament.bracket() {
        Some(bracket) if tournament.status == TournamentStatus::Ongoing => bracket,
        _ => return Ok(Json(Vec::new())),
    };

    let ready = bracket
        .ready_pairings()
        .iter()
        .map(|pairing| ready_view(bracket, tournament.participants(), pairing))
        .collect();
    Ok(Json(ready))
}

/// Current standings
pub async fn get_standings(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<u64>,
) -> Result<Json<Vec<Standing>>, ApiError> {
    let registry = state.read()?;
    Ok(Json(registry.get(TournamentId(id))?.standings()))
}

fn seeded_view(tournament: &Tournament) -> Result<Json<BracketView>, ApiError> {
    let bracket = tournament.bracket().ok_or(TournamentError::NotOngoing)?;
    Ok(Json(bracket_view(bracket, tournament.participants())))
}
