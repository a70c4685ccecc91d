//! Status endpoint: liveness plus a summary of the registry

use axum::extract::State;
use axum::Json;
use knockout_tournament::TournamentStatus;
use serde::Serialize;
use std::sync::Arc;

use crate::error::ApiError;
use crate::state::ServerState;

#[derive(Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub engine: &'static str,
    pub tournaments: usize,
    pub open: usize,
    pub ongoing: usize,
}

pub async fn status_handler(
    State(state): State<Arc<ServerState>>,
) -> Result<Json<StatusResponse>, ApiError> {
    let registry = state.read()?;
    Ok(Json(StatusResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        engine: "single-elimination",
        tournaments: registry.len(),
        open: registry.count_with_status(TournamentStatus::Registration),
        ongoing: registry.count_with_status(TournamentStatus::Ongoing),
    }))
}
