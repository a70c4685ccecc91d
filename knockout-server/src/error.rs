//! API error responses
//!
//! Every failure is reported as `{ "code": ..., "message": ... }` with a
//! status derived from the code.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use knockout_core::BracketError;
use knockout_tournament::TournamentError;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Tournament(#[from] TournamentError),

    #[error("{1}")]
    BadRequest(&'static str, String),

    #[error("{0}")]
    Internal(String),
}

impl From<BracketError> for ApiError {
    fn from(err: BracketError) -> Self {
        ApiError::Tournament(err.into())
    }
}

impl ApiError {
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Tournament(err) => err.code(),
            ApiError::BadRequest(code, _) => *code,
            ApiError::Internal(_) => "INTERNAL",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self.code() {
            "TOURNAMENT_NOT_FOUND" | "MATCH_NOT_FOUND" => StatusCode::NOT_FOUND,
            "ALREADY_REPORTED" | "NOT_ONGOING" | "TOURNAMENT_CLOSED" | "RESULTS_RECORDED" => {
                StatusCode::CONFLICT
            }
            "INVARIANT_VIOLATION" | "INTERNAL" => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::warn!("Request failed: {}", self);
        }
        let body = json!({
            "code": self.code(),
            "message": self.to_string(),
        });
        (status, Json(body)).into_response()
    }
}
