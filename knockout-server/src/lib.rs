//! Knockout Server - HTTP API for tournaments
//!
//! This crate provides the web backend:
//! - REST API for tournament registration and seeding
//! - Bracket, ready-queue and standings views
//! - Match start and result reporting
//! - Static file serving for the front end

mod error;
mod routes;
mod state;
mod views;

use axum::routing::{get, post, put};
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

pub use error::ApiError;
pub use state::ServerState;

/// Server configuration
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub port: u16,
    pub static_dir: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8002,
            static_dir: "frontend/dist".to_string(),
        }
    }
}

/// Create the router with all routes
pub fn create_router(config: &ServerConfig, state: Arc<ServerState>) -> Router {
    let static_service = ServeDir::new(&config.static_dir);

    Router::new()
        // Status endpoint
        .route("/api/status", get(routes::status::status_handler))
        // Tournaments
        .route(
            "/api/tournaments",
            get(routes::tournaments::list_tournaments).post(routes::tournaments::create_tournament),
        )
        .route(
            "/api/tournaments/:id",
            get(routes::tournaments::get_tournament_details),
        )
        .route(
            "/api/tournaments/:id/join",
            post(routes::tournaments::join_tournament),
        )
        .route(
            "/api/tournaments/:id/start",
            post(routes::tournaments::start_tournament),
        )
        .route(
            "/api/tournaments/:id/reseed",
            post(routes::tournaments::reseed_tournament),
        )
        .route(
            "/api/tournaments/:id/cancel",
            post(routes::tournaments::cancel_tournament),
        )
        // Bracket views
        .route(
            "/api/tournaments/:id/bracket",
            get(routes::tournaments::get_bracket),
        )
        .route(
            "/api/tournaments/:id/ready",
            get(routes::tournaments::get_ready_matches),
        )
        .route(
            "/api/tournaments/:id/standings",
            get(routes::tournaments::get_standings),
        )
        // Matches
        .route(
            "/api/tournaments/:id/matches/:match_id/start",
            post(routes::matches::start_match),
        )
        .route(
            "/api/tournaments/:id/matches/:match_id/result",
            put(routes::matches::record_result).delete(routes::matches::clear_result),
        )
        // Shared state
        .with_state(state)
        .layer(CorsLayer::permissive())
        // Static file serving (must be last)
        .fallback_service(static_service)
}

/// Start the HTTP server
pub async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let state = Arc::new(ServerState::new());
    let router = create_router(&config, state);

    tracing::info!("Knockout server starting on http://0.0.0.0:{}", config.port);
    tracing::info!("Static files served from: {}", config.static_dir);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
