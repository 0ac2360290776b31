//! Web front end.
//!
//! One shared game served over HTTP with a JSON API, plus a game page and a
//! ranking page. Coordinates in `/api/click/{row}/{col}` are 0-based.

mod models;
mod routes;

use std::sync::Arc;

use axum::{routing::get, routing::post, Router};
use tokio::net::TcpListener;
use tokio::sync::Mutex;

pub use models::{
    ClickResponse, ErrorResponse, GameStateResponse, HealthResponse, SubmitScoreRequest,
    SubmitScoreResponse,
};

use crate::ranking::{RankingBackend, RankingStore};
use crate::session::Session;

/// Shared state of the web server.
pub struct AppState<B> {
    session: Arc<Mutex<Session>>,
    rankings: Arc<RankingStore<B>>,
}

impl<B> Clone for AppState<B> {
    fn clone(&self) -> Self {
        Self {
            session: Arc::clone(&self.session),
            rankings: Arc::clone(&self.rankings),
        }
    }
}

impl<B: RankingBackend> AppState<B> {
    pub fn new(session: Session, rankings: RankingStore<B>) -> Self {
        Self {
            session: Arc::new(Mutex::new(session)),
            rankings: Arc::new(rankings),
        }
    }

    /// The ranking store behind the server.
    #[must_use]
    pub fn rankings(&self) -> &RankingStore<B> {
        &self.rankings
    }
}

/// Build the router with every page and API route.
pub fn router<B: RankingBackend + 'static>(state: AppState<B>) -> Router {
    Router::new()
        .route("/", get(routes::game_page))
        .route("/ranking", get(routes::ranking_page))
        .route("/api/health", get(routes::health))
        .route("/api/gamestate", get(routes::get_gamestate::<B>))
        .route("/api/click/{row}/{col}", get(routes::click::<B>))
        .route("/api/reset", get(routes::reset::<B>))
        .route("/api/ranking", get(routes::get_ranking::<B>))
        .route("/api/submit_score", post(routes::submit_score::<B>))
        .with_state(state)
}

/// Serve until Ctrl+C.
pub async fn serve<B: RankingBackend + 'static>(
    listener: TcpListener,
    state: AppState<B>,
) -> std::io::Result<()> {
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(%err, "failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down server...");
}
