use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Html,
    Json,
};
use tracing::{error, info, warn};

use super::models::*;
use super::AppState;
use crate::ranking::{RankingBackend, RankingEntry, RankingError};
use crate::session::SessionError;

const INDEX_HTML: &str = include_str!("../../assets/index.html");
const RANKING_HTML: &str = include_str!("../../assets/ranking.html");

/// Type alias for route handler results.
type RouteResult<T> = Result<Json<T>, (StatusCode, Json<ErrorResponse>)>;

pub async fn game_page() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub async fn ranking_page() -> Html<&'static str> {
    Html(RANKING_HTML)
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

pub async fn get_gamestate<B: RankingBackend + 'static>(
    State(state): State<AppState<B>>,
) -> Json<GameStateResponse> {
    Json(state.session.lock().await.snapshot())
}

pub async fn click<B: RankingBackend + 'static>(
    State(state): State<AppState<B>>,
    Path((row, col)): Path<(usize, usize)>,
) -> RouteResult<ClickResponse> {
    let mut session = state.session.lock().await;
    let outcome = session.toggle_at(row, col).map_err(|err| match err {
        SessionError::Grid(_) => bad_request(&err.to_string()),
        SessionError::Finished(_) => error_response(StatusCode::CONFLICT, &err.to_string()),
    })?;

    if outcome.solved {
        info!(moves = outcome.moves, "board solved");
    }

    Ok(Json(ClickResponse {
        board: *session.grid(),
        moves: outcome.moves,
        win: outcome.solved,
        flipped: outcome.flipped,
        moves_remaining: outcome.remaining,
    }))
}

pub async fn reset<B: RankingBackend + 'static>(
    State(state): State<AppState<B>>,
) -> Json<GameStateResponse> {
    let mut session = state.session.lock().await;
    session.reset();
    Json(session.snapshot())
}

pub async fn get_ranking<B: RankingBackend + 'static>(
    State(state): State<AppState<B>>,
) -> RouteResult<Vec<RankingEntry>> {
    let rankings = state.rankings.clone();
    tokio::task::spawn_blocking(move || rankings.load())
        .await
        .map_err(|e| internal_error(&e.to_string()))?
        .map(Json)
        .map_err(|e| internal_error(&e.to_string()))
}

pub async fn submit_score<B: RankingBackend + 'static>(
    State(state): State<AppState<B>>,
    payload: Result<Json<SubmitScoreRequest>, JsonRejection>,
) -> (StatusCode, Json<SubmitScoreResponse>) {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            warn!(%rejection, "rejected score submission");
            return reject(StatusCode::BAD_REQUEST, "Invalid request body.");
        }
    };
    let (Some(name), Some(moves)) = (request.name, request.moves) else {
        return reject(StatusCode::BAD_REQUEST, "Missing name or moves.");
    };
    let Some(moves) = u32::try_from(moves).ok().filter(|&m| m > 0) else {
        return reject(StatusCode::BAD_REQUEST, "Invalid move count.");
    };

    let rankings = state.rankings.clone();
    let result = tokio::task::spawn_blocking(move || rankings.submit(&name, moves, None)).await;

    match result {
        Ok(Ok(submission)) => (
            StatusCode::OK,
            Json(SubmitScoreResponse {
                success: true,
                message: "Score submitted successfully!".to_string(),
                rank: submission.rank,
            }),
        ),
        Ok(Err(err)) if err.is_rejection() => reject(StatusCode::BAD_REQUEST, &capitalize(&err)),
        Ok(Err(err)) => {
            error!(%err, "error submitting score");
            reject(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to submit score due to a server error.",
            )
        }
        Err(err) => {
            error!(%err, "score submission task failed");
            reject(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to submit score due to a server error.",
            )
        }
    }
}

fn reject(status: StatusCode, message: &str) -> (StatusCode, Json<SubmitScoreResponse>) {
    (status, Json(SubmitScoreResponse::failure(message)))
}

fn capitalize(err: &RankingError) -> String {
    let message = err.to_string();
    let mut chars = message.chars();
    match chars.next() {
        Some(first) => format!("{}{}.", first.to_uppercase(), chars.as_str()),
        None => message,
    }
}

fn error_response(status: StatusCode, msg: &str) -> (StatusCode, Json<ErrorResponse>) {
    (
        status,
        Json(ErrorResponse {
            error: msg.to_string(),
        }),
    )
}

fn bad_request(msg: &str) -> (StatusCode, Json<ErrorResponse>) {
    error_response(StatusCode::BAD_REQUEST, msg)
}

fn internal_error(msg: &str) -> (StatusCode, Json<ErrorResponse>) {
    error!("{}", msg);
    error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
}
