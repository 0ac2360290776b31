use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{Grid, Position};
use crate::session::BoardSnapshot;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Board plus counters, as returned by `/api/gamestate` and `/api/reset`.
pub type GameStateResponse = BoardSnapshot;

#[derive(Debug, Serialize, Deserialize)]
pub struct ClickResponse {
    pub board: Grid,
    pub moves: u32,
    pub win: bool,
    pub flipped: SmallVec<[Position; 5]>,
    pub moves_remaining: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct SubmitScoreRequest {
    pub name: Option<String>,
    pub moves: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitScoreResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank: Option<usize>,
}

impl SubmitScoreResponse {
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            rank: None,
        }
    }
}
