//! Ranking entries and their one-line text format.
//!
//! Each entry is stored as `name,moves,timestamp`. There is no header and
//! no escaping, so names may not contain commas or line breaks.

use std::cmp::Ordering;
use std::str::FromStr;

use chrono::Local;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Longest name kept, in characters.
pub const MAX_NAME_CHARS: usize = 50;

/// Timestamp format. Lexicographic order matches chronological order.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Why a stored line could not be read back.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseRecordError {
    #[error("expected 3 comma-separated fields, found {0}")]
    FieldCount(usize),

    #[error("move count {0:?} is not a positive integer")]
    Moves(String),

    #[error("name is empty")]
    EmptyName,

    #[error("name is {0} characters long, the limit is 50")]
    NameTooLong(usize),
}

/// One leaderboard line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingEntry {
    pub name: String,
    pub moves: u32,
    #[serde(rename = "date")]
    pub timestamp: String,
}

impl RankingEntry {
    /// Create an entry. Names are expected to be sanitized already.
    pub fn new(name: impl Into<String>, moves: u32, timestamp: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            moves,
            timestamp: timestamp.into(),
        }
    }

    /// Leaderboard order: fewer moves first, then the earlier timestamp.
    #[must_use]
    pub fn rank_cmp(&self, other: &Self) -> Ordering {
        self.moves
            .cmp(&other.moves)
            .then_with(|| self.timestamp.cmp(&other.timestamp))
    }

    /// The stored form, without the trailing newline.
    #[must_use]
    pub fn to_record(&self) -> String {
        format!("{},{},{}", self.name, self.moves, self.timestamp)
    }
}

impl FromStr for RankingEntry {
    type Err = ParseRecordError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = line.split(',').collect();
        let [name, moves, timestamp] = fields.as_slice() else {
            return Err(ParseRecordError::FieldCount(fields.len()));
        };

        let moves = match moves.trim().parse::<u32>() {
            Ok(moves) if moves > 0 => moves,
            _ => return Err(ParseRecordError::Moves(moves.to_string())),
        };
        let name = name.trim();
        if name.is_empty() {
            return Err(ParseRecordError::EmptyName);
        }
        let chars = name.chars().count();
        if chars > MAX_NAME_CHARS {
            return Err(ParseRecordError::NameTooLong(chars));
        }

        Ok(Self::new(name, moves, timestamp.trim()))
    }
}

/// Trim a name and cut it to [`MAX_NAME_CHARS`] characters.
///
/// Returns `None` when nothing is left after trimming.
#[must_use]
pub fn sanitize_name(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.chars().take(MAX_NAME_CHARS).collect())
}

/// The current local time in [`TIMESTAMP_FORMAT`].
#[must_use]
pub fn now_timestamp() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}
