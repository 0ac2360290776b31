//! The leaderboard: load, submit, truncate, rewrite.

use std::io;
use std::sync::{Mutex, PoisonError};

use chrono::NaiveDateTime;
use thiserror::Error;
use tracing::{info, warn};

use super::backend::RankingBackend;
use super::entry::{now_timestamp, sanitize_name, RankingEntry, TIMESTAMP_FORMAT};

/// Number of entries kept by default.
pub const DEFAULT_CAPACITY: usize = 10;

/// Errors raised by the ranking store.
#[derive(Debug, Error)]
pub enum RankingError {
    /// The name was empty after trimming.
    #[error("name must not be empty")]
    EmptyName,

    /// The name contains a character the storage format cannot hold.
    #[error("name must not contain commas or line breaks")]
    UnsupportedName,

    /// Scores must be at least one move.
    #[error("move count must be a positive integer")]
    InvalidMoves,

    /// A supplied timestamp is not in [`TIMESTAMP_FORMAT`].
    #[error("timestamp must look like 2024-01-31 18:05:00")]
    InvalidTimestamp,

    /// The backing storage could not be read or written.
    #[error("ranking storage unavailable: {0}")]
    Storage(#[from] io::Error),
}

impl RankingError {
    /// True for errors caused by the submitted data rather than the storage.
    #[must_use]
    pub fn is_rejection(&self) -> bool {
        !matches!(self, RankingError::Storage(_))
    }
}

/// What a successful submission recorded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Submission {
    /// The entry as stored (sanitized name, resolved timestamp).
    pub entry: RankingEntry,
    /// 1-based place on the leaderboard, or `None` if it did not make the cut.
    pub rank: Option<usize>,
}

/// Size-bounded leaderboard ordered by move count.
///
/// Every call goes back to storage; nothing is cached between calls.
/// Submissions hold a lock across load, update and rewrite, so concurrent
/// submitters never overwrite each other's entries.
///
/// ```
/// use lights_out::ranking::{MemoryBackend, RankingStore};
///
/// let store = RankingStore::new(MemoryBackend::new());
/// store.submit("PlayerA", 10, None).unwrap();
/// store.submit("PlayerB", 5, None).unwrap();
///
/// let names: Vec<_> = store.load().unwrap().into_iter().map(|e| e.name).collect();
/// assert_eq!(names, ["PlayerB", "PlayerA"]);
/// ```
#[derive(Debug)]
pub struct RankingStore<B> {
    backend: B,
    capacity: usize,
    write_lock: Mutex<()>,
}

impl<B: RankingBackend> RankingStore<B> {
    /// Create a store keeping [`DEFAULT_CAPACITY`] entries.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            capacity: DEFAULT_CAPACITY,
            write_lock: Mutex::new(()),
        }
    }

    /// Set the number of entries kept.
    #[must_use]
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Ranking must keep at least 1 entry");
        self.capacity = capacity;
        self
    }

    /// Maximum number of entries kept.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Get the backend.
    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Read all entries, best first.
    ///
    /// Unreadable lines are skipped with a warning. Missing storage reads
    /// as empty and is created on the spot.
    pub fn load(&self) -> Result<Vec<RankingEntry>, RankingError> {
        let Some(contents) = self.backend.read()? else {
            if let Err(err) = self.backend.create_empty() {
                warn!(storage = %self.backend.describe(), %err, "could not create ranking storage");
            }
            return Ok(Vec::new());
        };

        let mut entries: Vec<RankingEntry> = contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .filter_map(|line| match line.parse::<RankingEntry>() {
                Ok(entry) => Some(entry),
                Err(err) => {
                    warn!(%line, %err, "skipping malformed ranking record");
                    None
                }
            })
            .collect();

        entries.sort_by(RankingEntry::rank_cmp);
        Ok(entries)
    }

    /// The best entry, if any.
    pub fn champion(&self) -> Result<Option<RankingEntry>, RankingError> {
        Ok(self.load()?.into_iter().next())
    }

    /// Record a score.
    ///
    /// `timestamp` defaults to the current local time. A supplied one must be
    /// in [`TIMESTAMP_FORMAT`].
    pub fn submit(
        &self,
        name: &str,
        moves: u32,
        timestamp: Option<String>,
    ) -> Result<Submission, RankingError> {
        let name = sanitize_name(name).ok_or(RankingError::EmptyName)?;
        if name.contains([',', '\n', '\r']) {
            return Err(RankingError::UnsupportedName);
        }
        if moves == 0 {
            return Err(RankingError::InvalidMoves);
        }
        let timestamp = match timestamp {
            Some(ts) => {
                NaiveDateTime::parse_from_str(&ts, TIMESTAMP_FORMAT)
                    .map_err(|_| RankingError::InvalidTimestamp)?;
                ts
            }
            None => now_timestamp(),
        };
        let entry = RankingEntry::new(name, moves, timestamp);

        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);

        let mut entries = self.load()?;
        entries.push(entry.clone());
        // Stable: an exact tie keeps the earlier arrival first.
        entries.sort_by(RankingEntry::rank_cmp);
        entries.truncate(self.capacity);

        let rank = entries
            .iter()
            .rposition(|e| *e == entry)
            .map(|index| index + 1);

        let contents: String = entries
            .iter()
            .map(|e| format!("{}\n", e.to_record()))
            .collect();
        self.backend.replace(&contents)?;

        info!(name = %entry.name, moves, ?rank, "score submitted");
        Ok(Submission { entry, rank })
    }
}
