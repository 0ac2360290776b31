//! Persisted leaderboard.
//!
//! ## Storage format
//!
//! Plain text, one entry per line: `name,moves,timestamp`. Lines that do not
//! have exactly three fields, or whose move count is not a positive integer,
//! are skipped when reading.
//!
//! ## Writes
//!
//! A submission reloads the current list, appends the new entry, re-sorts,
//! truncates to the store's capacity and replaces the whole file. The
//! replacement is atomic, and submissions are serialized by a lock.

mod backend;
mod entry;
mod store;

pub use backend::{FileBackend, MemoryBackend, RankingBackend};
pub use entry::{
    now_timestamp, sanitize_name, ParseRecordError, RankingEntry, MAX_NAME_CHARS, TIMESTAMP_FORMAT,
};
pub use store::{RankingError, RankingStore, Submission, DEFAULT_CAPACITY};
