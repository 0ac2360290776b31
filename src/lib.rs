//! # lights-out
//!
//! The Lights Out puzzle: a 5×5 board of lights where choosing a light
//! toggles it and its orthogonal neighbors. The goal is to turn every light
//! on in as few moves as possible.
//!
//! ## Design Principles
//!
//! 1. **One Toggle Rule**: The terminal and web games share `core::Grid`.
//!    Coordinates are 0-based everywhere.
//!
//! 2. **Explicit Sessions**: No global board. A `Session` owns its grid,
//!    move counter and move budget.
//!
//! 3. **Full-Rewrite Leaderboard**: Every submission reloads, re-sorts,
//!    truncates and atomically rewrites the ranking file, under a lock.
//!
//! ## Modules
//!
//! - `core`: Cells, positions, the board, RNG, configuration
//! - `session`: Move counting, budgets, reset, snapshots
//! - `ranking`: Persisted, size-bounded leaderboard
//! - `terminal`: Menu-driven colored terminal game
//! - `web`: HTTP/JSON API and pages

pub mod core;
pub mod session;
pub mod ranking;
pub mod terminal;
pub mod web;

// Re-export commonly used types
pub use crate::core::{
    Cell, Position, Grid, GridError, COLS, ROWS,
    GameRng, GameConfig, StartLayout,
};

pub use crate::session::{BoardSnapshot, MoveOutcome, Session, SessionError, SessionStatus};

pub use crate::ranking::{
    FileBackend, MemoryBackend, RankingBackend,
    RankingEntry, RankingError, RankingStore, Submission,
};
