//! Core engine types: cells, positions, the board, RNG, configuration.
//!
//! This module holds the toggle rule and win detection. It knows nothing
//! about players, move counters or the leaderboard.

pub mod cell;
pub mod grid;
pub mod rng;
pub mod config;

pub use cell::{Cell, Position};
pub use grid::{Grid, GridError, COLS, ROWS};
pub use rng::GameRng;
pub use config::{GameConfig, StartLayout, DEFAULT_SCRAMBLE_TOGGLES};
