//! Game configuration types.
//!
//! Front ends configure a session at startup by providing:
//! - `StartLayout`: which board the game starts (and resets) from
//! - `GameConfig`: the layout plus an optional move budget
//!
//! The grid size is fixed; only the starting lights and the budget vary.

use serde::{Deserialize, Serialize};

use super::cell::Cell;
use super::grid::Grid;
use super::rng::GameRng;

/// Default number of random toggles applied to a scrambled board.
pub const DEFAULT_SCRAMBLE_TOGGLES: u32 = 12;

/// Which board a session starts from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StartLayout {
    /// Every light off.
    #[default]
    AllOff,
    /// The fixed pattern of the terminal game.
    Classic,
    /// Start from a solved board and apply `toggles` random toggles.
    ///
    /// Always solvable, never solved at the start, and reproducible from
    /// the seed. Extra toggles are drawn while the toggles cancel out.
    Scrambled { seed: u64, toggles: u32 },
}

impl StartLayout {
    /// Scrambled layout with the default toggle count.
    #[must_use]
    pub const fn scrambled(seed: u64) -> Self {
        StartLayout::Scrambled {
            seed,
            toggles: DEFAULT_SCRAMBLE_TOGGLES,
        }
    }

    /// Build the starting board for this layout.
    #[must_use]
    pub fn build(self) -> Grid {
        match self {
            StartLayout::AllOff => Grid::new(),
            StartLayout::Classic => Grid::classic(),
            StartLayout::Scrambled { seed, toggles } => {
                let mut rng = GameRng::new(seed);
                let mut grid = Grid::filled(Cell::On);
                for _ in 0..toggles {
                    grid.toggle(rng.gen_position());
                }
                while grid.is_solved() {
                    grid.toggle(rng.gen_position());
                }
                grid
            }
        }
    }
}

impl std::fmt::Display for StartLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StartLayout::AllOff => write!(f, "all off"),
            StartLayout::Classic => write!(f, "classic"),
            StartLayout::Scrambled { seed, toggles } => {
                write!(f, "scrambled (seed {seed}, {toggles} toggles)")
            }
        }
    }
}

/// Complete session configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Board the session starts and resets from.
    pub layout: StartLayout,

    /// Maximum number of moves. `None` for unlimited.
    pub move_limit: Option<u32>,
}

impl GameConfig {
    /// Create a configuration with the given layout and no move budget.
    #[must_use]
    pub fn new(layout: StartLayout) -> Self {
        Self {
            layout,
            move_limit: None,
        }
    }

    /// Set the starting layout.
    #[must_use]
    pub fn with_layout(mut self, layout: StartLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Set the move budget.
    #[must_use]
    pub fn with_move_limit(mut self, limit: u32) -> Self {
        self.move_limit = Some(limit);
        self
    }
}
