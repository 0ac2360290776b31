//! The 5×5 board and the toggle rule.
//!
//! Toggling a position flips that light and each orthogonal neighbor that
//! exists on the board. Corners flip 3 lights, other edge cells 4, interior
//! cells 5. The board is solved when every light is on.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;

use super::cell::{Cell, Position};

/// Number of rows on the board.
pub const ROWS: usize = 5;

/// Number of columns on the board.
pub const COLS: usize = 5;

/// Errors raised by the grid engine.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GridError {
    /// Coordinates outside `[0, ROWS) × [0, COLS)`.
    #[error("position ({row}, {col}) is outside the 5x5 board")]
    OutOfBounds { row: usize, col: usize },
}

/// The board: a fixed 5×5 array of lights.
///
/// ```
/// use lights_out::core::{Cell, Grid, Position};
///
/// let mut grid = Grid::new();
/// let flipped = grid.toggle(Position::new(0, 0).unwrap());
///
/// assert_eq!(flipped.len(), 3);
/// assert_eq!(grid.lit_count(), 3);
/// assert!(!grid.is_solved());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Grid {
    cells: [[Cell; COLS]; ROWS],
}

impl Grid {
    /// Create a board with every light off.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a board with every light in the same state.
    #[must_use]
    pub fn filled(cell: Cell) -> Self {
        Self {
            cells: [[cell; COLS]; ROWS],
        }
    }

    /// Create a board from explicit rows.
    #[must_use]
    pub const fn from_rows(cells: [[Cell; COLS]; ROWS]) -> Self {
        Self { cells }
    }

    /// The classic starting pattern of the terminal game.
    ///
    /// Two toggles away from solved: `(1, 1)` and `(3, 3)`.
    #[must_use]
    pub const fn classic() -> Self {
        const O: Cell = Cell::On;
        const X: Cell = Cell::Off;
        Self::from_rows([
            [O, X, O, O, O],
            [X, X, X, O, O],
            [O, X, O, X, O],
            [O, O, X, X, X],
            [O, O, O, X, O],
        ])
    }

    /// Get the state of a light.
    #[must_use]
    pub fn cell(&self, position: Position) -> Cell {
        self.cells[position.row()][position.col()]
    }

    /// Set the state of a single light, without touching its neighbors.
    ///
    /// Only used to build boards; play goes through [`Grid::toggle`].
    pub fn set(&mut self, position: Position, cell: Cell) {
        self.cells[position.row()][position.col()] = cell;
    }

    /// Rows of the board, top to bottom.
    #[must_use]
    pub fn rows(&self) -> &[[Cell; COLS]; ROWS] {
        &self.cells
    }

    /// Toggle a position and its orthogonal neighbors.
    ///
    /// Returns the positions that were flipped.
    pub fn toggle(&mut self, position: Position) -> SmallVec<[Position; 5]> {
        let cross = position.cross();
        for &p in &cross {
            let cell = &mut self.cells[p.row()][p.col()];
            *cell = cell.flipped();
        }
        cross
    }

    /// Toggle by raw coordinates, validating them first.
    pub fn toggle_at(&mut self, row: usize, col: usize) -> Result<SmallVec<[Position; 5]>, GridError> {
        let position = Position::new(row, col)?;
        Ok(self.toggle(position))
    }

    /// Check if every light is on.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.cells.iter().flatten().all(|cell| cell.is_on())
    }

    /// Number of lights that are on.
    #[must_use]
    pub fn lit_count(&self) -> usize {
        self.cells.iter().flatten().filter(|cell| cell.is_on()).count()
    }
}
