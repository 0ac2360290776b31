//! Cell states and board positions.
//!
//! ## Cell
//!
//! A light is either `Off` or `On`. Cells have no identity of their own:
//! they are addressed by their `Position` on the board.
//!
//! ## Position
//!
//! A validated, 0-indexed `(row, col)` pair. Building a `Position` is the
//! only place coordinates are checked, so every `Position` value is on the
//! board and the toggle rule itself cannot fail.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::grid::{GridError, COLS, ROWS};

/// State of a single light.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cell {
    /// Light is off.
    #[default]
    Off,
    /// Light is on.
    On,
}

impl Cell {
    /// The opposite state.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Cell::Off => Cell::On,
            Cell::On => Cell::Off,
        }
    }

    /// Check if the light is on.
    #[must_use]
    pub const fn is_on(self) -> bool {
        matches!(self, Cell::On)
    }
}

/// A position on the board, 0-indexed.
///
/// ```
/// use lights_out::core::Position;
///
/// let centre = Position::new(2, 2).unwrap();
/// assert_eq!(centre.cross().len(), 5);
///
/// assert!(Position::new(5, 0).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawPosition")]
pub struct Position {
    row: usize,
    col: usize,
}

/// Unchecked wire form of a [`Position`].
#[derive(Deserialize)]
struct RawPosition {
    row: usize,
    col: usize,
}

impl TryFrom<RawPosition> for Position {
    type Error = GridError;

    fn try_from(raw: RawPosition) -> Result<Self, Self::Error> {
        Position::new(raw.row, raw.col)
    }
}

impl Position {
    /// Create a position, rejecting coordinates outside the board.
    pub fn new(row: usize, col: usize) -> Result<Self, GridError> {
        if row < ROWS && col < COLS {
            Ok(Self { row, col })
        } else {
            Err(GridError::OutOfBounds { row, col })
        }
    }

    /// Row index (0-based).
    #[must_use]
    pub const fn row(self) -> usize {
        self.row
    }

    /// Column index (0-based).
    #[must_use]
    pub const fn col(self) -> usize {
        self.col
    }

    /// Iterate over every position on the board in row-major order.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..ROWS).flat_map(|row| (0..COLS).map(move |col| Position { row, col }))
    }

    /// The cells affected by toggling this position: itself, then up, down,
    /// left and right where those exist. There is no wraparound.
    #[must_use]
    pub fn cross(self) -> SmallVec<[Position; 5]> {
        let Position { row, col } = self;
        let mut cells = SmallVec::new();
        cells.push(self);
        if row > 0 {
            cells.push(Position { row: row - 1, col });
        }
        if row + 1 < ROWS {
            cells.push(Position { row: row + 1, col });
        }
        if col > 0 {
            cells.push(Position { row, col: col - 1 });
        }
        if col + 1 < COLS {
            cells.push(Position { row, col: col + 1 });
        }
        cells
    }

    /// Check if the position lies in a corner of the board.
    #[must_use]
    pub const fn is_corner(self) -> bool {
        (self.row == 0 || self.row == ROWS - 1) && (self.col == 0 || self.col == COLS - 1)
    }

    /// Check if the position lies on the outer ring of the board.
    #[must_use]
    pub const fn is_edge(self) -> bool {
        self.row == 0 || self.row == ROWS - 1 || self.col == 0 || self.col == COLS - 1
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
