//! A single game: one board, its move counter and its move budget.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;
use tracing::debug;

use crate::core::{GameConfig, Grid, GridError, Position};

/// Errors raised when playing a session.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The requested position is not on the board.
    #[error(transparent)]
    Grid(#[from] GridError),

    /// The game is over; reset before playing again.
    #[error("the game is already {0}")]
    Finished(SessionStatus),
}

/// Where a session stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// Moves can still be played.
    InProgress,
    /// Every light is on.
    Solved,
    /// The move budget ran out before the board was solved.
    OutOfMoves,
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionStatus::InProgress => write!(f, "in progress"),
            SessionStatus::Solved => write!(f, "solved"),
            SessionStatus::OutOfMoves => write!(f, "out of moves"),
        }
    }
}

/// Result of a single move.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MoveOutcome {
    /// Positions whose lights were flipped.
    pub flipped: SmallVec<[Position; 5]>,
    /// Moves played so far, including this one.
    pub moves: u32,
    /// Whether this move solved the board.
    pub solved: bool,
    /// Moves left in the budget, if there is one.
    pub remaining: Option<u32>,
}

/// Serializable view of a session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub board: Grid,
    pub moves: u32,
    pub solved: bool,
    pub moves_remaining: Option<u32>,
}

/// A game session.
///
/// ```
/// use lights_out::core::{GameConfig, Position, StartLayout};
/// use lights_out::session::Session;
///
/// let mut session = Session::new(GameConfig::new(StartLayout::Classic));
/// session.toggle(Position::new(1, 1).unwrap()).unwrap();
/// let outcome = session.toggle(Position::new(3, 3).unwrap()).unwrap();
///
/// assert!(outcome.solved);
/// assert_eq!(outcome.moves, 2);
/// ```
#[derive(Clone, Debug)]
pub struct Session {
    config: GameConfig,
    initial: Grid,
    grid: Grid,
    moves: u32,
}

impl Session {
    /// Start a session from the configured layout.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        let initial = config.layout.build();
        Self {
            config,
            initial,
            grid: initial,
            moves: 0,
        }
    }

    /// Get the configuration.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Current board.
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Moves played since the last reset.
    #[must_use]
    pub fn moves(&self) -> u32 {
        self.moves
    }

    /// Moves left in the budget, or `None` when unlimited.
    #[must_use]
    pub fn remaining(&self) -> Option<u32> {
        self.config
            .move_limit
            .map(|limit| limit.saturating_sub(self.moves))
    }

    /// Current status.
    #[must_use]
    pub fn status(&self) -> SessionStatus {
        if self.grid.is_solved() {
            SessionStatus::Solved
        } else if self.remaining() == Some(0) {
            SessionStatus::OutOfMoves
        } else {
            SessionStatus::InProgress
        }
    }

    /// Play a move.
    pub fn toggle(&mut self, position: Position) -> Result<MoveOutcome, SessionError> {
        match self.status() {
            SessionStatus::InProgress => {}
            finished => return Err(SessionError::Finished(finished)),
        }

        let flipped = self.grid.toggle(position);
        self.moves += 1;
        let solved = self.grid.is_solved();
        debug!(%position, moves = self.moves, solved, "toggled");

        Ok(MoveOutcome {
            flipped,
            moves: self.moves,
            solved,
            remaining: self.remaining(),
        })
    }

    /// Play a move by raw coordinates.
    pub fn toggle_at(&mut self, row: usize, col: usize) -> Result<MoveOutcome, SessionError> {
        let position = Position::new(row, col)?;
        self.toggle(position)
    }

    /// Return to the starting board and zero the counter.
    pub fn reset(&mut self) {
        self.grid = self.initial;
        self.moves = 0;
    }

    /// Capture the session for display or serialization.
    #[must_use]
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            board: self.grid,
            moves: self.moves,
            solved: self.grid.is_solved(),
            moves_remaining: self.remaining(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Cell, StartLayout};

    fn pos(row: usize, col: usize) -> Position {
        Position::new(row, col).unwrap()
    }

    #[test]
    fn test_new_session() {
        let session = Session::new(GameConfig::default());
        assert_eq!(session.moves(), 0);
        assert_eq!(session.grid(), &Grid::new());
        assert_eq!(session.status(), SessionStatus::InProgress);
        assert_eq!(session.remaining(), None);
    }

    #[test]
    fn test_toggle_counts_moves() {
        let mut session = Session::new(GameConfig::default());

        let outcome = session.toggle(pos(2, 2)).unwrap();
        assert_eq!(outcome.moves, 1);
        assert_eq!(outcome.flipped.len(), 5);
        assert!(!outcome.solved);

        session.toggle(pos(0, 0)).unwrap();
        assert_eq!(session.moves(), 2);
    }

    #[test]
    fn test_out_of_range_does_not_count() {
        let mut session = Session::new(GameConfig::default());

        let err = session.toggle_at(5, 5).unwrap_err();
        assert_eq!(err, SessionError::Grid(GridError::OutOfBounds { row: 5, col: 5 }));
        assert_eq!(session.moves(), 0);
    }

    #[test]
    fn test_solving_classic() {
        let mut session = Session::new(GameConfig::new(StartLayout::Classic));

        session.toggle(pos(1, 1)).unwrap();
        let outcome = session.toggle(pos(3, 3)).unwrap();

        assert!(outcome.solved);
        assert_eq!(session.status(), SessionStatus::Solved);
        assert_eq!(
            session.toggle(pos(0, 0)),
            Err(SessionError::Finished(SessionStatus::Solved))
        );
    }

    #[test]
    fn test_move_limit() {
        let config = GameConfig::new(StartLayout::Classic).with_move_limit(2);
        let mut session = Session::new(config);

        let outcome = session.toggle(pos(0, 0)).unwrap();
        assert_eq!(outcome.remaining, Some(1));
        let outcome = session.toggle(pos(0, 0)).unwrap();
        assert_eq!(outcome.remaining, Some(0));

        assert_eq!(session.status(), SessionStatus::OutOfMoves);
        assert!(matches!(
            session.toggle(pos(1, 1)),
            Err(SessionError::Finished(SessionStatus::OutOfMoves))
        ));
    }

    #[test]
    fn test_winning_on_last_move_is_solved() {
        let config = GameConfig::new(StartLayout::Classic).with_move_limit(2);
        let mut session = Session::new(config);

        session.toggle(pos(1, 1)).unwrap();
        session.toggle(pos(3, 3)).unwrap();

        assert_eq!(session.status(), SessionStatus::Solved);
    }

    #[test]
    fn test_reset() {
        let mut session = Session::new(GameConfig::new(StartLayout::Classic));
        session.toggle(pos(4, 4)).unwrap();
        session.toggle(pos(2, 3)).unwrap();

        session.reset();

        assert_eq!(session.moves(), 0);
        assert_eq!(session.grid(), &Grid::classic());
    }

    #[test]
    fn test_reset_scrambled_returns_to_same_board() {
        let mut session = Session::new(GameConfig::new(StartLayout::scrambled(11)));
        let start = *session.grid();

        session.toggle(pos(2, 2)).ok();
        session.reset();

        assert_eq!(session.grid(), &start);
    }

    #[test]
    fn test_snapshot() {
        let mut session = Session::new(GameConfig::default().with_move_limit(5));
        session.toggle(pos(0, 0)).unwrap();

        let snapshot = session.snapshot();
        assert_eq!(snapshot.moves, 1);
        assert!(!snapshot.solved);
        assert_eq!(snapshot.moves_remaining, Some(4));
        assert_eq!(snapshot.board.cell(pos(0, 1)), Cell::On);
    }

    #[test]
    fn test_snapshot_serde() {
        let snapshot = Session::new(GameConfig::default()).snapshot();
        let json = serde_json::to_value(&snapshot).unwrap();

        assert_eq!(json["moves"], 0);
        assert_eq!(json["solved"], false);
        assert_eq!(json["board"][0][0], "off");
    }
}
