//! Game sessions.
//!
//! A `Session` owns one board for one player: it counts moves, enforces an
//! optional move budget and knows how to go back to its starting board.
//! Front ends drive a session and, once it is solved, record the score in
//! the ranking store. The session itself never touches the ranking store.

mod game;

pub use game::{BoardSnapshot, MoveOutcome, Session, SessionError, SessionStatus};
