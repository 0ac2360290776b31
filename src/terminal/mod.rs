//! Terminal front end.
//!
//! A menu-driven game played on stdin/stdout with colored lights. A round
//! starts by choosing a move budget; a solved round asks for the player's
//! name and records the score.

mod app;
pub mod render;

pub use app::TerminalGame;
