//! Alpha-beta move selection for a chess-playing bot.
//!
//! The engine borrows a board through the [`board::Rules`] trait, searches it
//! in place and hands back a move via [`search::choose_move`].
pub mod board;
pub mod config;
pub mod game;
pub mod perft;
pub mod search;
pub mod uci;

pub use board::{Color, Piece, PieceKind, Rules, RulesError, Square};
pub use search::{choose_move, Difficulty, SearchError};
