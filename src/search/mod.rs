//! Move selection: static evaluation, move ordering, alpha-beta search and
//! the difficulty policy that drives them.

use thiserror::Error;

use crate::board::RulesError;

pub mod alphabeta;
pub mod difficulty;
pub mod eval;
pub mod order;

pub use alphabeta::{MoveSearch, SearchStats, Searcher};
pub use difficulty::{choose_move, choose_move_at_depth, choose_move_with, Difficulty};
pub use eval::{evaluate, Score};

#[derive(Debug, Error)]
pub enum SearchError {
    /// The board claims no legal moves yet none of its terminal predicates fire.
    #[error("rules collaborator reported no legal moves in a non-terminal position")]
    NoLegalMoves,
    #[error("game is already over")]
    GameOver,
    #[error(transparent)]
    Rules(#[from] RulesError),
}
