use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use log::{debug, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::board::{Color, Rules};
use crate::search::alphabeta::{MoveSearch, Searcher};
use crate::search::eval::Score;
use crate::search::SearchError;

/// Named playing strength. Text that names no level reads as `Intermediate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum Difficulty {
    Beginner,
    #[default]
    Intermediate,
    Expert,
}

impl Difficulty {
    /// Search depth in plies.
    pub fn depth(self) -> u32 {
        match self {
            Difficulty::Beginner => 2,
            Difficulty::Intermediate => 4,
            Difficulty::Expert => 6,
        }
    }

    /// Exact level names only; anything else is `Intermediate`.
    pub fn from_name(name: &str) -> Difficulty {
        match name {
            "Beginner" => Difficulty::Beginner,
            "Intermediate" => Difficulty::Intermediate,
            "Expert" => Difficulty::Expert,
            other => {
                debug!("unknown difficulty {other:?}, using Intermediate");
                Difficulty::Intermediate
            }
        }
    }
}

impl From<&str> for Difficulty {
    fn from(name: &str) -> Self { Difficulty::from_name(name) }
}

impl From<String> for Difficulty {
    fn from(name: String) -> Self { Difficulty::from_name(&name) }
}

impl FromStr for Difficulty {
    type Err = Infallible;
    fn from_str(s: &str) -> Result<Self, Self::Err> { Ok(Difficulty::from_name(s)) }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::Beginner => "Beginner",
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Expert => "Expert",
        };
        f.write_str(name)
    }
}

pub fn depth_for(name: &str) -> u32 {
    Difficulty::from_name(name).depth()
}

/// Outcome of one move selection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Choice<M> {
    pub mv: M,
    /// `None` when the move came from the random fallback.
    pub score: Option<Score>,
    pub depth: u32,
    pub fallback: bool,
}

/// Picks a move for the side to move with the given search.
///
/// White maximizes, Black minimizes. If the search yields no move the choice
/// falls back to a uniformly random legal move drawn from `rng`; a board with
/// no legal moves is an error, `GameOver` when it is terminal and
/// `NoLegalMoves` when it claims not to be.
pub fn choose_move_with<R, S, G>(
    searcher: &mut S,
    board: &mut R,
    difficulty: Difficulty,
    rng: &mut G,
) -> Result<Choice<R::Move>, SearchError>
where
    R: Rules,
    S: MoveSearch<R> + ?Sized,
    G: Rng + ?Sized,
{
    let choice = choose_move_at_depth(searcher, board, difficulty.depth(), rng)?;
    if let Some(score) = choice.score {
        debug!("{difficulty} depth {}: {} scores {score}", choice.depth, choice.mv);
    }
    Ok(choice)
}

/// [`choose_move_with`] at an explicit depth, bypassing the difficulty table.
pub fn choose_move_at_depth<R, S, G>(
    searcher: &mut S,
    board: &mut R,
    depth: u32,
    rng: &mut G,
) -> Result<Choice<R::Move>, SearchError>
where
    R: Rules,
    S: MoveSearch<R> + ?Sized,
    G: Rng + ?Sized,
{
    let maximizing = board.turn() == Color::White;
    let (score, best) = searcher.search(board, depth, Score::NEG_INFINITY, Score::INFINITY, maximizing)?;
    if let Some(mv) = best {
        return Ok(Choice { mv, score: Some(score), depth, fallback: false });
    }

    let legal = board.legal_moves();
    if legal.is_empty() {
        return Err(if board.is_game_over() { SearchError::GameOver } else { SearchError::NoLegalMoves });
    }
    let mv = legal[rng.gen_range(0..legal.len())];
    searcher.note_fallback();
    warn!("search at depth {depth} returned no move; random fallback picked {mv} of {}", legal.len());
    Ok(Choice { mv, score: None, depth, fallback: true })
}

/// [`choose_move_with`] using a fresh [`Searcher`].
pub fn choose_move<R, G>(board: &mut R, difficulty: Difficulty, rng: &mut G) -> Result<R::Move, SearchError>
where
    R: Rules,
    G: Rng + ?Sized,
{
    let mut searcher = Searcher::new();
    let choice = choose_move_with(&mut searcher, board, difficulty, rng)?;
    let stats = searcher.stats();
    debug!("search stats: nodes {} cutoffs {} max ply {} fallbacks {}", stats.nodes, stats.cutoffs, stats.max_ply, stats.fallbacks);
    Ok(choice.mv)
}
