use log::trace;

use crate::board::{Color, MoveGuard, Rules};
use crate::search::eval::{evaluate, Score};
use crate::search::order;
use crate::search::SearchError;

/// One root search: `(score, best move)` for the side given by `maximizing`.
pub trait MoveSearch<R: Rules> {
    fn search(
        &mut self,
        board: &mut R,
        depth: u32,
        alpha: Score,
        beta: Score,
        maximizing: bool,
    ) -> Result<(Score, Option<R::Move>), SearchError>;

    /// Called when the caller had to play a random move instead of a search result.
    fn note_fallback(&mut self) {}
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchStats {
    /// Every call into the recursion, root included.
    pub nodes: u64,
    /// Nodes answered by static evaluation.
    pub leaves: u64,
    pub cutoffs: u64,
    /// Deepest ply reached below the root.
    pub max_ply: u32,
    /// Random fallbacks over the searcher's lifetime; not reset per search.
    pub fallbacks: u64,
}

#[derive(Debug, Clone)]
pub struct SearchResult<M> {
    pub best_move: Option<M>,
    pub score: Score,
    pub depth: u32,
    pub stats: SearchStats,
}

/// Plain minimax with alpha-beta pruning over a board searched in place.
#[derive(Default, Debug)]
pub struct Searcher {
    stats: SearchStats,
}

impl Searcher {
    pub fn new() -> Self { Self::default() }

    /// Counters of the most recent root search.
    pub fn stats(&self) -> SearchStats { self.stats }

    /// Full-window search for the side to move.
    pub fn search_depth<R: Rules>(&mut self, board: &mut R, depth: u32) -> Result<SearchResult<R::Move>, SearchError> {
        let maximizing = board.turn() == Color::White;
        let (score, best_move) = self.search(board, depth, Score::NEG_INFINITY, Score::INFINITY, maximizing)?;
        Ok(SearchResult { best_move, score, depth, stats: self.stats })
    }

    fn alphabeta<R: Rules>(
        &mut self,
        board: &mut R,
        depth: u32,
        mut alpha: Score,
        mut beta: Score,
        maximizing: bool,
        ply: u32,
    ) -> Result<(Score, Option<R::Move>), SearchError> {
        self.stats.nodes += 1;
        if ply > self.stats.max_ply { self.stats.max_ply = ply; }
        if depth == 0 || board.is_game_over() {
            self.stats.leaves += 1;
            return Ok((evaluate(board), None));
        }

        let moves = board.legal_moves();
        if moves.is_empty() {
            return Err(SearchError::NoLegalMoves);
        }
        let moves = order::ordered(&*board, moves);

        let mut best = if maximizing { Score::NEG_INFINITY } else { Score::INFINITY };
        let mut best_move: Option<R::Move> = None;
        for mv in moves {
            let mut child = MoveGuard::push(board, mv)?;
            let (score, _) = self.alphabeta(&mut *child, depth - 1, alpha, beta, !maximizing, ply + 1)?;
            child.undo()?;
            if ply == 0 { trace!("root {mv}: {score}"); }

            if maximizing {
                if score > best { best = score; best_move = Some(mv); }
                alpha = alpha.max(score);
            } else {
                if score < best { best = score; best_move = Some(mv); }
                beta = beta.min(score);
            }
            if beta <= alpha {
                self.stats.cutoffs += 1;
                break;
            }
        }
        Ok((best, best_move))
    }
}

impl<R: Rules> MoveSearch<R> for Searcher {
    fn search(
        &mut self,
        board: &mut R,
        depth: u32,
        alpha: Score,
        beta: Score,
        maximizing: bool,
    ) -> Result<(Score, Option<R::Move>), SearchError> {
        self.stats = SearchStats { fallbacks: self.stats.fallbacks, ..SearchStats::default() };
        self.alphabeta(board, depth, alpha, beta, maximizing, 0)
    }

    fn note_fallback(&mut self) {
        self.stats.fallbacks += 1;
    }
}
