mod common;

use common::{Counting, POSITIONS};
use minimax_chess::board::cozy::Position;
use minimax_chess::board::{Color, Piece, Rules, RulesError, Square};
use minimax_chess::search::eval::{evaluate, Score};
use minimax_chess::search::order::ordered;
use minimax_chess::search::{MoveSearch, SearchError, Searcher};

/// Unpruned minimax with the same move order and tie rule as the engine.
fn minimax<R: Rules>(board: &mut R, depth: u32, maximizing: bool) -> (Score, Option<R::Move>) {
    if depth == 0 || board.is_game_over() {
        return (evaluate(board), None);
    }
    let moves = ordered(&*board, board.legal_moves());
    let mut best = if maximizing { Score::NEG_INFINITY } else { Score::INFINITY };
    let mut best_move = None;
    for mv in moves {
        board.push(mv).unwrap();
        let (score, _) = minimax(board, depth - 1, !maximizing);
        board.pop().unwrap();
        let better = if maximizing { score > best } else { score < best };
        if better { best = score; best_move = Some(mv); }
    }
    (best, best_move)
}

#[test]
fn depth_zero_examines_no_moves() {
    let mut board = Counting::new(Position::startpos());
    let mut s = Searcher::new();
    let (score, mv) = s.search(&mut board, 0, Score::NEG_INFINITY, Score::INFINITY, true).unwrap();
    assert_eq!(score, evaluate(&board.inner));
    assert!(mv.is_none());
    assert_eq!(board.legal_calls.get(), 0);
    assert_eq!(board.pushes, 0);
}

#[test]
fn terminal_root_returns_no_move() {
    let mut pos = Position::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3").unwrap();
    let mut s = Searcher::new();
    let (score, mv) = s.search(&mut pos, 4, Score::NEG_INFINITY, Score::INFINITY, true).unwrap();
    assert_eq!(score, -9999.0);
    assert!(mv.is_none());
}

#[test]
fn alphabeta_matches_full_minimax() {
    for fen in POSITIONS {
        for depth in 1..=3 {
            let mut pos = Position::from_fen(fen).unwrap();
            let maximizing = pos.turn() == Color::White;
            let expected = minimax(&mut pos, depth, maximizing);
            let mut s = Searcher::new();
            let got = s.search(&mut pos, depth, Score::NEG_INFINITY, Score::INFINITY, maximizing).unwrap();
            assert_eq!(got.0, expected.0, "score mismatch at depth {depth} for {fen}");
            assert_eq!(got.1, expected.1, "move mismatch at depth {depth} for {fen}");
        }
    }
}

#[test]
fn pruning_reduces_work() {
    let mut full = Counting::new(Position::startpos());
    let _ = minimax(&mut full, 3, true);
    let mut pruned = Counting::new(Position::startpos());
    let mut s = Searcher::new();
    s.search(&mut pruned, 3, Score::NEG_INFINITY, Score::INFINITY, true).unwrap();
    assert!(pruned.pushes < full.pushes, "alpha-beta pushed {} vs minimax {}", pruned.pushes, full.pushes);
    assert!(s.stats().cutoffs > 0);
}

#[test]
fn search_leaves_board_unchanged() {
    for fen in POSITIONS {
        let mut pos = Position::from_fen(fen).unwrap();
        let before = pos.fen();
        let mut s = Searcher::new();
        s.search_depth(&mut pos, 3).unwrap();
        assert_eq!(pos.fen(), before);
        assert_eq!(pos.ply(), 0);
    }
}

#[test]
fn ties_keep_first_ordered_move() {
    // Every reply scores 5.0 at depth 1: rook moves carry no table bonus and
    // king moves stay on the back ranks.
    let mut pos = Position::from_fen("4k3/8/8/8/8/8/8/4K2R w K - 0 1").unwrap();
    let first = ordered(&pos, pos.legal_moves())[0];
    let mut s = Searcher::new();
    let (score, mv) = s.search(&mut pos, 1, Score::NEG_INFINITY, Score::INFINITY, true).unwrap();
    assert_eq!(score, 5.0);
    assert_eq!(mv, Some(first));
}

#[test]
fn black_minimizes() {
    // Black to move mates with Ra8-a1.
    let mut pos = Position::from_fen("r5k1/8/8/8/8/8/5PPP/6K1 b - - 0 1").unwrap();
    let mut s = Searcher::new();
    let res = s.search_depth(&mut pos, 2).unwrap();
    assert_eq!(res.score, -9999.0);
    assert_eq!(pos.uci(res.best_move.unwrap()), "a8a1");
}

/// Accepts a fixed number of pushes, then rejects every further one.
struct Flaky {
    inner: Position,
    budget: u32,
}

impl Rules for Flaky {
    type Move = cozy_chess::Move;
    fn legal_moves(&self) -> Vec<Self::Move> { self.inner.legal_moves() }
    fn push(&mut self, mv: Self::Move) -> Result<(), RulesError> {
        if self.budget == 0 { return Err(RulesError::IllegalMove(format!("{mv}"))); }
        self.budget -= 1;
        self.inner.push(mv)
    }
    fn pop(&mut self) -> Result<Self::Move, RulesError> { self.inner.pop() }
    fn turn(&self) -> Color { self.inner.turn() }
    fn piece_at(&self, sq: Square) -> Option<Piece> { self.inner.piece_at(sq) }
    fn is_checkmate(&self) -> bool { self.inner.is_checkmate() }
    fn is_stalemate(&self) -> bool { self.inner.is_stalemate() }
    fn is_insufficient_material(&self) -> bool { self.inner.is_insufficient_material() }
    fn gives_check(&self, mv: Self::Move) -> bool { self.inner.gives_check(mv) }
    fn is_capture(&self, mv: Self::Move) -> bool { self.inner.is_capture(mv) }
    fn is_castling(&self, mv: Self::Move) -> bool { self.inner.is_castling(mv) }
}

#[test]
fn rules_errors_propagate_and_board_is_restored() {
    let mut board = Flaky { inner: Position::startpos(), budget: 5 };
    let before = board.inner.fen();
    let mut s = Searcher::new();
    let err = s.search(&mut board, 3, Score::NEG_INFINITY, Score::INFINITY, true).unwrap_err();
    assert!(matches!(err, SearchError::Rules(RulesError::IllegalMove(_))), "{err:?}");
    assert_eq!(board.inner.ply(), 0);
    assert_eq!(board.inner.fen(), before);
}

/// Stops reporting moves once anything has been pushed, without admitting
/// the game is over.
struct DriesUp(Position);

impl Rules for DriesUp {
    type Move = cozy_chess::Move;
    fn legal_moves(&self) -> Vec<Self::Move> {
        if self.0.ply() == 0 { self.0.legal_moves() } else { Vec::new() }
    }
    fn push(&mut self, mv: Self::Move) -> Result<(), RulesError> { self.0.push(mv) }
    fn pop(&mut self) -> Result<Self::Move, RulesError> { self.0.pop() }
    fn turn(&self) -> Color { self.0.turn() }
    fn piece_at(&self, sq: Square) -> Option<Piece> { self.0.piece_at(sq) }
    fn is_checkmate(&self) -> bool { self.0.is_checkmate() }
    fn is_stalemate(&self) -> bool { self.0.is_stalemate() }
    fn is_insufficient_material(&self) -> bool { self.0.is_insufficient_material() }
    fn gives_check(&self, mv: Self::Move) -> bool { self.0.gives_check(mv) }
    fn is_capture(&self, mv: Self::Move) -> bool { self.0.is_capture(mv) }
    fn is_castling(&self, mv: Self::Move) -> bool { self.0.is_castling(mv) }
}

#[test]
fn missing_moves_below_the_root_fail_the_search() {
    let mut board = DriesUp(Position::startpos());
    let mut s = Searcher::new();
    let err = s.search(&mut board, 2, Score::NEG_INFINITY, Score::INFINITY, true).unwrap_err();
    assert!(matches!(err, SearchError::NoLegalMoves), "{err:?}");
    assert_eq!(board.0.ply(), 0);
}
