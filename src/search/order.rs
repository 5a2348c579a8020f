use std::cmp::Reverse;

use crate::board::Rules;

/// Ordering tier: check 3, capture 2, castling 1, anything else 0.
/// The first predicate that holds decides.
pub fn move_priority<R: Rules + ?Sized>(board: &R, mv: R::Move) -> u8 {
    if board.gives_check(mv) { return 3; }
    if board.is_capture(mv) { return 2; }
    if board.is_castling(mv) { return 1; }
    0
}

/// Stable sort by descending tier. Same moves out as in; equal tiers keep
/// their input order.
pub fn order_moves<R: Rules + ?Sized>(board: &R, moves: &mut [R::Move]) {
    moves.sort_by_cached_key(|&m| Reverse(move_priority(board, m)));
}

pub fn ordered<R: Rules + ?Sized>(board: &R, mut moves: Vec<R::Move>) -> Vec<R::Move> {
    order_moves(board, &mut moves);
    moves
}
