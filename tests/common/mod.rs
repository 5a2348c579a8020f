#![allow(dead_code)]

use std::cell::Cell;

use minimax_chess::board::cozy::Position;
use minimax_chess::board::{Color, Piece, Rules, RulesError, Square};

/// Delegates to a `Position` and counts how often the search touches it.
pub struct Counting {
    pub inner: Position,
    pub legal_calls: Cell<u64>,
    pub pushes: u64,
}

impl Counting {
    pub fn new(inner: Position) -> Self {
        Self { inner, legal_calls: Cell::new(0), pushes: 0 }
    }
}

impl Rules for Counting {
    type Move = cozy_chess::Move;

    fn legal_moves(&self) -> Vec<Self::Move> {
        self.legal_calls.set(self.legal_calls.get() + 1);
        self.inner.legal_moves()
    }
    fn push(&mut self, mv: Self::Move) -> Result<(), RulesError> {
        self.pushes += 1;
        self.inner.push(mv)
    }
    fn pop(&mut self) -> Result<Self::Move, RulesError> { self.inner.pop() }
    fn turn(&self) -> Color { self.inner.turn() }
    fn piece_at(&self, sq: Square) -> Option<Piece> { self.inner.piece_at(sq) }
    fn is_checkmate(&self) -> bool { self.inner.is_checkmate() }
    fn is_stalemate(&self) -> bool { self.inner.is_stalemate() }
    fn is_insufficient_material(&self) -> bool { self.inner.is_insufficient_material() }
    fn is_game_over(&self) -> bool { self.inner.is_game_over() }
    fn gives_check(&self, mv: Self::Move) -> bool { self.inner.gives_check(mv) }
    fn is_capture(&self, mv: Self::Move) -> bool { self.inner.is_capture(mv) }
    fn is_castling(&self, mv: Self::Move) -> bool { self.inner.is_castling(mv) }
}

/// Same colors swapped on the same squares (piece letters case-flipped).
pub fn color_swapped_fen(fen: &str) -> String {
    let mut fields: Vec<String> = fen.split_whitespace().map(str::to_string).collect();
    fields[0] = fields[0].chars().map(|c| {
        if c.is_ascii_uppercase() { c.to_ascii_lowercase() } else { c.to_ascii_uppercase() }
    }).collect();
    fields.join(" ")
}

pub const POSITIONS: &[&str] = &[
    "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3",
    "4k3/8/8/p3N2p/8/8/8/R3K2R w KQ - 0 1",
    "6k1/5ppp/8/8/8/8/5PPP/3r1RK1 w - - 0 1",
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
];
