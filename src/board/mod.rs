//! Board abstraction consumed by the search.
//!
//! The engine never owns board state. It talks to a rules collaborator through
//! the [`Rules`] trait: legal move generation, in-place push/pop, terminal
//! predicates and per-move predicates. `cozy` provides the default
//! implementation; `pleco` is available behind the `board-pleco` feature.

use std::fmt;
use std::ops::{Deref, DerefMut};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod cozy;
pub mod pleco;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RulesError {
    #[error("illegal move: {0}")]
    IllegalMove(String),
    #[error("no move to undo")]
    EmptyHistory,
    #[error("FEN error: {0}")]
    InvalidFen(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    #[serde(alias = "w")]
    White,
    #[serde(alias = "b")]
    Black,
}

impl Color {
    pub fn flip(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => f.write_str("White"),
            Color::Black => f.write_str("Black"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
}

/// Square index: 0 = a1, 7 = h1, 8 = a2 ... 63 = h8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square(u8);

impl Square {
    pub fn new(index: u8) -> Option<Square> {
        (index < 64).then_some(Square(index))
    }

    pub fn from_file_rank(file: u8, rank: u8) -> Option<Square> {
        if file < 8 && rank < 8 { Some(Square(rank * 8 + file)) } else { None }
    }

    pub fn index(self) -> usize { self.0 as usize }
    pub fn file(self) -> u8 { self.0 % 8 }
    /// Zero-based: rank 1 is 0.
    pub fn rank(self) -> u8 { self.0 / 8 }

    pub fn all() -> impl Iterator<Item = Square> {
        (0..64u8).map(Square)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.file()) as char, (b'1' + self.rank()) as char)
    }
}

/// Rules collaborator contract.
///
/// `push` and `pop` must be exact inverses: every observable query returns the
/// same answer after a push/pop pair as before it.
pub trait Rules {
    type Move: Copy + Eq + fmt::Debug + fmt::Display;

    fn legal_moves(&self) -> Vec<Self::Move>;
    fn push(&mut self, mv: Self::Move) -> Result<(), RulesError>;
    fn pop(&mut self) -> Result<Self::Move, RulesError>;

    fn turn(&self) -> Color;
    fn piece_at(&self, sq: Square) -> Option<Piece>;

    fn is_checkmate(&self) -> bool;
    fn is_stalemate(&self) -> bool;
    fn is_insufficient_material(&self) -> bool;
    fn is_game_over(&self) -> bool {
        self.is_checkmate() || self.is_stalemate() || self.is_insufficient_material()
    }

    fn gives_check(&self, mv: Self::Move) -> bool;
    fn is_capture(&self, mv: Self::Move) -> bool;
    fn is_castling(&self, mv: Self::Move) -> bool;
}

/// Neither side can possibly deliver mate, judged from occupancy alone.
///
/// Per color: any pawn, rook or queen is sufficient; a knight is insufficient
/// only as the sole minor piece against a bare king (queens allowed, they can
/// block); bishops are insufficient when every bishop on the board stands on
/// one square color and there are no pawns or knights at all.
pub fn insufficient_material<R: Rules + ?Sized>(board: &R) -> bool {
    let pieces: Vec<(Square, Piece)> = Square::all()
        .filter_map(|sq| board.piece_at(sq).map(|p| (sq, p)))
        .collect();
    let count = |color: Color, kind: PieceKind| {
        pieces.iter().filter(|(_, p)| p.color == color && p.kind == kind).count()
    };
    let any = |kind: PieceKind| pieces.iter().any(|(_, p)| p.kind == kind);
    let dark = |sq: Square| (sq.file() + sq.rank()) % 2 == 0;

    let side_cannot_mate = |color: Color| {
        if count(color, PieceKind::Pawn) + count(color, PieceKind::Rook) + count(color, PieceKind::Queen) > 0 {
            return false;
        }
        let ours = pieces.iter().filter(|(_, p)| p.color == color).count();
        if count(color, PieceKind::Knight) > 0 {
            let theirs_minor_or_pawn = pieces.iter().any(|(_, p)| {
                p.color == color.flip() && !matches!(p.kind, PieceKind::King | PieceKind::Queen)
            });
            return ours <= 2 && !theirs_minor_or_pawn;
        }
        if count(color, PieceKind::Bishop) > 0 {
            let mut bishops = pieces.iter().filter(|(_, p)| p.kind == PieceKind::Bishop).map(|(sq, _)| dark(*sq));
            let first = bishops.next().unwrap_or(true);
            return bishops.all(|d| d == first) && !any(PieceKind::Pawn) && !any(PieceKind::Knight);
        }
        true
    };
    side_cannot_mate(Color::White) && side_cannot_mate(Color::Black)
}

/// A pushed move that is popped again when the guard goes away.
///
/// Call [`MoveGuard::undo`] on the normal path to observe pop errors; if the
/// guard is dropped instead (early return, `?`), the move is popped anyway.
pub struct MoveGuard<'a, R: Rules> {
    board: &'a mut R,
    armed: bool,
}

impl<'a, R: Rules> MoveGuard<'a, R> {
    pub fn push(board: &'a mut R, mv: R::Move) -> Result<Self, RulesError> {
        board.push(mv)?;
        Ok(Self { board, armed: true })
    }

    pub fn undo(mut self) -> Result<R::Move, RulesError> {
        self.armed = false;
        self.board.pop()
    }
}

impl<R: Rules> Deref for MoveGuard<'_, R> {
    type Target = R;
    fn deref(&self) -> &R { self.board }
}

impl<R: Rules> DerefMut for MoveGuard<'_, R> {
    fn deref_mut(&mut self) -> &mut R { self.board }
}

impl<R: Rules> Drop for MoveGuard<'_, R> {
    fn drop(&mut self) {
        if self.armed {
            if let Err(e) = self.board.pop() {
                log::warn!("failed to restore board on unwind: {e}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_layout_is_file_then_rank() {
        let e4 = Square::from_file_rank(4, 3).unwrap();
        assert_eq!(e4.index(), 28);
        assert_eq!(e4.to_string(), "e4");
        assert_eq!(Square::new(0).unwrap().to_string(), "a1");
        assert_eq!(Square::new(63).unwrap().to_string(), "h8");
        assert!(Square::new(64).is_none());
    }

    #[test]
    fn guard_pops_on_drop() {
        let mut pos = cozy::Position::startpos();
        let before = pos.fen();
        let mv = pos.legal_moves()[0];
        {
            let g = MoveGuard::push(&mut pos, mv).unwrap();
            assert_eq!(g.turn(), Color::Black);
        }
        assert_eq!(pos.fen(), before);
        assert_eq!(pos.ply(), 0);
    }
}
