#![cfg(feature = "board-pleco")]
use pleco::{BitMove, Board as PlecoBoard, PieceType, Player, SQ};

use super::{Color, Piece, PieceKind, Rules, RulesError, Square};

/// Pleco board driven through its native apply/undo.
pub struct RevBoard {
    board: PlecoBoard,
    stack: Vec<BitMove>,
}

impl RevBoard {
    pub fn from_fen(fen: &str) -> Result<Self, RulesError> {
        PlecoBoard::from_fen(fen)
            .map(|b| Self { board: b, stack: Vec::with_capacity(128) })
            .map_err(|e| RulesError::InvalidFen(format!("{e:?}")))
    }
    pub fn startpos() -> Self { Self { board: PlecoBoard::start_pos(), stack: Vec::with_capacity(128) } }
    pub fn inner(&self) -> &PlecoBoard { &self.board }
}

impl Rules for RevBoard {
    type Move = BitMove;

    fn legal_moves(&self) -> Vec<BitMove> {
        self.board.generate_moves().iter().copied().collect()
    }

    fn push(&mut self, mv: BitMove) -> Result<(), RulesError> {
        if !self.board.generate_moves().iter().any(|&m| m == mv) {
            return Err(RulesError::IllegalMove(format!("{mv}")));
        }
        self.board.apply_move(mv);
        self.stack.push(mv);
        Ok(())
    }

    fn pop(&mut self) -> Result<BitMove, RulesError> {
        let mv = self.stack.pop().ok_or(RulesError::EmptyHistory)?;
        self.board.undo_move();
        Ok(mv)
    }

    fn turn(&self) -> Color {
        match self.board.turn() {
            Player::White => Color::White,
            Player::Black => Color::Black,
        }
    }

    fn piece_at(&self, sq: Square) -> Option<Piece> {
        let p = self.board.piece_at_sq(SQ(sq.index() as u8));
        let color = match p.player()? {
            Player::White => Color::White,
            Player::Black => Color::Black,
        };
        let kind = match p.type_of() {
            PieceType::P => PieceKind::Pawn,
            PieceType::N => PieceKind::Knight,
            PieceType::B => PieceKind::Bishop,
            PieceType::R => PieceKind::Rook,
            PieceType::Q => PieceKind::Queen,
            PieceType::K => PieceKind::King,
            _ => return None,
        };
        Some(Piece { kind, color })
    }

    fn is_checkmate(&self) -> bool { self.board.checkmate() }
    fn is_stalemate(&self) -> bool { self.board.stalemate() }
    fn is_insufficient_material(&self) -> bool { super::insufficient_material(self) }

    fn gives_check(&self, mv: BitMove) -> bool { self.board.gives_check(mv) }
    fn is_capture(&self, mv: BitMove) -> bool { mv.is_capture() }
    fn is_castling(&self, mv: BitMove) -> bool { mv.is_castle() }
}
