use cozy_chess::{BitBoard, Board as CozyBoard, Color as CozyColor, Move, Piece as CozyPiece, Square as CozySquare};

use super::{Color, Piece, PieceKind, Rules, RulesError, Square};

#[derive(Clone, Debug)]
struct Frame {
    board: CozyBoard,
    mv: Move,
    halfmoves: u16,
}

/// `cozy_chess` board with an undo stack, so it can be searched in place.
///
/// Keeps its own halfmove clock: the 75-move rule needs values past 100.
#[derive(Clone, Debug)]
pub struct Position {
    board: CozyBoard,
    stack: Vec<Frame>,
    halfmoves: u16,
}

impl Position {
    pub fn startpos() -> Self { Self::from_board(CozyBoard::default()) }

    pub fn from_fen(fen: &str) -> Result<Self, RulesError> {
        let mut fields: Vec<&str> = fen.split_whitespace().collect();
        let halfmoves = match fields.get(4) {
            Some(f) => f.parse::<u16>().map_err(|_| RulesError::InvalidFen(format!("bad halfmove clock {f:?}")))?,
            None => 0,
        };
        let clamped = halfmoves.min(100).to_string();
        if fields.len() > 4 { fields[4] = &clamped; }
        let board = CozyBoard::from_fen(&fields.join(" "), false)
            .map_err(|e| RulesError::InvalidFen(format!("{e:?}")))?;
        Ok(Self { board, stack: Vec::with_capacity(128), halfmoves })
    }

    pub fn from_board(board: CozyBoard) -> Self {
        let halfmoves = board.halfmove_clock() as u16;
        Self { board, stack: Vec::with_capacity(128), halfmoves }
    }

    pub fn board(&self) -> &CozyBoard { &self.board }

    pub fn fen(&self) -> String { format!("{}", self.board) }

    /// Moves pushed since construction, oldest first.
    pub fn history(&self) -> impl Iterator<Item = Move> + '_ {
        self.stack.iter().map(|f| f.mv)
    }

    pub fn ply(&self) -> usize { self.stack.len() }

    /// UCI text for `mv`. Castling is written with the king's destination
    /// (e1g1) rather than cozy's king-takes-rook form (e1h1).
    pub fn uci(&self, mv: Move) -> String {
        if self.is_castling(mv) {
            let from = cozy_square(mv.from);
            let file = if (mv.to.file() as u8) > (mv.from.file() as u8) { 6 } else { 2 };
            match Square::from_file_rank(file, from.rank()) {
                Some(to) => format!("{from}{to}"),
                None => format!("{mv}"),
            }
        } else {
            format!("{mv}")
        }
    }

    /// Resolves UCI text against the legal moves. Accepts both castling forms.
    pub fn parse_uci(&self, text: &str) -> Result<Move, RulesError> {
        self.legal_moves()
            .into_iter()
            .find(|&m| self.uci(m) == text || format!("{m}") == text)
            .ok_or_else(|| RulesError::IllegalMove(text.to_string()))
    }

    pub fn make_move_uci(&mut self, mv_uci: &str) -> Result<Move, RulesError> {
        let mv = self.parse_uci(mv_uci)?;
        self.push(mv)?;
        Ok(mv)
    }

    pub fn legal_moves_count(&self) -> usize {
        let mut ct = 0usize;
        self.board.generate_moves(|moves| { ct += moves.len(); false });
        ct
    }

    pub fn side_to_move(&self) -> CozyColor { self.board.side_to_move() }

    pub fn set_from_start_and_moves(moves: &[String]) -> Result<Self, RulesError> {
        let mut pos = Self::startpos();
        for m in moves { pos.make_move_uci(m)?; }
        Ok(pos)
    }

    pub fn from_fen_and_moves(fen: &str, moves: &[String]) -> Result<Self, RulesError> {
        let mut pos = Self::from_fen(fen)?;
        for m in moves { pos.make_move_uci(m)?; }
        Ok(pos)
    }

    pub fn in_check(&self) -> bool { !self.board.checkers().is_empty() }

    fn has_legal_move(&self) -> bool {
        let mut any = false;
        self.board.generate_moves(|_| { any = true; true });
        any
    }

    /// Plies since the last capture or pawn move.
    pub fn halfmove_clock(&self) -> u16 { self.halfmoves }

    /// Seventy-five moves by each side without a capture or pawn move.
    pub fn is_seventyfive_moves(&self) -> bool {
        self.halfmoves >= 150 && !self.is_checkmate()
    }

    /// Current position has occurred five times. Only positions since the
    /// last irreversible move can repeat.
    pub fn is_fivefold_repetition(&self) -> bool {
        let hash = self.board.hash();
        let seen = self.stack.iter().rev()
            .take(self.halfmoves as usize)
            .filter(|f| f.board.hash() == hash)
            .count();
        seen + 1 >= 5
    }

    fn has_insufficient_material(&self, color: CozyColor) -> bool {
        let b = &self.board;
        let ours = b.colors(color);
        let heavy = b.pieces(CozyPiece::Pawn) | b.pieces(CozyPiece::Rook) | b.pieces(CozyPiece::Queen);
        if !(ours & heavy).is_empty() { return false; }
        let knights = b.pieces(CozyPiece::Knight);
        if !(ours & knights).is_empty() {
            // K+N only mates with the opponent's own pieces in the way.
            let theirs = b.colors(!color);
            let kings_queens = b.pieces(CozyPiece::King) | b.pieces(CozyPiece::Queen);
            return ours.len() <= 2 && (theirs & !kings_queens).is_empty();
        }
        let bishops = b.pieces(CozyPiece::Bishop);
        if !(ours & bishops).is_empty() {
            return single_square_color(bishops)
                && b.pieces(CozyPiece::Pawn).is_empty()
                && knights.is_empty();
        }
        true
    }
}

fn single_square_color(bb: BitBoard) -> bool {
    let dark = |sq: CozySquare| ((sq.file() as u8) + (sq.rank() as u8)) % 2 == 0;
    bb.into_iter().all(dark) || bb.into_iter().all(|sq| !dark(sq))
}

fn cozy_square(sq: CozySquare) -> Square {
    Square(sq as u8)
}

fn piece_kind(p: CozyPiece) -> PieceKind {
    match p {
        CozyPiece::Pawn => PieceKind::Pawn,
        CozyPiece::Knight => PieceKind::Knight,
        CozyPiece::Bishop => PieceKind::Bishop,
        CozyPiece::Rook => PieceKind::Rook,
        CozyPiece::Queen => PieceKind::Queen,
        CozyPiece::King => PieceKind::King,
    }
}

fn color(c: CozyColor) -> Color {
    match c {
        CozyColor::White => Color::White,
        CozyColor::Black => Color::Black,
    }
}

impl Rules for Position {
    type Move = Move;

    fn legal_moves(&self) -> Vec<Move> {
        let mut moves: Vec<Move> = Vec::with_capacity(64);
        self.board.generate_moves(|ml| { for m in ml { moves.push(m); } false });
        moves
    }

    fn push(&mut self, mv: Move) -> Result<(), RulesError> {
        if !self.board.is_legal(mv) {
            return Err(RulesError::IllegalMove(format!("{mv}")));
        }
        let irreversible = self.is_capture(mv) || self.board.piece_on(mv.from) == Some(CozyPiece::Pawn);
        self.stack.push(Frame { board: self.board.clone(), mv, halfmoves: self.halfmoves });
        self.halfmoves = if irreversible { 0 } else { self.halfmoves.saturating_add(1) };
        self.board.play_unchecked(mv);
        Ok(())
    }

    fn pop(&mut self) -> Result<Move, RulesError> {
        let frame = self.stack.pop().ok_or(RulesError::EmptyHistory)?;
        self.board = frame.board;
        self.halfmoves = frame.halfmoves;
        Ok(frame.mv)
    }

    fn turn(&self) -> Color { color(self.board.side_to_move()) }

    fn piece_at(&self, sq: Square) -> Option<Piece> {
        let csq = CozySquare::ALL[sq.index()];
        let kind = self.board.piece_on(csq)?;
        let c = self.board.color_on(csq)?;
        Some(Piece { kind: piece_kind(kind), color: color(c) })
    }

    fn is_checkmate(&self) -> bool {
        self.in_check() && !self.has_legal_move()
    }

    fn is_stalemate(&self) -> bool {
        !self.in_check() && !self.has_legal_move()
    }

    fn is_insufficient_material(&self) -> bool {
        self.has_insufficient_material(CozyColor::White)
            && self.has_insufficient_material(CozyColor::Black)
    }

    fn is_game_over(&self) -> bool {
        !self.has_legal_move()
            || self.is_insufficient_material()
            || self.is_seventyfive_moves()
            || self.is_fivefold_repetition()
    }

    fn gives_check(&self, mv: Move) -> bool {
        let mut child = self.board.clone();
        child.play_unchecked(mv);
        !child.checkers().is_empty()
    }

    fn is_capture(&self, mv: Move) -> bool {
        let stm = self.board.side_to_move();
        if self.board.colors(!stm).has(mv.to) { return true; }
        // En passant: a pawn changing file onto an empty square.
        self.board.piece_on(mv.from) == Some(CozyPiece::Pawn)
            && mv.from.file() != mv.to.file()
            && self.board.piece_on(mv.to).is_none()
    }

    fn is_castling(&self, mv: Move) -> bool {
        let stm = self.board.side_to_move();
        self.board.piece_on(mv.from) == Some(CozyPiece::King)
            && self.board.colors(stm).has(mv.to)
    }
}
