use crate::board::{Color, PieceKind, Rules, Square};

/// Pawn units, White-positive.
pub type Score = f64;

// Mate scoring
pub const MATE_SCORE: Score = 9999.0;
pub const DRAW_SCORE: Score = 0.0;

const KING_SAFETY_BONUS: Score = 0.5;

pub fn material_value(kind: PieceKind) -> Score {
    match kind {
        PieceKind::Pawn => 1.0,
        PieceKind::Knight => 3.0,
        PieceKind::Bishop => 3.3,
        PieceKind::Rook => 5.0,
        PieceKind::Queen => 9.0,
        PieceKind::King => 0.0,
    }
}

#[rustfmt::skip]
static PAWN_TABLE: [Score; 64] = [
    0.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0,
    5.0,  5.0,  5.0,  5.0,  5.0,  5.0,  5.0,  5.0,
    1.0,  1.0,  2.0,  3.0,  3.0,  2.0,  1.0,  1.0,
    0.5,  0.5,  1.0,  2.5,  2.5,  1.0,  0.5,  0.5,
    0.0,  0.0,  0.0,  2.0,  2.0,  0.0,  0.0,  0.0,
    0.5, -0.5, -1.0,  0.0,  0.0, -1.0, -0.5,  0.5,
    0.5,  1.0,  1.0, -2.0, -2.0,  1.0,  1.0,  0.5,
    0.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0,
];

#[rustfmt::skip]
static KNIGHT_TABLE: [Score; 64] = [
    -5.0, -4.0, -3.0, -3.0, -3.0, -3.0, -4.0, -5.0,
    -4.0, -2.0,  0.0,  0.5,  0.5,  0.0, -2.0, -4.0,
    -3.0,  0.5,  1.0,  1.5,  1.5,  1.0,  0.5, -3.0,
    -3.0,  1.0,  1.5,  2.0,  2.0,  1.5,  1.0, -3.0,
    -3.0,  0.5,  1.5,  2.0,  2.0,  1.5,  0.5, -3.0,
    -3.0,  0.0,  1.0,  1.5,  1.5,  1.0,  0.0, -3.0,
    -4.0, -2.0,  0.0,  0.0,  0.0,  0.0, -2.0, -4.0,
    -5.0, -4.0, -3.0, -3.0, -3.0, -3.0, -4.0, -5.0,
];

static ZERO_TABLE: [Score; 64] = [0.0; 64];

fn table(kind: PieceKind) -> &'static [Score; 64] {
    match kind {
        PieceKind::Pawn => &PAWN_TABLE,
        PieceKind::Knight => &KNIGHT_TABLE,
        // No tables for the other pieces yet.
        PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen | PieceKind::King => &ZERO_TABLE,
    }
}

/// Table lookup by raw square index, for both colors.
pub fn positional_bonus(kind: PieceKind, sq: Square) -> Score {
    table(kind)[sq.index()]
}

/// Score split by term. `total` is what [`evaluate`] returns for a
/// position that is not over.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EvalBreakdown {
    pub material: Score,
    pub positional: Score,
    pub king_safety: Score,
    pub total: Score,
}

pub fn breakdown<R: Rules + ?Sized>(board: &R) -> EvalBreakdown {
    let mut material = 0.0;
    let mut positional = 0.0;
    for sq in Square::all() {
        if let Some(piece) = board.piece_at(sq) {
            let sign = if piece.color == Color::White { 1.0 } else { -1.0 };
            material += sign * material_value(piece.kind);
            positional += sign * positional_bonus(piece.kind, sq);
        }
    }
    let king_safety = king_safety(board);
    EvalBreakdown { material, positional, king_safety, total: material + positional + king_safety }
}

/// +0.5 for a White king on ranks 1-2, -0.5 for a Black king on ranks 7-8.
pub fn king_safety<R: Rules + ?Sized>(board: &R) -> Score {
    let mut score = 0.0;
    for sq in Square::all() {
        match board.piece_at(sq) {
            Some(p) if p.kind == PieceKind::King => {
                if p.color == Color::White && sq.rank() < 2 {
                    score += KING_SAFETY_BONUS;
                } else if p.color == Color::Black && sq.rank() > 5 {
                    score -= KING_SAFETY_BONUS;
                }
            }
            _ => {}
        }
    }
    score
}

/// Static evaluation from White's point of view.
///
/// Checkmate scores `-MATE_SCORE` when White is the side mated (White to move)
/// and `+MATE_SCORE` when Black is; stalemate and dead positions are exactly 0.
pub fn evaluate<R: Rules + ?Sized>(board: &R) -> Score {
    if board.is_checkmate() {
        return match board.turn() {
            Color::White => -MATE_SCORE,
            Color::Black => MATE_SCORE,
        };
    }
    if board.is_stalemate() || board.is_insufficient_material() {
        return DRAW_SCORE;
    }
    breakdown(board).total
}
