use crate::board::{MoveGuard, Rules, RulesError};

// Make/unmake perft over any rules collaborator (no cloning)
pub fn perft<R: Rules>(board: &mut R, depth: u32) -> Result<u64, RulesError> {
    if depth == 0 { return Ok(1); }
    let moves = board.legal_moves();
    if depth == 1 { return Ok(moves.len() as u64); }
    let mut nodes = 0u64;
    for mv in moves {
        let mut child = MoveGuard::push(board, mv)?;
        nodes += perft(&mut *child, depth - 1)?;
        child.undo()?;
    }
    Ok(nodes)
}

/// Per-root-move node counts, in move generation order.
pub fn divide<R: Rules>(board: &mut R, depth: u32) -> Result<Vec<(R::Move, u64)>, RulesError> {
    let mut out = Vec::new();
    if depth == 0 { return Ok(out); }
    for mv in board.legal_moves() {
        let mut child = MoveGuard::push(board, mv)?;
        let n = perft(&mut *child, depth - 1)?;
        child.undo()?;
        out.push((mv, n));
    }
    Ok(out)
}
