//! A game in progress: position, move history and result.

use std::fmt;

use cozy_chess::Move;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::board::cozy::Position;
use crate::board::{Color, Rules, RulesError};
use crate::search::difficulty::{choose_move_with, Choice, Difficulty};
use crate::search::{SearchError, Searcher};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Checkmate { winner: Color },
    Stalemate,
    InsufficientMaterial,
    SeventyFiveMoves,
    FivefoldRepetition,
}

impl Outcome {
    /// 1 white win, 0 draw, -1 black win
    pub fn result(self) -> i8 {
        match self {
            Outcome::Checkmate { winner: Color::White } => 1,
            Outcome::Checkmate { winner: Color::Black } => -1,
            _ => 0,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Checkmate { winner } => write!(f, "Checkmate! {winner} wins."),
            Outcome::Stalemate => f.write_str("Stalemate."),
            Outcome::InsufficientMaterial => f.write_str("Draw by insufficient material."),
            Outcome::SeventyFiveMoves => f.write_str("Draw by the seventy-five move rule."),
            Outcome::FivefoldRepetition => f.write_str("Draw by fivefold repetition."),
        }
    }
}

pub fn outcome(pos: &Position) -> Option<Outcome> {
    if pos.is_checkmate() {
        return Some(Outcome::Checkmate { winner: pos.turn().flip() });
    }
    if pos.is_stalemate() { return Some(Outcome::Stalemate); }
    if pos.is_insufficient_material() { return Some(Outcome::InsufficientMaterial); }
    if pos.is_seventyfive_moves() { return Some(Outcome::SeventyFiveMoves); }
    if pos.is_fivefold_repetition() { return Some(Outcome::FivefoldRepetition); }
    None
}

pub struct Game {
    start: Position,
    position: Position,
    moves: Vec<String>,
    searcher: Searcher,
}

impl Game {
    pub fn new() -> Self { Self::from_position(Position::startpos()) }

    pub fn from_fen(fen: &str) -> Result<Self, RulesError> {
        Position::from_fen(fen).map(Self::from_position)
    }

    pub fn from_position(position: Position) -> Self {
        Self { start: position.clone(), position, moves: Vec::new(), searcher: Searcher::new() }
    }

    pub fn position(&self) -> &Position { &self.position }

    /// Moves played so far in UCI notation.
    pub fn moves(&self) -> &[String] { &self.moves }

    pub fn outcome(&self) -> Option<Outcome> { outcome(&self.position) }

    pub fn play_uci(&mut self, text: &str) -> Result<Move, RulesError> {
        let mv = self.position.parse_uci(text)?;
        self.record(mv)?;
        Ok(mv)
    }

    pub fn play_engine<G: Rng + ?Sized>(&mut self, difficulty: Difficulty, rng: &mut G) -> Result<Choice<Move>, SearchError> {
        let choice = choose_move_with(&mut self.searcher, &mut self.position, difficulty, rng)?;
        self.record(choice.mv)?;
        Ok(choice)
    }

    pub fn searcher(&self) -> &Searcher { &self.searcher }

    pub fn undo(&mut self) -> Result<(), RulesError> {
        if self.moves.is_empty() { return Err(RulesError::EmptyHistory); }
        self.position.pop()?;
        self.moves.pop();
        Ok(())
    }

    /// FEN after each move, replayed from the starting position.
    pub fn replay(&self) -> Result<Vec<String>, RulesError> {
        let mut pos = self.start.clone();
        let mut fens = Vec::with_capacity(self.moves.len());
        for m in &self.moves {
            pos.make_move_uci(m)?;
            fens.push(pos.fen());
        }
        Ok(fens)
    }

    fn record(&mut self, mv: Move) -> Result<(), RulesError> {
        let text = self.position.uci(mv);
        self.position.push(mv)?;
        self.moves.push(text);
        Ok(())
    }
}

impl Default for Game {
    fn default() -> Self { Self::new() }
}
