use std::io::{self, BufRead, Write};

use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::board::cozy::Position;
use crate::search::difficulty::{choose_move_at_depth, choose_move_with, Difficulty};
use crate::search::Searcher;

pub struct UciEngine {
    pos: Position,
    searcher: Searcher,
    difficulty: Difficulty,
    rng: SmallRng,
}

impl UciEngine {
    pub fn new(difficulty: Difficulty, seed: u64) -> Self {
        Self { pos: Position::startpos(), searcher: Searcher::new(), difficulty, rng: SmallRng::seed_from_u64(seed) }
    }

    pub fn position(&self) -> &Position { &self.pos }
    pub fn difficulty(&self) -> Difficulty { self.difficulty }

    fn cmd_uci(&self, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "id name Minimax Chess")?;
        writeln!(out, "id author Minimax Chess Team")?;
        writeln!(out, "option name Difficulty type combo default {} var Beginner var Intermediate var Expert", self.difficulty)?;
        writeln!(out, "uciok")
    }

    fn cmd_setoption(&mut self, args: &str) {
        // setoption name Difficulty value Expert
        let mut tokens = args.split_whitespace();
        if tokens.next() != Some("name") { return; }
        let name: Vec<&str> = tokens.by_ref().take_while(|t| *t != "value").collect();
        let value: Vec<&str> = tokens.collect();
        if name.join(" ").eq_ignore_ascii_case("difficulty") {
            self.difficulty = Difficulty::from_name(&value.join(" "));
        }
    }

    fn cmd_position(&mut self, args: &str) {
        // Supports: 'position startpos [moves ...]' and 'position fen <fen> [moves ...]'
        let mut tokens = args.split_whitespace();
        let parsed = match tokens.next() {
            Some("startpos") => {
                let moves: Vec<String> = match tokens.next() {
                    Some("moves") => tokens.map(|s| s.to_string()).collect(),
                    _ => Vec::new(),
                };
                Position::set_from_start_and_moves(&moves)
            }
            Some("fen") => {
                // FEN is 6 fields; collect them
                let fen = tokens.by_ref().take(6).collect::<Vec<_>>().join(" ");
                let moves: Vec<String> = match tokens.next() {
                    Some("moves") => tokens.map(|s| s.to_string()).collect(),
                    _ => Vec::new(),
                };
                Position::from_fen_and_moves(&fen, &moves)
            }
            _ => return,
        };
        match parsed {
            Ok(p) => self.pos = p,
            Err(e) => log::warn!("ignoring position command: {e}"),
        }
    }

    fn cmd_go(&mut self, args: &str, out: &mut impl Write) -> io::Result<()> {
        // 'go depth N' overrides the difficulty for this search
        let mut depth: Option<u32> = None;
        let mut tokens = args.split_whitespace();
        while let Some(tok) = tokens.next() {
            if tok == "depth" {
                depth = tokens.next().and_then(|s| s.parse::<u32>().ok());
            }
        }
        let chosen = match depth {
            Some(d) => choose_move_at_depth(&mut self.searcher, &mut self.pos, d, &mut self.rng),
            None => choose_move_with(&mut self.searcher, &mut self.pos, self.difficulty, &mut self.rng),
        };
        let best = match chosen {
            Ok(choice) => {
                if let Some(score) = choice.score {
                    writeln!(out, "info depth {} nodes {} score cp {}", choice.depth, self.searcher.stats().nodes, (score * 100.0).round() as i64)?;
                }
                Some(choice.mv)
            }
            Err(e) => { log::warn!("search failed: {e}"); None }
        };
        match best {
            Some(m) => writeln!(out, "bestmove {}", self.pos.uci(m)),
            None => writeln!(out, "bestmove 0000"),
        }
    }

    /// Handles one command line. Returns `false` on `quit`.
    pub fn handle(&mut self, line: &str, out: &mut impl Write) -> io::Result<bool> {
        let line = line.trim();
        if line.is_empty() { return Ok(true); }
        match line {
            "uci" => self.cmd_uci(out)?,
            "isready" => writeln!(out, "readyok")?,
            "ucinewgame" => self.pos = Position::startpos(),
            "quit" => return Ok(false),
            "stop" => {}
            _ => {
                if let Some(rest) = line.strip_prefix("position ") { self.cmd_position(rest); }
                else if let Some(rest) = line.strip_prefix("setoption ") { self.cmd_setoption(rest); }
                else if line == "go" { self.cmd_go("", out)?; }
                else if let Some(rest) = line.strip_prefix("go ") { self.cmd_go(rest, out)?; }
                else { log::debug!("unknown command: {line}"); }
            }
        }
        out.flush()?;
        Ok(true)
    }

    pub fn run_loop(&mut self) -> io::Result<()> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        let mut out = stdout.lock();
        for line in stdin.lock().lines() {
            let line = line?;
            if !self.handle(&line, &mut out)? { break; }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(engine: &mut UciEngine, cmds: &[&str]) -> String {
        let mut out: Vec<u8> = Vec::new();
        for c in cmds { engine.handle(c, &mut out).unwrap(); }
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn handshake() {
        let mut e = UciEngine::new(Difficulty::Beginner, 1);
        let out = run(&mut e, &["uci", "isready"]);
        assert!(out.contains("uciok"));
        assert!(out.trim_end().ends_with("readyok"));
    }

    #[test]
    fn setoption_changes_difficulty() {
        let mut e = UciEngine::new(Difficulty::Beginner, 1);
        run(&mut e, &["setoption name Difficulty value Expert"]);
        assert_eq!(e.difficulty(), Difficulty::Expert);
        run(&mut e, &["setoption name Difficulty value whatever"]);
        assert_eq!(e.difficulty(), Difficulty::Intermediate);
    }

    #[test]
    fn position_with_moves_then_go_depth() {
        let mut e = UciEngine::new(Difficulty::Beginner, 1);
        let out = run(&mut e, &[
            "position fen 6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1 moves a1b1 g8f8 b1a1 f8g8",
            "go depth 2",
        ]);
        assert_eq!(e.position().ply(), 4);
        assert!(out.contains("bestmove a1a8"), "{out}");
    }

    #[test]
    fn go_depth_zero_plays_a_legal_move() {
        let mut e = UciEngine::new(Difficulty::Beginner, 3);
        let out = run(&mut e, &["position startpos", "go depth 0"]);
        let mv = out.lines().find_map(|l| l.strip_prefix("bestmove ")).unwrap();
        assert_ne!(mv, "0000");
        assert!(e.position().parse_uci(mv).is_ok(), "{out}");
        assert_eq!(e.searcher.stats().fallbacks, 1);
    }

    #[test]
    fn go_on_finished_game_reports_null_move() {
        let mut e = UciEngine::new(Difficulty::Beginner, 3);
        let out = run(&mut e, &["position startpos moves f2f3 e7e5 g2g4 d8h4", "go depth 2"]);
        assert!(out.contains("bestmove 0000"), "{out}");
    }
}
