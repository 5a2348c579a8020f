use anyhow::Context;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use minimax_chess::board::{Color, Rules};
use minimax_chess::game::{Game, Outcome};
use minimax_chess::search::Difficulty;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::Serialize;
use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "minimax-selfplay", about = "Play engine-vs-engine games and write them as JSON lines")]
struct Args {
    #[arg(long, default_value_t = 10)]
    games: usize,
    #[arg(long, default_value_t = 200)]
    max_plies: usize,
    #[arg(long, default_value = "Beginner")]
    white: String,
    #[arg(long, default_value = "Beginner")]
    black: String,
    #[arg(long, default_value_t = 42)]
    seed: u64,
    #[arg(long)]
    fen: Option<String>,
    #[arg(long, default_value = "out/selfplay.jsonl")]
    out: PathBuf,
}

#[derive(Serialize)]
struct GameRecord {
    white: Difficulty,
    black: Difficulty,
    moves: Vec<String>,
    outcome: Option<Outcome>,
    result: i8, // 1 white win, 0 draw or unfinished, -1 black win
    fallbacks: usize,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let a = Args::parse();
    let white = Difficulty::from_name(&a.white);
    let black = Difficulty::from_name(&a.black);

    if let Some(dir) = a.out.parent() {
        if !dir.as_os_str().is_empty() { create_dir_all(dir)?; }
    }
    let mut out = BufWriter::new(File::create(&a.out).with_context(|| format!("creating {}", a.out.display()))?);

    let pb = ProgressBar::new(a.games as u64);
    pb.set_style(ProgressStyle::with_template("{bar:40} {pos}/{len} games {msg}")?);
    let mut rng = SmallRng::seed_from_u64(a.seed);
    let mut score = [0usize; 3];
    for _ in 0..a.games {
        let mut game = match a.fen.as_deref() {
            Some(fen) => Game::from_fen(fen)?,
            None => Game::new(),
        };
        let mut fallbacks = 0usize;
        while game.outcome().is_none() && game.moves().len() < a.max_plies {
            let side = if game.position().turn() == Color::White { white } else { black };
            let choice = game.play_engine(side, &mut rng)?;
            if choice.fallback { fallbacks += 1; }
        }
        let outcome = game.outcome();
        let result = outcome.map(|o| o.result()).unwrap_or(0);
        score[(1 - result) as usize] += 1;
        let rec = GameRecord { white, black, moves: game.moves().to_vec(), outcome, result, fallbacks };
        serde_json::to_writer(&mut out, &rec)?;
        out.write_all(b"\n")?;
        pb.set_message(format!("+{} ={} -{}", score[0], score[1], score[2]));
        pb.inc(1);
    }
    pb.finish();
    out.flush()?;
    eprintln!("Wrote {} games to {}", a.games, a.out.display());
    Ok(())
}
