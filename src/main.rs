use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use minimax_chess::board::cozy::Position;
use minimax_chess::board::{Color, Rules};
use minimax_chess::config::EngineConfig;
use minimax_chess::game::Game;
use minimax_chess::search::eval::breakdown;
use minimax_chess::search::{Difficulty, Searcher};
use minimax_chess::uci::UciEngine;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Print the engine's move for a position
    Best,
    /// Human against the engine on stdin
    Play,
    /// Engine against itself
    Selfplay,
    /// UCI protocol loop
    Uci,
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Play chess against a minimax alpha-beta engine", long_about = None)]
struct Args {
    #[arg(long, value_enum, default_value_t = Mode::Play)]
    mode: Mode,

    /// Beginner, Intermediate or Expert (anything else plays as Intermediate)
    #[arg(long)]
    difficulty: Option<String>,

    /// Your color: 'w' for white, 'b' for black
    #[arg(long)]
    color: Option<String>,

    /// Starting FEN position
    #[arg(long)]
    fen: Option<String>,

    /// Seed for the fallback RNG
    #[arg(long)]
    seed: Option<u64>,

    /// Stop self-play after this many plies
    #[arg(long)]
    max_plies: Option<usize>,

    /// JSON config file; flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the evaluation breakdown in best mode
    #[arg(long)]
    explain: bool,
}

fn parse_color(color_str: &str) -> Result<Color> {
    match color_str.to_lowercase().as_str() {
        "w" | "white" => Ok(Color::White),
        "b" | "black" => Ok(Color::Black),
        _ => anyhow::bail!("Invalid color: use 'w' or 'b'"),
    }
}

fn resolve_config(args: &Args) -> Result<EngineConfig> {
    let mut cfg = match &args.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    if let Some(d) = args.difficulty.as_deref() { cfg.difficulty = Difficulty::from_name(d); }
    if let Some(c) = args.color.as_deref() { cfg.human_color = Some(parse_color(c)?); }
    if let Some(f) = &args.fen { cfg.fen = Some(f.clone()); }
    if let Some(s) = args.seed { cfg.seed = Some(s); }
    if let Some(p) = args.max_plies { cfg.max_plies = p; }
    if args.mode == Mode::Play && cfg.human_color.is_none() { cfg.human_color = Some(Color::White); }
    Ok(cfg)
}

fn new_game(cfg: &EngineConfig) -> Result<Game> {
    match cfg.fen.as_deref() {
        Some(fen) => Game::from_fen(fen).context("Invalid FEN string"),
        None => Ok(Game::new()),
    }
}

fn get_human_move(game: &mut Game) -> Result<bool> {
    loop {
        print!("Enter your move (e.g., e2e4, 'undo', 'quit'): ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 { return Ok(false); }
        let input = input.trim();
        match input {
            "quit" => return Ok(false),
            "undo" => {
                // Take back the engine reply and our own move.
                for _ in 0..2 { if game.undo().is_err() { break; } }
                println!("\n{}", game.position().board());
                continue;
            }
            _ => {}
        }
        match game.play_uci(input) {
            Ok(_) => return Ok(true),
            Err(e) => println!("{e}"),
        }
    }
}

fn run_best(cfg: &EngineConfig, explain: bool) -> Result<()> {
    let mut pos = match cfg.fen.as_deref() {
        Some(fen) => Position::from_fen(fen)?,
        None => Position::startpos(),
    };
    if explain {
        let b = breakdown(&pos);
        println!("material={:.2} positional={:.2} king_safety={:.2} total={:.2}", b.material, b.positional, b.king_safety, b.total);
    }
    let depth = cfg.difficulty.depth();
    let t0 = Instant::now();
    let res = Searcher::new().search_depth(&mut pos, depth)?;
    let dt = t0.elapsed();
    match res.best_move {
        Some(m) => println!("bestmove={} score={:.2} depth={} nodes={} cutoffs={} elapsed={:.3}s",
            pos.uci(m), res.score, depth, res.stats.nodes, res.stats.cutoffs, dt.as_secs_f64()),
        None => println!("bestmove=(none) score={:.2}", res.score),
    }
    Ok(())
}

fn run_game(cfg: &EngineConfig) -> Result<()> {
    let mut rng = match cfg.seed {
        Some(s) => SmallRng::seed_from_u64(s),
        None => SmallRng::from_entropy(),
    };
    let mut game = new_game(cfg)?;
    println!("Difficulty: {} (depth {})", cfg.difficulty, cfg.difficulty.depth());

    loop {
        if let Some(outcome) = game.outcome() {
            println!("\n{}", game.position().board());
            println!("\n{outcome}");
            break;
        }
        if game.moves().len() >= cfg.max_plies {
            println!("\nStopped after {} plies.", game.moves().len());
            break;
        }

        let turn = game.position().turn();
        let is_human_turn = cfg.human_color == Some(turn);
        if is_human_turn {
            println!("\n{}'s turn", turn);
            println!("\n{}", game.position().board());
            if !get_human_move(&mut game)? { break; }
        } else {
            let start_time = Instant::now();
            let choice = game.play_engine(cfg.difficulty, &mut rng)?;
            let stats = game.searcher().stats();
            let played = game.moves().last().cloned().unwrap_or_default();
            match choice.score {
                Some(score) => println!("{} plays: {} (score {:.2}, nodes {}, {:.2}s)",
                    turn, played, score, stats.nodes, start_time.elapsed().as_secs_f32()),
                None => println!("{} plays: {} (random fallback)", turn, played),
            }
        }
    }

    println!("\nMoves: {}", game.moves().join(" "));
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let cfg = resolve_config(&args)?;

    match args.mode {
        Mode::Best => run_best(&cfg, args.explain),
        Mode::Play | Mode::Selfplay => run_game(&cfg),
        Mode::Uci => {
            let mut engine = UciEngine::new(cfg.difficulty, cfg.seed.unwrap_or(0));
            engine.run_loop()?;
            Ok(())
        }
    }
}
