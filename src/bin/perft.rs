use minimax_chess::board::cozy::Position;
use minimax_chess::board::{MoveGuard, Rules};
use minimax_chess::perft::{divide, perft};

#[derive(clap::Parser, Debug)]
#[command(name = "perft", about = "Perft driver for the rules collaborator")]
struct Args {
    /// Search depth
    #[arg(value_name = "DEPTH")]
    depth: u32,
    /// FEN string or "startpos"
    #[arg(value_name = "FEN", default_value = "startpos")]
    fen: String,
    /// Number of threads for root-split
    #[arg(long, default_value_t = 1)]
    threads: usize,
    /// Report elapsed time and NPS
    #[arg(long, default_value_t = false)]
    nps: bool,
    /// Print node counts per root move
    #[arg(long, default_value_t = false)]
    divide: bool,
    /// Count with the pleco backend instead (single-threaded)
    #[cfg(feature = "board-pleco")]
    #[arg(long, default_value_t = false)]
    pleco: bool,
}

fn main() -> anyhow::Result<()> {
    use clap::Parser;
    use rayon::prelude::*;
    use std::time::Instant;

    env_logger::init();
    let args = Args::parse();
    let depth = args.depth;

    #[cfg(feature = "board-pleco")]
    if args.pleco {
        use minimax_chess::board::pleco::RevBoard;
        let mut rev = if args.fen == "startpos" { RevBoard::startpos() } else { RevBoard::from_fen(&args.fen)? };
        let t0 = Instant::now();
        let nodes = perft(&mut rev, depth)?;
        let dt = t0.elapsed().as_secs_f64();
        println!("pleco nodes: {nodes} elapsed: {:.3}s nps: {:.1}", dt, nodes as f64 / dt.max(f64::EPSILON));
        return Ok(());
    }

    let mut base = if args.fen == "startpos" { Position::startpos() } else { Position::from_fen(&args.fen)? };

    if args.divide {
        for (mv, n) in divide(&mut base, depth)? {
            println!("{}: {}", base.uci(mv), n);
        }
    }

    let pool = rayon::ThreadPoolBuilder::new().num_threads(args.threads.max(1)).build()?;
    let (nodes, dt) = pool.install(|| -> anyhow::Result<(u64, f64)> {
        let t0 = Instant::now();
        let nodes = if args.threads <= 1 || depth == 0 {
            perft(&mut base, depth)?
        } else {
            // Each worker searches its own clone; the base board is never shared mutably.
            let root_moves = base.legal_moves();
            root_moves.par_iter().map(|&mv| {
                let mut b = base.clone();
                let mut child = MoveGuard::push(&mut b, mv)?;
                perft(&mut *child, depth - 1)
            }).sum::<Result<u64, _>>()?
        };
        Ok((nodes, t0.elapsed().as_secs_f64()))
    })?;

    if args.nps { println!("nodes: {nodes} elapsed: {:.3}s nps: {:.1}", dt, nodes as f64 / dt.max(f64::EPSILON)); }
    else { println!("nodes: {nodes}"); }
    Ok(())
}
