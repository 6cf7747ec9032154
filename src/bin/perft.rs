use anyhow::{Context, Result};
use clap::Parser;
use rayon::prelude::*;
use std::path::PathBuf;
use std::time::Instant;
use searchkit::board::{BoardState, Player};
use searchkit::io::parse_input;
use searchkit::perft::{divide, perft};

#[derive(Parser, Debug)]
#[command(name = "perft", about = "Perft driver for the draughts move generator")]
struct Args {
    /// Search depth
    #[arg(value_name = "DEPTH")]
    depth: u32,
    /// Game input file to start from (defaults to the opening position)
    #[arg(long)]
    input: Option<PathBuf>,
    /// Side to move in the opening position
    #[arg(long, default_value = "star")]
    first: Player,
    /// Number of threads for root-split
    #[arg(long, default_value_t = 1)]
    threads: usize,
    /// Print per-root-move counts
    #[arg(long, default_value_t = false)]
    divide: bool,
    /// Report elapsed time and NPS
    #[arg(long, default_value_t = false)]
    nps: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let depth = args.depth;

    let base = match &args.input {
        Some(path) => {
            let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
            parse_input(&text)?.root()
        }
        None => BoardState::startpos(args.first),
    };

    if args.divide {
        for (mv, n) in divide(&base, depth) { println!("{mv}: {n}"); }
    }

    let pool = rayon::ThreadPoolBuilder::new().num_threads(args.threads.max(1)).build().context("thread pool")?;
    let (nodes, dt) = pool.install(|| {
        let t0 = Instant::now();
        let nodes = if args.threads <= 1 || depth == 0 {
            perft(&base, depth)
        } else {
            base.legal_moves().par_iter().map(|mv| perft(&base.apply(mv), depth - 1)).sum()
        };
        (nodes, t0.elapsed().as_secs_f64())
    });

    if args.nps { println!("nodes: {nodes} elapsed: {:.3}s nps: {:.1}", dt, nodes as f64 / dt.max(f64::EPSILON)); }
    else { println!("nodes: {nodes}"); }
    Ok(())
}
