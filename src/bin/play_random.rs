use anyhow::Result;
use clap::Parser;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use searchkit::board::{BoardState, Player};
use searchkit::search::eval::{Evaluator, RowWeights, MAX_ROW_WEIGHT};
use searchkit::search::{search, Algorithm, Decision, SearchParams};

#[derive(Parser, Debug)]
#[command(name = "play_random", about = "Play the search engine against a seeded random mover")]
struct Args {
    #[arg(long, default_value_t = 10)]
    games: usize,
    /// Search depth; the engine needs at least one ply to pick a move
    #[arg(long, default_value_t = 4, value_parser = clap::value_parser!(u32).range(1..))]
    depth: u32,
    #[arg(long, default_value = "alphabeta")]
    algorithm: Algorithm,
    /// Colour played by the engine
    #[arg(long, default_value = "star")]
    engine: Player,
    #[arg(long, default_value_t = 150)]
    max_plies: u32,
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// Row weights, home row first
    #[arg(long, value_delimiter = ',', default_value = "1,1,2,2,3,3,4,5")]
    weights: Vec<i32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Engine,
    Random,
    Unfinished,
}

fn play_one(args: &Args, weights: RowWeights, rng: &mut SmallRng, first: Player) -> Outcome {
    let eval = Evaluator::new(weights, args.engine);
    let params = SearchParams { algorithm: args.algorithm, depth: args.depth };
    let mut state = BoardState::startpos(first);
    while state.ply() < args.max_plies {
        let moves = state.legal_moves();
        // No legal move loses.
        if moves.is_empty() {
            return if state.side_to_move() == args.engine { Outcome::Random } else { Outcome::Engine };
        }
        let mv = if state.side_to_move() == args.engine {
            match search(&state, &eval, params).decision {
                Decision::Move { mv, .. } => mv,
                Decision::Pass { .. } => return Outcome::Random,
            }
        } else {
            moves[rng.gen_range(0..moves.len())].clone()
        };
        log::debug!("ply {}: {} plays {}", state.ply(), state.side_to_move(), mv);
        state = state.apply(&mv);
    }
    Outcome::Unfinished
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    if args.weights.len() != 8 { anyhow::bail!("expected 8 row weights, got {}", args.weights.len()); }
    let mut w = [0i32; 8];
    w.copy_from_slice(&args.weights);
    let weights = RowWeights(w);
    if let Some(bad) = weights.out_of_range() {
        anyhow::bail!("row weight {bad} is outside -{MAX_ROW_WEIGHT}..={MAX_ROW_WEIGHT}");
    }

    let mut rng = SmallRng::seed_from_u64(args.seed);
    let (mut won, mut lost, mut open) = (0usize, 0usize, 0usize);
    for gi in 0..args.games {
        let first = if gi % 2 == 0 { Player::Star } else { Player::Circle };
        match play_one(&args, weights, &mut rng, first) {
            Outcome::Engine => won += 1,
            Outcome::Random => lost += 1,
            Outcome::Unfinished => open += 1,
        }
        log::info!("game {}: engine {} / random {} / unfinished {}", gi + 1, won, lost, open);
    }
    println!("engine wins: {won}, random wins: {lost}, unfinished: {open}");
    Ok(())
}
