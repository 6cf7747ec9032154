use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use searchkit::csp::coloring::ColoringProblem;
use searchkit::io::{format_output, parse_input};
use searchkit::mdp::iteration::DEFAULT_EPSILON;
use searchkit::mdp::{best_policy, format_policy, value_iteration, GridMdp, GridSpec};
use searchkit::search::{self, Algorithm};

#[derive(Parser, Debug)]
#[command(author, version, about = "Adversarial search, constraint and MDP solvers", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Pick a move for the player to move with minimax or alpha-beta
    Game {
        /// Input file: player, algorithm, depth, 8 board rows, row weights
        #[arg(long, default_value = "input.txt")]
        input: PathBuf,

        /// Output file: move, myopic utility, farsighted utility, node count
        #[arg(long, default_value = "output.txt")]
        output: PathBuf,

        /// Override the algorithm named in the input file
        #[arg(long)]
        algorithm: Option<Algorithm>,

        /// Override the depth limit named in the input file
        #[arg(long)]
        depth: Option<u32>,

        /// Also print the result as JSON on stdout
        #[arg(long)]
        json: bool,
    },
    /// Solve a graph-colouring constraint problem described in JSON
    Csp {
        #[arg(long)]
        config: PathBuf,

        #[arg(long, default_value = "output.txt")]
        output: PathBuf,
    },
    /// Value-iterate a grid world described in JSON and write the policy
    Mdp {
        #[arg(long)]
        config: PathBuf,

        #[arg(long, default_value = "output.txt")]
        output: PathBuf,

        /// Convergence tolerance
        #[arg(long, default_value_t = DEFAULT_EPSILON)]
        epsilon: f64,
    },
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

fn write(path: &Path, text: &str) -> Result<()> {
    fs::write(path, text).with_context(|| format!("writing {}", path.display()))
}

fn run_game(input: &Path, output: &Path, algorithm: Option<Algorithm>, depth: Option<u32>, json: bool) -> Result<()> {
    let mut game = parse_input(&read(input)?).with_context(|| format!("parsing {}", input.display()))?;
    if let Some(a) = algorithm { game.params.algorithm = a; }
    if let Some(d) = depth { game.params.depth = d; }
    log::info!("{} to move, {} depth {}", game.player, game.params.algorithm, game.params.depth);
    log::debug!("root board:\n{}", game.board);

    let res = search::search(&game.root(), &game.evaluator(), game.params);
    write(output, &format_output(&res))?;
    if json {
        let payload = serde_json::json!({
            "player": game.player,
            "params": game.params,
            "move": res.decision.notation(),
            "myopic": res.decision.myopic(),
            "farsighted": res.decision.farsighted(),
            "nodes": res.nodes,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
    }
    Ok(())
}

fn run_csp(config: &Path, output: &Path) -> Result<()> {
    let problem: ColoringProblem = serde_json::from_str(&read(config)?)
        .with_context(|| format!("parsing {}", config.display()))?;
    let outcome = problem.solve()?;
    write(output, &problem.format_outcome(&outcome))
}

fn run_mdp(config: &Path, output: &Path, epsilon: f64) -> Result<()> {
    let spec: GridSpec = serde_json::from_str(&read(config)?)
        .with_context(|| format!("parsing {}", config.display()))?;
    let mdp = GridMdp::from_spec(&spec)?;
    let utilities = value_iteration(&mdp, epsilon);
    let policy = best_policy(&mdp, &utilities);
    write(output, &format_policy(&policy))
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    match args.command {
        Command::Game { input, output, algorithm, depth, json } => run_game(&input, &output, algorithm, depth, json),
        Command::Csp { config, output } => run_csp(&config, &output),
        Command::Mdp { config, output, epsilon } => run_mdp(&config, &output, epsilon),
    }
}
