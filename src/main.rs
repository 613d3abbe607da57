//! Corner the Queen: console game and solver.
//!
//! ## Usage
//!
//! - `corner-queen` - Play interactively (same as `play`)
//! - `corner-queen play --rows 4 --cols 4 -x 2 --mode 2` - Skip the setup prompts
//! - `corner-queen analyze --rows 5 --cols 5 -x 2 --row 4 --col 4` - Solve one position
//! - `corner-queen analyze --rows 5 --cols 5 -x 2` - Solve the initial placement
//!
//! Set `RUST_LOG=debug` to trace search summaries on stderr.

use std::io;

use anyhow::{Result, bail};
use clap::{Args, Parser, Subcommand};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use corner_queen::game::{Console, Game, Mode, prompt_board, prompt_mode};
use corner_queen::position::{BoardConfig, Pos, classify_move};
use corner_queen::search::{SearchMethod, SearchResult, pick_initial_position, search};

/// Corner the Queen: move the queen onto (0,0) to win
#[derive(Parser)]
#[command(name = "corner-queen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a game on the console against another human or the AI
    Play(PlayArgs),
    /// Solve a position with both minimax and alpha-beta and compare them
    Analyze(AnalyzeArgs),
}

#[derive(Args, Default)]
struct PlayArgs {
    /// Number of rows (prompted for if any board setting is missing)
    #[arg(long)]
    rows: Option<i32>,
    /// Number of columns
    #[arg(long)]
    cols: Option<i32>,
    /// Maximum squares the queen may travel per move
    #[arg(short = 'x', long = "steps")]
    steps: Option<i32>,
    /// 1 = Human vs Human, 2 = AI vs Human
    #[arg(long, value_parser = clap::value_parser!(i32).range(1..=2))]
    mode: Option<i32>,
    /// Seed for the Human vs Human coin toss
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Args)]
struct AnalyzeArgs {
    #[arg(long)]
    rows: i32,
    #[arg(long)]
    cols: i32,
    /// Maximum squares the queen may travel per move
    #[arg(short = 'x', long = "steps")]
    steps: i32,
    /// Queen row; omit together with --col to solve the initial placement
    #[arg(long, requires = "col")]
    row: Option<i32>,
    /// Queen column
    #[arg(long, requires = "row")]
    col: Option<i32>,
    /// Search for the minimizing side instead of the maximizing one
    #[arg(long)]
    min: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Analyze(args)) => run_analyze(&args),
        Some(Commands::Play(args)) => run_play(&args),
        None => run_play(&PlayArgs::default()),
    }
}

fn run_play(args: &PlayArgs) -> Result<()> {
    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout());

    console.say("Welcome to Corner the Queen Game!")?;
    console.say("***********************************")?;
    console.say("Note: All inputs are zero-indexed! Winning corner is (0,0).")?;

    let mode = match args.mode.and_then(Mode::from_choice) {
        Some(mode) => mode,
        None => prompt_mode(&mut console)?,
    };

    let cfg = match (args.rows, args.cols, args.steps) {
        (Some(rows), Some(cols), Some(x)) => BoardConfig::new(rows, cols, x)?,
        _ => prompt_board(&mut console)?,
    };

    let mut game = Game::new(cfg, mode, console);
    if let Some(seed) = args.seed {
        game = game.with_rng(fastrand::Rng::with_seed(seed));
    }
    game.run()?;
    Ok(())
}

fn run_analyze(args: &AnalyzeArgs) -> Result<()> {
    let cfg = BoardConfig::new(args.rows, args.cols, args.steps)?;
    let maximizing = !args.min;

    match (args.row, args.col) {
        (Some(row), Some(col)) => {
            let pos = Pos::new(row, col);
            if !cfg.contains(pos) {
                bail!("position {pos} is outside the {}x{} board", cfg.rows, cfg.cols);
            }

            let full = search(pos, &cfg, maximizing, SearchMethod::Minimax);
            let pruned = search(pos, &cfg, maximizing, SearchMethod::AlphaBeta);
            print_result(SearchMethod::Minimax, pos, &full);
            print_result(SearchMethod::AlphaBeta, pos, &pruned);

            if (full.value, full.best_move) != (pruned.value, pruned.best_move) {
                warn!(%pos, "minimax and alpha-beta disagree");
                println!("MISMATCH between minimax and alpha-beta");
            }
        }
        _ => {
            let mut picks = Vec::new();
            for method in [SearchMethod::Minimax, SearchMethod::AlphaBeta] {
                let use_pruning = method == SearchMethod::AlphaBeta;
                match pick_initial_position(cfg.rows, cfg.cols, cfg.x, use_pruning, maximizing) {
                    Some((pos, nodes)) => {
                        println!("{:<11} placement={pos} nodes={nodes}", method.name());
                        picks.push(pos);
                    }
                    None => bail!("board has no starting square"),
                }
            }
            if picks[0] != picks[1] {
                warn!("minimax and alpha-beta chose different placements");
                println!("MISMATCH between minimax and alpha-beta");
            }
        }
    }

    Ok(())
}

fn print_result(method: SearchMethod, from: Pos, result: &SearchResult) {
    let mv = match result.best_move {
        Some(to) => match classify_move(from, to) {
            Some((dir, step)) => format!("{to} ({} {step})", dir.name()),
            None => to.to_string(),
        },
        None => "none".to_string(),
    };
    println!(
        "{:<11} value={:+} move={mv} nodes={}",
        method.name(),
        result.value,
        result.nodes
    );
}
