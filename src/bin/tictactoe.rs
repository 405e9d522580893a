//! Tic-Tac-Toe CLI - play against a perfect opponent or inspect solved positions
//!
//! This CLI provides:
//! - Interactive games, human vs human or human vs computer
//! - Solving a position and reporting solver statistics
//! - Printing the best move for a position

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tictactoe")]
#[command(version, about = "Exhaustive Tic-Tac-Toe solver and game", long_about = None)]
struct Cli {
    /// Log solver progress (overridden by RUST_LOG)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play an interactive game
    Play(tictactoe_solver::cli::commands::play::PlayArgs),

    /// Solve a position and print its value and statistics
    Solve(tictactoe_solver::cli::commands::solve::SolveArgs),

    /// Print the best move for a position
    BestMove(tictactoe_solver::cli::commands::best_move::BestMoveArgs),
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "tictactoe_solver=info"
    } else {
        "tictactoe_solver=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Play(args) => tictactoe_solver::cli::commands::play::execute(args),
        Commands::Solve(args) => tictactoe_solver::cli::commands::solve::execute(args),
        Commands::BestMove(args) => tictactoe_solver::cli::commands::best_move::execute(args),
    }
}
