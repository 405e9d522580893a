//! Solve command - Label a position and everything reachable from it

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use super::parse_board;
use crate::{
    cli::output::{create_spinner, format_number, print_kv, print_section, print_stats_table},
    config::SolverConfig,
    solver::{Outcome, SolveStats, Solver, TranspositionTable, best_move},
    tictactoe::BoardState,
};

#[derive(Parser, Debug)]
#[command(about = "Solve a position and report its value under optimal play")]
pub struct SolveArgs {
    /// Board label such as `X...O...._X` (default: empty board, X to move)
    #[arg(long, short = 'b')]
    pub board: Option<String>,

    /// Number of transposition table buckets
    #[arg(long, default_value_t = TranspositionTable::DEFAULT_BUCKET_COUNT)]
    pub buckets: usize,

    /// Print a JSON report instead of text
    #[arg(long)]
    pub json: bool,
}

/// Result of solving one position
#[derive(Debug, Serialize)]
pub struct SolveReport {
    pub board: String,
    pub outcome: Outcome,
    pub best_move: Option<usize>,
    pub bucket_count: usize,
    pub longest_chain: usize,
    pub stats: SolveStats,
}

/// Solve `board` and collect what the command prints
pub fn report(board: &BoardState, config: SolverConfig) -> Result<SolveReport> {
    let mut solver = Solver::new(config).context("invalid solver configuration")?;
    let outcome = solver
        .solve(board)
        .with_context(|| format!("failed to solve {}", board.encode()))?;
    let best_move = if board.is_terminal() {
        None
    } else {
        best_move(solver.table(), board)?
    };

    Ok(SolveReport {
        board: board.encode(),
        outcome,
        best_move,
        bucket_count: solver.table().bucket_count(),
        longest_chain: solver.table().longest_chain(),
        stats: solver.stats().clone(),
    })
}

pub fn execute(args: SolveArgs) -> Result<()> {
    let board = parse_board(args.board.as_deref())?;
    let config = SolverConfig::new().with_bucket_count(args.buckets);

    let spinner = (!args.json).then(|| create_spinner("Solving..."));
    let result = report(&board, config);
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    let report = result?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_section("Solved position");
    println!("{board}\n");
    print_kv("Side to move", &board.to_move.to_string());
    print_kv("Outcome", &report.outcome.to_string());
    let best = match report.best_move {
        Some(pos) => {
            let (x, y) = BoardState::coordinates(pos);
            format!("{pos} (x {x}, y {y})")
        }
        None => "none".to_string(),
    };
    print_kv("Best move", &best);

    print_section("Solver statistics");
    let stats = &report.stats;
    print_stats_table(&[
        ("Positions", format_number(stats.positions as u64)),
        ("Worklist pops", format_number(stats.pops)),
        ("Expansions", format_number(stats.expansions)),
        ("Deferrals", format_number(stats.deferrals)),
        ("Terminal wins", format_number(stats.terminal_wins)),
        ("Terminal draws", format_number(stats.terminal_draws)),
        ("Forced wins", format_number(stats.forced_wins)),
        ("Forced losses", format_number(stats.forced_losses)),
        ("Propagated draws", format_number(stats.propagated_draws)),
        ("Peak worklist", format_number(stats.peak_worklist as u64)),
        (
            "Buckets used",
            format!("{} (longest chain {})", report.bucket_count, report.longest_chain),
        ),
    ]);

    Ok(())
}
