//! Best-move command - Print the move the solver would play

use anyhow::{Context, Result};
use clap::Parser;

use super::parse_board;
use crate::{
    config::SolverConfig,
    solver::{ComputerPlayer, Outcome},
    tictactoe::BoardState,
};

#[derive(Parser, Debug)]
#[command(about = "Print the best move for a position")]
pub struct BestMoveArgs {
    /// Board label such as `X...O...._X`
    #[arg(long, short = 'b')]
    pub board: String,
}

/// The move chosen for `board` and the value it keeps
pub fn choose(board: &BoardState) -> Result<(usize, Outcome)> {
    let computer = ComputerPlayer::new(board.to_move, board, &SolverConfig::default())
        .with_context(|| format!("failed to solve {}", board.encode()))?;
    let pos = computer.choose(board)?;
    let outcome = computer.evaluate(board).unwrap_or_default();
    Ok((pos, outcome))
}

pub fn execute(args: BestMoveArgs) -> Result<()> {
    let board = parse_board(Some(&args.board))?;
    let (pos, outcome) = choose(&board)?;
    let (x, y) = BoardState::coordinates(pos);
    println!("{pos} (x {x}, y {y}) - {outcome}");
    Ok(())
}
