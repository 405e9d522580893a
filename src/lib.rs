//! Exhaustive Tic-Tac-Toe solver
//!
//! This crate provides:
//! - A 3x3 board with move, win and fullness queries
//! - A transposition table labelling every reachable position as a win,
//!   loss or draw under optimal play, filled by worklist-driven backward
//!   induction
//! - Move selection from the solved table
//! - An interactive command-line game (human vs human or vs the computer)

pub mod cli;
pub mod config;
pub mod error;
pub mod solver;
pub mod tictactoe;

pub use config::{MatchConfig, Opponent, SolverConfig};
pub use error::{Error, Result};
pub use solver::{
    ComputerPlayer, EntryId, Outcome, SolveStats, Solver, TranspositionTable, best_move, solve,
};
pub use tictactoe::{BoardState, Cell, Game, GameOutcome, Player};
