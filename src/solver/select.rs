//! Move selection from a solved table

use tracing::{debug, warn};

use crate::{
    config::SolverConfig,
    error::{Error, Result},
    solver::{Outcome, Solver, TranspositionTable, successors},
    tictactoe::{BoardState, Player},
};

/// Cells tried, in order, when every move loses: centre, corners, edges
pub const FALLBACK_ORDER: [usize; 9] = [4, 0, 2, 6, 8, 1, 7, 3, 5];

/// Pick a move for the side to play in `board` that keeps its recorded outcome.
///
/// In a lost position no move changes the result, so the first empty cell
/// of [`FALLBACK_ORDER`] is played instead. Otherwise the first cell in
/// row-major order whose successor carries the same label wins. `Ok(None)`
/// means there is no legal move (or, for a non-full board, that the table
/// is inconsistent).
///
/// # Errors
///
/// Returns [`Error::UnsolvedLookup`] if `board` or a successor that must be
/// consulted is missing from the table, or `board` is still unresolved.
/// Either means the table was not solved from an ancestor of `board`.
pub fn best_move(table: &TranspositionTable, board: &BoardState) -> Result<Option<usize>> {
    let target = table
        .outcome_of(board)
        .filter(|outcome| outcome.is_known())
        .ok_or_else(|| Error::UnsolvedLookup {
            board: board.encode(),
        })?;
    let mover = board.to_move;

    if target.is_win_for(mover.opponent()) {
        let choice = FALLBACK_ORDER.into_iter().find(|&pos| board.is_empty(pos));
        debug!(board = %board.encode(), ?choice, "lost position, using static preference");
        return Ok(choice);
    }

    for (pos, next) in successors(board) {
        let outcome = table
            .outcome_of(&next)
            .ok_or_else(|| Error::UnsolvedLookup {
                board: next.encode(),
            })?;
        if outcome == target {
            return Ok(Some(pos));
        }
    }

    if !board.is_full() {
        warn!(board = %board.encode(), %target, "no successor matches the recorded outcome");
    }
    Ok(None)
}

/// Computer opponent backed by a table solved once at the start of a match
#[derive(Debug)]
pub struct ComputerPlayer {
    plays: Player,
    table: TranspositionTable,
}

impl ComputerPlayer {
    /// Solve every position reachable from `start`
    pub fn new(plays: Player, start: &BoardState, config: &SolverConfig) -> Result<Self> {
        let mut solver = Solver::new(config.clone())?;
        solver.solve(start)?;
        Ok(Self {
            plays,
            table: solver.into_table(),
        })
    }

    pub fn plays(&self) -> Player {
        self.plays
    }

    /// Recorded value of `board`, if the table has it
    pub fn evaluate(&self, board: &BoardState) -> Option<Outcome> {
        self.table.outcome_of(board)
    }

    /// The cell to play in `board`.
    ///
    /// # Errors
    ///
    /// [`Error::NoLegalMove`] if the board offers no move, or anything
    /// [`best_move`] reports.
    pub fn choose(&self, board: &BoardState) -> Result<usize> {
        best_move(&self.table, board)?.ok_or_else(|| Error::NoLegalMove {
            board: board.encode(),
        })
    }
}
