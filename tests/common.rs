//! Common test utilities for the solver test suite.
//!
//! This module provides helpers for building solved tables and checking
//! labels against the labels of successor positions.

#![allow(dead_code)]

use tictactoe_solver::{BoardState, Outcome, Player, TranspositionTable, solver::successors};

/// Table solved from the empty board with `first` to move
pub fn solved_from_empty(first: Player) -> TranspositionTable {
    tictactoe_solver::solve(&BoardState::new_with_player(first)).expect("solve should succeed")
}

/// The label a position must carry given the labels of its successors.
///
/// # Panics
///
/// Panics if a successor is missing or unresolved.
pub fn expected_label(table: &TranspositionTable, board: &BoardState) -> Outcome {
    if let Some(winner) = board.winner() {
        return Outcome::win_for(winner);
    }
    if board.is_full() {
        return Outcome::Draw;
    }

    let mover = board.to_move;
    let children: Vec<Outcome> = successors(board)
        .map(|(pos, next)| {
            let outcome = table
                .outcome_of(&next)
                .unwrap_or_else(|| panic!("successor {pos} of {} missing", board.encode()));
            assert!(
                outcome.is_known(),
                "successor {pos} of {} unresolved",
                board.encode()
            );
            outcome
        })
        .collect();

    if children.iter().any(|o| o.is_win_for(mover)) {
        Outcome::win_for(mover)
    } else if children.iter().any(|&o| o == Outcome::Draw) {
        Outcome::Draw
    } else {
        Outcome::win_for(mover.opponent())
    }
}
