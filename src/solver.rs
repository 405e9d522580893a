//! Exhaustive solver: transposition table, successor generation, backward
//! induction and move selection

pub mod movegen;
pub mod outcome;
pub mod search;
pub mod select;
pub mod table;

pub use movegen::{generate_children, successors};
pub use outcome::Outcome;
pub use search::{SolveStats, Solver, solve};
pub use select::{ComputerPlayer, FALLBACK_ORDER, best_move};
pub use table::{Entry, EntryId, TranspositionTable};
