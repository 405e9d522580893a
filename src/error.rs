//! Error types for the Tic-Tac-Toe solver crate

use std::collections::TryReserveError;

use thiserror::Error;

/// Main error type for the solver crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("coordinate ({x}, {y}) is out of range (each must be 0-2)")]
    OutOfRange { x: usize, y: usize },

    #[error("position {position} is out of bounds (must be 0-8)")]
    InvalidPosition { position: usize },

    #[error("illegal move: position {position} is already occupied")]
    IllegalMove { position: usize },

    #[error("game already over")]
    GameOver,

    #[error("could not allocate storage for {what}: {source}")]
    AllocationFailure {
        what: &'static str,
        #[source]
        source: TryReserveError,
    },

    #[error("table not solved for position '{board}'")]
    UnsolvedLookup { board: String },

    #[error("no legal move available in position '{board}'")]
    NoLegalMove { board: String },

    #[error("board string has {got} cells, expected exactly {expected} in '{context}'")]
    InvalidBoardLength {
        expected: usize,
        got: usize,
        context: String,
    },

    #[error("invalid character '{character}' at position {position} in '{context}'")]
    InvalidCellCharacter {
        character: char,
        position: usize,
        context: String,
    },

    #[error("invalid piece counts: X={x_count}, O={o_count} (must be equal or X ahead by 1)")]
    InvalidPieceCounts { x_count: usize, o_count: usize },

    #[error("invalid player '{player}' in '{label}' (expected 'X' or 'O')")]
    InvalidPlayerString { player: String, label: String },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Wrap a failed `try_reserve` as an allocation failure
    pub(crate) fn allocation(what: &'static str) -> impl FnOnce(TryReserveError) -> Error {
        move |source| Error::AllocationFailure { what, source }
    }

    /// Whether the caller can retry with different input (bad coordinates, occupied cell)
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::OutOfRange { .. } | Error::InvalidPosition { .. } | Error::IllegalMove { .. }
        )
    }
}
