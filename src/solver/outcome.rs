//! Solved labels for board positions

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::tictactoe::{GameOutcome, Player};

/// Value of a position under optimal play by both sides.
///
/// `Unknown` is the only label a table entry may leave; the others are
/// final once written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Outcome {
    #[default]
    Unknown,
    Win(Player),
    Draw,
}

impl Outcome {
    /// The label meaning "`player` wins"
    pub fn win_for(player: Player) -> Outcome {
        Outcome::Win(player)
    }

    pub fn is_known(self) -> bool {
        self != Outcome::Unknown
    }

    /// True if this label is a win for `player`
    pub fn is_win_for(self, player: Player) -> bool {
        self == Outcome::win_for(player)
    }
}

impl From<GameOutcome> for Outcome {
    fn from(outcome: GameOutcome) -> Self {
        match outcome {
            GameOutcome::Win(player) => Outcome::win_for(player),
            GameOutcome::Draw => Outcome::Draw,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Unknown => write!(f, "Win state unknown"),
            Outcome::Win(player) => write!(f, "{} wins", player.to_char()),
            Outcome::Draw => write!(f, "Draw"),
        }
    }
}
