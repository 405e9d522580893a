//! Subcommands of the `tictactoe` binary

pub mod best_move;
pub mod play;
pub mod solve;

use anyhow::{Result, anyhow};

use crate::tictactoe::{BoardState, Player};

/// Parse a `--board` label, defaulting to the empty board with X to move
pub(crate) fn parse_board(label: Option<&str>) -> Result<BoardState> {
    match label {
        Some(label) => Ok(BoardState::from_string(label)?),
        None => Ok(BoardState::new()),
    }
}

pub(crate) fn parse_player_token(value: &str, flag: &str) -> Result<Player> {
    match value.trim().to_ascii_lowercase().as_str() {
        "x" => Ok(Player::X),
        "o" => Ok(Player::O),
        other => Err(anyhow!(
            "Invalid value '{other}' for {flag} (expected 'x' or 'o')"
        )),
    }
}
