//! High-level game management

use serde::{Deserialize, Serialize};

use super::board::{BoardState, Player};

/// A move in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub position: usize,
    pub player: Player,
}

/// Outcome of a finished game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    Win(Player),
    Draw,
}

impl GameOutcome {
    /// Outcome of a terminal board, `None` while play can continue
    pub fn of(board: &BoardState) -> Option<GameOutcome> {
        match board.winner() {
            Some(winner) => Some(GameOutcome::Win(winner)),
            None if board.is_full() => Some(GameOutcome::Draw),
            None => None,
        }
    }
}

/// A game in progress: one board shared by both sides plus its history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    board: BoardState,
    moves: Vec<Move>,
    outcome: Option<GameOutcome>,
}

impl Game {
    /// Create a new game on an empty board with X to move
    pub fn new() -> Self {
        Self::from_board(BoardState::new())
    }

    /// Start from an arbitrary position
    pub fn from_board(board: BoardState) -> Self {
        Game {
            board,
            moves: Vec::new(),
            outcome: GameOutcome::of(&board),
        }
    }

    /// Play a move for whoever is to move.
    ///
    /// # Errors
    ///
    /// - [`crate::Error::GameOver`] once the game has an outcome
    /// - any error from [`BoardState::apply_move`]; the game is unchanged
    pub fn play(&mut self, position: usize) -> Result<Option<GameOutcome>, crate::Error> {
        if self.outcome.is_some() {
            return Err(crate::Error::GameOver);
        }

        let player = self.board.to_move;
        self.board.apply_move(position)?;
        self.moves.push(Move { position, player });
        self.outcome = GameOutcome::of(&self.board);

        Ok(self.outcome)
    }

    /// [`play`](Self::play) addressed by column and row
    pub fn play_at(&mut self, x: usize, y: usize) -> Result<Option<GameOutcome>, crate::Error> {
        let position = BoardState::index(x, y)?;
        self.play(position)
    }

    pub fn board(&self) -> &BoardState {
        &self.board
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
