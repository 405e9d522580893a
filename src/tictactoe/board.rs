//! Board state representation and basic operations

use std::fmt;

use serde::{Deserialize, Serialize};

use super::lines::LineAnalyzer;

/// Side length of the board
pub const BOARD_SIDE: usize = 3;

/// Number of cells on the board
pub const CELL_COUNT: usize = BOARD_SIDE * BOARD_SIDE;

/// A cell on the Tic-Tac-Toe board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    X,
    O,
}

impl Cell {
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }

    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '.' | ' ' | 'E' | 'e' => Some(Cell::Empty),
            'X' | 'x' => Some(Cell::X),
            'O' | 'o' | '0' => Some(Cell::O),
            _ => None,
        }
    }

    /// Numeric weight of the cell, used by the transposition table hash
    pub fn value(self) -> usize {
        match self {
            Cell::Empty => 0,
            Cell::X => 1,
            Cell::O => 2,
        }
    }

    /// The player owning this cell, if any
    pub fn to_player(self) -> Option<Player> {
        match self {
            Cell::X => Some(Player::X),
            Cell::O => Some(Player::O),
            Cell::Empty => None,
        }
    }
}

/// A player in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Get the opponent player
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Convert player to cell
    pub fn to_cell(self) -> Cell {
        match self {
            Player::X => Cell::X,
            Player::O => Cell::O,
        }
    }

    pub fn to_char(self) -> char {
        self.to_cell().to_char()
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {}", self.to_char())
    }
}

/// Complete board state including cells and whose turn it is
///
/// Two boards are equal iff all nine cells and the side to move match. The
/// type is `Copy`: successors are always built from a copy, never by
/// mutating a board that has been published into the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardState {
    pub cells: [Cell; CELL_COUNT],
    pub to_move: Player,
}

/// Count of each piece type on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PieceCount {
    x: usize,
    o: usize,
}

impl BoardState {
    /// Create a new empty board with X to move
    pub fn new() -> Self {
        Self::new_with_player(Player::X)
    }

    /// Create a new empty board with a specified player to move first.
    pub fn new_with_player(first_player: Player) -> Self {
        BoardState {
            cells: [Cell::Empty; CELL_COUNT],
            to_move: first_player,
        }
    }

    /// Linear index of column `x`, row `y`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::OutOfRange`] if either coordinate is outside `0..3`.
    pub fn index(x: usize, y: usize) -> Result<usize, crate::Error> {
        if x < BOARD_SIDE && y < BOARD_SIDE {
            Ok(y * BOARD_SIDE + x)
        } else {
            Err(crate::Error::OutOfRange { x, y })
        }
    }

    /// Column and row of a linear index
    pub fn coordinates(pos: usize) -> (usize, usize) {
        (pos % BOARD_SIDE, pos / BOARD_SIDE)
    }

    /// Cell at column `x`, row `y`
    pub fn get(&self, x: usize, y: usize) -> Result<Cell, crate::Error> {
        Ok(self.cells[Self::index(x, y)?])
    }

    /// Overwrite the cell at column `x`, row `y` without touching the side to move
    pub fn set(&mut self, x: usize, y: usize, cell: Cell) -> Result<(), crate::Error> {
        let pos = Self::index(x, y)?;
        self.cells[pos] = cell;
        Ok(())
    }

    /// Get cell at position (0-8)
    pub fn cell(&self, pos: usize) -> Cell {
        self.cells[pos]
    }

    /// Check if a position is empty
    pub fn is_empty(&self, pos: usize) -> bool {
        self.cells[pos] == Cell::Empty
    }

    /// Get all empty positions in row-major order
    pub fn empty_positions(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell == Cell::Empty)
            .map(|(i, _)| i)
            .collect()
    }

    /// Count the number of occupied cells on the board.
    pub fn occupied_count(&self) -> usize {
        let count = Self::count_pieces(&self.cells);
        count.x + count.o
    }

    /// Place the side to move on `pos` and pass the turn.
    ///
    /// The board is left untouched when the move fails.
    ///
    /// # Errors
    ///
    /// - [`crate::Error::InvalidPosition`] if `pos` is not in `0..9`
    /// - [`crate::Error::IllegalMove`] if the cell is already occupied
    pub fn apply_move(&mut self, pos: usize) -> Result<(), crate::Error> {
        if pos >= CELL_COUNT {
            return Err(crate::Error::InvalidPosition { position: pos });
        }
        if !self.is_empty(pos) {
            return Err(crate::Error::IllegalMove { position: pos });
        }

        self.cells[pos] = self.to_move.to_cell();
        self.to_move = self.to_move.opponent();
        Ok(())
    }

    /// [`apply_move`](Self::apply_move) addressed by column and row.
    ///
    /// Returns the linear index played.
    pub fn apply_move_at(&mut self, x: usize, y: usize) -> Result<usize, crate::Error> {
        let pos = Self::index(x, y)?;
        self.apply_move(pos)?;
        Ok(pos)
    }

    /// Make a move and return a new board state
    #[must_use = "make_move returns a new board state; the original is unchanged"]
    pub fn make_move(&self, pos: usize) -> Result<BoardState, crate::Error> {
        let mut next = *self;
        next.apply_move(pos)?;
        Ok(next)
    }

    /// True iff no cell is empty
    pub fn is_full(&self) -> bool {
        !self.cells.contains(&Cell::Empty)
    }

    /// Check if a player has won
    pub fn has_won(&self, player: Player) -> bool {
        LineAnalyzer::has_won(&self.cells, player)
    }

    /// The owner of any completed line, scanning the whole board
    pub fn winner(&self) -> Option<Player> {
        LineAnalyzer::winner(&self.cells)
    }

    /// Check if the game is over (win or full board)
    pub fn is_terminal(&self) -> bool {
        self.winner().is_some() || self.is_full()
    }

    /// Get a string representation such as `X.O......_X`
    pub fn encode(&self) -> String {
        format!(
            "{}_{}",
            self.cells.iter().map(|&c| c.to_char()).collect::<String>(),
            self.to_move.to_char()
        )
    }

    /// Create a board from a string representation.
    ///
    /// The string should contain 9 cell characters (whitespace is filtered
    /// out) and may include a suffix `_X` or `_O` to set the player to move.
    /// Without the suffix the player is inferred from the piece counts with
    /// X moving first.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The board part does not have exactly 9 non-whitespace characters
    /// - Any character is not a valid cell representation
    /// - The piece counts are invalid (difference greater than 1)
    /// - A provided `_X`/`_O` suffix conflicts with the piece counts
    pub fn from_string(s: &str) -> Result<Self, crate::Error> {
        let cleaned: String = s.chars().filter(|c| !c.is_whitespace()).collect();
        let (board_part, specified_turn) = Self::split_board_and_turn(&cleaned)?;
        let chars: Vec<char> = board_part.chars().collect();
        let cells = Self::parse_cells(&chars, s)?;
        let count = Self::count_pieces(&cells);

        let to_move = match specified_turn {
            Some(turn) => {
                Self::ensure_turn_consistent_with_counts(&count, turn, s)?;
                turn
            }
            None => Self::determine_turn_from_counts(&count)?,
        };

        Ok(BoardState { cells, to_move })
    }

    fn parse_cells(chars: &[char], context: &str) -> Result<[Cell; CELL_COUNT], crate::Error> {
        if chars.len() != CELL_COUNT {
            return Err(crate::Error::InvalidBoardLength {
                expected: CELL_COUNT,
                got: chars.len(),
                context: context.to_string(),
            });
        }

        let mut cells = [Cell::Empty; CELL_COUNT];
        for (i, &c) in chars.iter().enumerate() {
            cells[i] = Cell::from_char(c).ok_or_else(|| crate::Error::InvalidCellCharacter {
                character: c,
                position: i,
                context: context.to_string(),
            })?;
        }

        Ok(cells)
    }

    fn count_pieces(cells: &[Cell; CELL_COUNT]) -> PieceCount {
        let mut count = PieceCount { x: 0, o: 0 };
        for cell in cells {
            match cell {
                Cell::X => count.x += 1,
                Cell::O => count.o += 1,
                Cell::Empty => {}
            }
        }
        count
    }

    fn parse_player(player_str: &str, context: &str) -> Result<Player, crate::Error> {
        match player_str {
            "X" | "x" => Ok(Player::X),
            "O" | "o" => Ok(Player::O),
            _ => Err(crate::Error::InvalidPlayerString {
                player: player_str.to_string(),
                label: context.to_string(),
            }),
        }
    }

    fn split_board_and_turn(cleaned: &str) -> Result<(&str, Option<Player>), crate::Error> {
        match cleaned.split_once('_') {
            Some((board, suffix)) => Ok((board, Some(Self::parse_player(suffix, cleaned)?))),
            None => Ok((cleaned, None)),
        }
    }

    fn determine_turn_from_counts(count: &PieceCount) -> Result<Player, crate::Error> {
        if count.x == count.o {
            Ok(Player::X)
        } else if count.x == count.o + 1 {
            Ok(Player::O)
        } else {
            Err(crate::Error::InvalidPieceCounts {
                x_count: count.x,
                o_count: count.o,
            })
        }
    }

    fn ensure_turn_consistent_with_counts(
        count: &PieceCount,
        player: Player,
        context: &str,
    ) -> Result<(), crate::Error> {
        let valid = match player {
            Player::X => count.x == count.o || count.o == count.x + 1,
            Player::O => count.x == count.o || count.x == count.o + 1,
        };

        if valid {
            Ok(())
        } else {
            Err(crate::Error::InvalidConfiguration {
                message: format!(
                    "piece counts (X={}, O={}) are inconsistent with {} to move in '{}'",
                    count.x,
                    count.o,
                    player.to_char(),
                    context
                ),
            })
        }
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, &cell) in self.cells.iter().enumerate() {
            write!(f, "{}", cell.to_char())?;
            if (i + 1).is_multiple_of(BOARD_SIDE) && i < CELL_COUNT - 1 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board() {
        let board = BoardState::new();
        assert_eq!(board.to_move, Player::X);
        assert!(board.cells.iter().all(|&c| c == Cell::Empty));
        assert!(!board.is_full());
        assert_eq!(board.winner(), None);
    }

    #[test]
    fn test_index_is_row_major() {
        assert_eq!(BoardState::index(0, 0).unwrap(), 0);
        assert_eq!(BoardState::index(2, 0).unwrap(), 2);
        assert_eq!(BoardState::index(0, 1).unwrap(), 3);
        assert_eq!(BoardState::index(1, 1).unwrap(), 4);
        assert_eq!(BoardState::index(2, 2).unwrap(), 8);
        assert_eq!(BoardState::coordinates(5), (2, 1));
    }

    #[test]
    fn test_get_and_set_out_of_range() {
        let mut board = BoardState::new();
        assert!(matches!(
            board.get(3, 0),
            Err(crate::Error::OutOfRange { x: 3, y: 0 })
        ));
        assert!(matches!(
            board.set(0, 7, Cell::X),
            Err(crate::Error::OutOfRange { x: 0, y: 7 })
        ));
        assert_eq!(board, BoardState::new());
    }

    #[test]
    fn test_set_does_not_change_turn() {
        let mut board = BoardState::new();
        board.set(1, 2, Cell::O).unwrap();
        assert_eq!(board.get(1, 2).unwrap(), Cell::O);
        assert_eq!(board.cell(7), Cell::O);
        assert_eq!(board.to_move, Player::X);
    }

    #[test]
    fn test_apply_move_alternates_turns() {
        let mut board = BoardState::new();
        board.apply_move(4).unwrap();
        assert_eq!(board.cell(4), Cell::X);
        assert_eq!(board.to_move, Player::O);

        let pos = board.apply_move_at(0, 0).unwrap();
        assert_eq!(pos, 0);
        assert_eq!(board.cell(0), Cell::O);
        assert_eq!(board.to_move, Player::X);
    }

    #[test]
    fn test_illegal_move_leaves_board_unchanged() {
        let mut board = BoardState::new();
        board.apply_move(4).unwrap();
        let before = board;

        let err = board.apply_move(4).unwrap_err();
        assert!(matches!(err, crate::Error::IllegalMove { position: 4 }));
        assert!(err.is_recoverable());
        assert_eq!(board, before);

        let err = board.apply_move(9).unwrap_err();
        assert!(matches!(err, crate::Error::InvalidPosition { position: 9 }));
        assert_eq!(board, before);
    }

    #[test]
    fn test_make_move_does_not_mutate() {
        let board = BoardState::new();
        let next = board.make_move(2).unwrap();
        assert_eq!(board, BoardState::new());
        assert_eq!(next.cell(2), Cell::X);
        assert_eq!(next.to_move, Player::O);
    }

    #[test]
    fn test_equality_includes_side_to_move() {
        let x_to_move = BoardState::new_with_player(Player::X);
        let o_to_move = BoardState::new_with_player(Player::O);
        assert_ne!(x_to_move, o_to_move);
        assert_eq!(x_to_move.cells, o_to_move.cells);
    }

    #[test]
    fn test_win_detection_all_lines() {
        for line in crate::tictactoe::WINNING_LINES {
            let mut board = BoardState::new();
            for &pos in &line {
                board.cells[pos] = Cell::O;
            }
            assert_eq!(board.winner(), Some(Player::O), "line {line:?}");
            assert!(board.has_won(Player::O));
            assert!(!board.has_won(Player::X));
        }
    }

    #[test]
    fn test_full_board_without_winner() {
        // XOX
        // XOO
        // OXX
        let board = BoardState::from_string("XOXXOOOXX").unwrap();
        assert!(board.is_full());
        assert_eq!(board.winner(), None);
        assert!(board.is_terminal());
    }

    #[test]
    fn test_simultaneous_lines_do_not_panic() {
        // Unreachable by alternating play, but still answerable.
        let board = BoardState {
            cells: [
                Cell::X,
                Cell::X,
                Cell::X,
                Cell::Empty,
                Cell::Empty,
                Cell::Empty,
                Cell::O,
                Cell::O,
                Cell::O,
            ],
            to_move: Player::X,
        };
        assert!(board.winner().is_some());
    }

    #[test]
    fn test_from_string() {
        let board = BoardState::from_string("XOX......").unwrap();
        assert_eq!(board.cells[0], Cell::X);
        assert_eq!(board.cells[1], Cell::O);
        assert_eq!(board.cells[2], Cell::X);
        assert_eq!(board.to_move, Player::O);

        assert!(BoardState::from_string("XO").is_err());
        assert!(matches!(
            BoardState::from_string("X........ZZZ"),
            Err(crate::Error::InvalidBoardLength {
                expected: 9,
                got: 12,
                ..
            })
        ));
        assert!(BoardState::from_string("X.........._O").is_err());
        assert!(BoardState::from_string("XOZ......").is_err());
        assert!(BoardState::from_string("XXX......").is_err());
    }

    #[test]
    fn test_from_string_with_turn_suffix() {
        let board = BoardState::from_string("........._O").unwrap();
        assert_eq!(board.to_move, Player::O);

        let err = BoardState::from_string("O........_O").unwrap_err();
        assert!(
            err.to_string().contains("inconsistent with O to move"),
            "expected inconsistency error, got {err}"
        );
    }

    #[test]
    fn test_encode_roundtrip() {
        let mut board = BoardState::new();
        board.apply_move(4).unwrap();
        board.apply_move(0).unwrap();
        assert_eq!(board.encode(), "O...X...._X");
        assert_eq!(BoardState::from_string(&board.encode()).unwrap(), board);
    }

    #[test]
    fn test_display() {
        let board = BoardState::from_string("X...O....").unwrap();
        assert_eq!(board.to_string(), "X..\n.O.\n...");
    }
}
