//! Successor generation into the transposition table

use crate::{
    error::{Error, Result},
    solver::{EntryId, Outcome, TranspositionTable},
    tictactoe::{BoardState, Cell},
};

/// Boards reachable by one move of the side to play, in row-major order,
/// paired with the cell that was played.
///
/// Each successor is built from a fresh copy of `board`.
pub fn successors(board: &BoardState) -> impl Iterator<Item = (usize, BoardState)> + '_ {
    board
        .cells
        .iter()
        .enumerate()
        .filter(|&(_, &cell)| cell == Cell::Empty)
        .map(move |(pos, _)| {
            let mut next = *board;
            next.cells[pos] = board.to_move.to_cell();
            next.to_move = board.to_move.opponent();
            (pos, next)
        })
}

/// Register every successor of `board` in `table` and return their handles.
///
/// Successors already present (transpositions) keep their entry and label.
/// Handles come back in reverse scan order, cell 8 first. A full board has
/// no successors.
///
/// # Errors
///
/// Returns [`Error::AllocationFailure`] if the table or the result list
/// cannot grow.
pub fn generate_children(
    table: &mut TranspositionTable,
    board: &BoardState,
) -> Result<Vec<EntryId>> {
    if board.is_full() {
        return Ok(Vec::new());
    }

    let mut children = Vec::new();
    children
        .try_reserve(board.cells.len() - board.occupied_count())
        .map_err(Error::allocation("successor list"))?;

    for (_, next) in successors(board) {
        children.push(table.lookup_or_insert(&next, Outcome::Unknown)?);
    }
    children.reverse();

    Ok(children)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tictactoe::Player;

    #[test]
    fn test_full_board_has_no_children() {
        let mut table = TranspositionTable::new();
        let board = BoardState::from_string("XOXXOOOXX").unwrap();

        assert!(generate_children(&mut table, &board).unwrap().is_empty());
        assert!(table.is_empty());
    }

    #[test]
    fn test_children_of_empty_board() {
        let mut table = TranspositionTable::new();
        let board = BoardState::new();

        let children = generate_children(&mut table, &board).unwrap();
        assert_eq!(children.len(), 9);
        assert_eq!(table.len(), 9);

        // Reverse scan order: cell 8 first, cell 0 last.
        assert_eq!(table.board(children[0]).cell(8), Cell::X);
        assert_eq!(table.board(children[8]).cell(0), Cell::X);
        for &child in &children {
            let next = table.board(child);
            assert_eq!(next.to_move, Player::O);
            assert_eq!(next.occupied_count(), 1);
            assert_eq!(table.outcome(child), Outcome::Unknown);
        }
        assert_eq!(board, BoardState::new());
    }

    #[test]
    fn test_regeneration_reuses_entries() {
        let mut table = TranspositionTable::new();
        let board = BoardState::from_string("X...O....").unwrap();

        let first = generate_children(&mut table, &board).unwrap();
        let second = generate_children(&mut table, &board).unwrap();
        assert_eq!(first, second);
        assert_eq!(table.len(), 7);
    }

    #[test]
    fn test_transpositions_share_an_entry() {
        let mut table = TranspositionTable::new();
        // Two parents that both lead to X on 0 and 8 around O on 4.
        let a = BoardState::from_string("X...O...._X").unwrap();
        let c = BoardState::from_string("....O...X_X").unwrap();

        let from_a = generate_children(&mut table, &a).unwrap();
        let before = table.len();
        let from_c = generate_children(&mut table, &c).unwrap();

        let shared = BoardState::from_string("X...O...X_O").unwrap();
        let id = table.find(&shared).unwrap();
        assert!(from_a.contains(&id));
        assert!(from_c.contains(&id));
        assert_eq!(table.len(), before + from_c.len() - 1);
    }

    #[test]
    fn test_successors_row_major() {
        let board = BoardState::from_string("XO.......").unwrap();
        let cells: Vec<usize> = successors(&board).map(|(pos, _)| pos).collect();
        assert_eq!(cells, vec![2, 3, 4, 5, 6, 7, 8]);
        let (_, first) = successors(&board).next().unwrap();
        assert_eq!(first.cell(2), Cell::X);
        assert_eq!(first.to_move, Player::O);
    }
}
