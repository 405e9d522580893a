//! Solve-then-select scenarios on hand-picked boards

use tictactoe_solver::{
    BoardState, Cell, Error, Outcome, Player, best_move, solve, solver::FALLBACK_ORDER,
};

#[test]
fn test_empty_board_move_preserves_the_draw() {
    let board = BoardState::new();
    let table = solve(&board).unwrap();
    assert_eq!(table.outcome_of(&board), Some(Outcome::Draw));

    let pos = best_move(&table, &board).unwrap().unwrap();
    let next = board.make_move(pos).unwrap();
    assert_eq!(table.outcome_of(&next), Some(Outcome::Draw));

    let centre = board.make_move(4).unwrap();
    assert_eq!(table.outcome_of(&centre), Some(Outcome::Draw));
}

#[test]
fn test_two_in_a_row_is_completed() {
    // O O .
    // X X .
    // . . .
    let board = BoardState::from_string("OO.XX...._O").unwrap();
    let table = solve(&board).unwrap();

    assert_eq!(table.outcome_of(&board), Some(Outcome::Win(Player::O)));
    assert_eq!(best_move(&table, &board).unwrap(), Some(2));
}

#[test]
fn test_forced_loss_falls_back_to_static_order() {
    // O O .
    // . X .
    // O . X   -> O threatens 2 and 3; X has no winning reply
    let board = BoardState::from_string("OO..X.O.X_X").unwrap();
    let table = solve(&board).unwrap();

    assert_eq!(table.outcome_of(&board), Some(Outcome::Win(Player::O)));
    // 4 and 0 are taken, so the top-right corner comes first.
    let expected = FALLBACK_ORDER.into_iter().find(|&pos| board.is_empty(pos));
    assert_eq!(expected, Some(2));
    assert_eq!(best_move(&table, &board).unwrap(), expected);
}

#[test]
fn test_full_board_without_winner() {
    // X O X
    // X O O
    // O X X
    let board = BoardState::from_string("XOXXOOOXX").unwrap();
    assert_eq!(board.winner(), None);
    assert!(board.is_full());

    let table = solve(&board).unwrap();
    assert_eq!(table.outcome_of(&board), Some(Outcome::Draw));
}

#[test]
fn test_occupied_cell_is_rejected_without_change() {
    let mut board = BoardState::new();
    board.apply_move(4).unwrap();
    let before = board;

    let err = board.apply_move(4).unwrap_err();
    assert!(matches!(err, Error::IllegalMove { position: 4 }));
    assert!(err.is_recoverable());
    assert_eq!(board, before);
    assert_eq!(board.cell(4), Cell::X);
    assert_eq!(board.to_move, Player::O);
}

#[test]
fn test_out_of_range_coordinates() {
    let mut board = BoardState::new();
    assert!(matches!(
        board.get(3, 0),
        Err(Error::OutOfRange { x: 3, y: 0 })
    ));
    assert!(matches!(
        board.apply_move_at(0, 7),
        Err(Error::OutOfRange { .. })
    ));
    assert_eq!(board, BoardState::new());
}

#[test]
fn test_transposed_positions_share_an_entry() {
    let table = solve(&BoardState::new()).unwrap();

    let mut a = BoardState::new();
    for pos in [0, 4, 8] {
        a.apply_move(pos).unwrap();
    }
    let mut b = BoardState::new();
    for pos in [8, 4, 0] {
        b.apply_move(pos).unwrap();
    }

    assert_eq!(a, b);
    assert_eq!(table.find(&a), table.find(&b));
    assert!(table.find(&a).is_some());
}
