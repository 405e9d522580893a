//! Seeded random games against the solved table

use rand::{Rng, SeedableRng, rngs::StdRng};
use tictactoe_solver::{
    BoardState, ComputerPlayer, Game, GameOutcome, Outcome, Player, SolverConfig, best_move, solve,
};

fn random_empty_cell(board: &BoardState, rng: &mut StdRng) -> usize {
    let empty = board.empty_positions();
    empty[rng.random_range(0..empty.len())]
}

#[test]
fn test_computer_never_loses_to_random_play() {
    let mut rng = StdRng::seed_from_u64(42);
    let config = SolverConfig::new().with_progress_interval(0);

    for computer_side in [Player::X, Player::O] {
        let computer = ComputerPlayer::new(computer_side, &BoardState::new(), &config).unwrap();

        for _ in 0..200 {
            let mut game = Game::new();
            while !game.is_over() {
                let board = *game.board();
                let pos = if board.to_move == computer_side {
                    computer.choose(&board).unwrap()
                } else {
                    random_empty_cell(&board, &mut rng)
                };
                game.play(pos).unwrap();
            }

            assert_ne!(
                game.outcome(),
                Some(GameOutcome::Win(computer_side.opponent())),
                "computer lost as {computer_side}: {}",
                game.board().encode()
            );
        }
    }
}

#[test]
fn test_labels_hold_along_random_games() {
    let mut rng = StdRng::seed_from_u64(7);
    let table = solve(&BoardState::new()).unwrap();

    for _ in 0..300 {
        let mut board = BoardState::new();
        while !board.is_terminal() {
            let outcome = table.outcome_of(&board).unwrap();
            assert!(outcome.is_known());

            let pos = best_move(&table, &board).unwrap().unwrap();
            assert!(board.is_empty(pos));

            // Mix table moves with random ones to reach every kind of position.
            let pos = if rng.random_bool(0.5) {
                pos
            } else {
                random_empty_cell(&board, &mut rng)
            };
            board.apply_move(pos).unwrap();
        }

        let expected = match board.winner() {
            Some(winner) => Outcome::Win(winner),
            None => Outcome::Draw,
        };
        assert_eq!(table.outcome_of(&board), Some(expected));
    }
}

#[test]
fn test_optimal_play_from_both_sides_draws() {
    let table = solve(&BoardState::new()).unwrap();
    let mut game = Game::new();

    while !game.is_over() {
        let pos = best_move(&table, game.board()).unwrap().unwrap();
        game.play(pos).unwrap();
    }
    assert_eq!(game.outcome(), Some(GameOutcome::Draw));
}
