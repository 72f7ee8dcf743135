//! Structural invariants over seeded random games.
use connect4::{Board, Piece, Winner, HEIGHT, MAX_MOVES, WIDTH};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

fn has_four(board: &Board, piece: Piece) -> bool {
    let directions: [(isize, isize); 4] = [(1, 0), (0, 1), (1, 1), (1, -1)];
    for column in 0..WIDTH as isize {
        for row in 0..HEIGHT as isize {
            for (dc, dr) in directions {
                let line = (0..4).all(|step| {
                    let c = column + dc * step;
                    let r = row + dr * step;
                    (0..WIDTH as isize).contains(&c)
                        && (0..HEIGHT as isize).contains(&r)
                        && board.cell(c as usize, r as usize) == Some(piece)
                });
                if line {
                    return true;
                }
            }
        }
    }
    false
}

fn check(board: &Board) {
    let filled: usize = (0..WIDTH).map(|column| board.column_fill(column)).sum();
    assert_eq!(filled, board.move_count());
    assert_eq!(board.history().len(), board.move_count());
    assert!(board.move_count() <= MAX_MOVES);
    for column in 0..WIDTH {
        assert!(board.column_fill(column) <= HEIGHT);
        for row in 0..HEIGHT {
            assert_eq!(
                board.cell(column, row).is_some(),
                row < board.column_fill(column)
            );
        }
    }
    if board.is_terminal() {
        match board.winner() {
            Winner::Piece(piece) => assert!(has_four(board, piece)),
            Winner::Tie => assert_eq!(board.move_count(), MAX_MOVES),
        }
    } else {
        assert!(!has_four(board, Piece::X));
        assert!(!has_four(board, Piece::O));
    }
}

#[test]
fn random_games_keep_invariants() {
    for seed in 0..200 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut board = Board::new();
        check(&board);
        while !board.is_terminal() {
            let column = *board.valid_columns().choose(&mut rng).unwrap();
            let piece = board.next_to_move();
            let predicted = board.is_winning_move(piece, column);
            let outcome = board.play(column).unwrap();
            assert_eq!(outcome.won, predicted);
            check(&board);
        }
    }
}

#[test]
fn replaying_history_reproduces_board() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut board = Board::new();
    while !board.is_terminal() {
        let column = *board.valid_columns().choose(&mut rng).unwrap();
        board.play(column).unwrap();
    }
    let replayed = Board::from_history(board.history()).unwrap();
    assert_eq!(replayed, board);
}
