//! Alpha-beta results must match an unpruned full-tree negamax.
use connect4::search::{win_score, Perspective};
use connect4::{Board, SearchEngine, SearchStats, Winner, COLUMN_ORDER, MAX_MOVES, WIDTH};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

const PLAYED: usize = 32;

/// Plain negamax with the same scoring and no window.
fn brute_force(board: &Board) -> i32 {
    if board.is_terminal() && board.winner() == Winner::Tie {
        return 0;
    }
    let piece = board.next_to_move();
    let wins_now = (0..WIDTH).any(|column| {
        board.validate_move(column).is_valid() && board.is_winning_move(piece, column)
    });
    if wins_now {
        return win_score(board.move_count());
    }
    COLUMN_ORDER
        .iter()
        .filter(|&&column| board.validate_move(column).is_valid())
        .map(|&column| {
            let mut child = board.clone();
            child.apply_move(piece, column);
            -brute_force(&child)
        })
        .max()
        .expect("a non-terminal board has a valid column")
}

/// First strictly best column in center-first order, scored without pruning.
fn brute_force_choice(board: &Board) -> (usize, i32) {
    let mut best: Option<(usize, i32)> = None;
    for column in COLUMN_ORDER {
        if !board.validate_move(column).is_valid() {
            continue;
        }
        let mut child = board.clone();
        let won = child.apply_move(board.next_to_move(), column).won;
        let score = if won {
            win_score(board.move_count())
        } else {
            -brute_force(&child)
        };
        if best.map_or(true, |(_, best_score)| score > best_score) {
            best = Some((column, score));
        }
    }
    best.unwrap()
}

/// Random non-winning moves until `PLAYED` moves are on the board and the
/// side to move has no immediate win.
fn seeded_position(seed: u64) -> Board {
    let mut rng = StdRng::seed_from_u64(seed);
    loop {
        let mut board = Board::new();
        while board.move_count() < PLAYED {
            let quiet: Vec<usize> = board
                .valid_columns()
                .into_iter()
                .filter(|&column| !board.is_winning_move(board.next_to_move(), column))
                .collect();
            match quiet.choose(&mut rng) {
                Some(&column) => {
                    board.play(column).unwrap();
                }
                None => break,
            }
        }
        let piece = board.next_to_move();
        let quiet_position = board.move_count() == PLAYED
            && !board
                .valid_columns()
                .into_iter()
                .any(|column| board.is_winning_move(piece, column));
        if quiet_position {
            return board;
        }
    }
}

#[test]
fn pruned_score_matches_full_tree() {
    let engine = SearchEngine::with_max_depth(MAX_MOVES);
    for seed in 0..8 {
        let board = seeded_position(seed);
        let bound = win_score(board.move_count());
        let mut stats = SearchStats::default();
        let pruned = engine.negamax(&board, -bound, bound, 0, Perspective::Searcher, &mut stats);
        assert_eq!(pruned, brute_force(&board), "seed {seed}: {:?}", board.history());
    }
}

#[test]
fn pruned_choice_matches_full_tree() {
    let engine = SearchEngine::with_max_depth(MAX_MOVES);
    for seed in 100..108 {
        let board = seeded_position(seed);
        let report = engine.search(&board);
        assert_eq!(
            (report.column, report.score),
            brute_force_choice(&board),
            "seed {seed}: {:?}",
            board.history()
        );
    }
}
