//! Negamax search with alpha-beta pruning and fail-soft bounds.
//!
//! Scores are exact game-theoretic values measured in remaining moves: a win
//! for the side to move scores `(MAX_MOVES + 1 - move_count) / 2`, so sooner
//! wins score higher, losses are the negation and a tie is `0`. There is no
//! static evaluation. Once the depth horizon is reached the search reports
//! the lower bound it has proven so far instead of an estimate.
use tracing::debug;

use crate::board::{Board, Winner, MAX_MOVES, WIDTH};
use crate::error::GameError;

/// Plies below the root after which the search stops refining.
pub const DEFAULT_MAX_DEPTH: usize = 15;

/// Candidates are always tried center first. Among equal scores the earlier
/// column wins.
pub const COLUMN_ORDER: [usize; WIDTH] = [3, 2, 4, 1, 5, 0, 6];

/// Score of winning with the next move at `move_count`.
pub fn win_score(move_count: usize) -> i32 {
    (MAX_MOVES as i32 + 1 - move_count as i32) / 2
}

/// Best score reachable at `move_count` when no immediate win exists.
pub fn max_reachable(move_count: usize) -> i32 {
    (MAX_MOVES as i32 - 1 - move_count as i32) / 2
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    pub max_depth: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl SearchConfig {
    pub fn validate(&self) -> Result<(), GameError> {
        if !(1..=MAX_MOVES).contains(&self.max_depth) {
            return Err(GameError::DepthOutOfRange {
                depth: self.max_depth,
                max: MAX_MOVES,
            });
        }
        Ok(())
    }
}

/// Which side of the root a node belongs to. Flips on every ply.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Perspective {
    Searcher,
    Opponent,
}

impl Perspective {
    pub fn flip(self) -> Perspective {
        match self {
            Perspective::Searcher => Perspective::Opponent,
            Perspective::Opponent => Perspective::Searcher,
        }
    }
}

/// Counters accumulated over one search. Passed down explicitly so that
/// [`SearchEngine::negamax`] keeps no hidden state between calls.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes: u64,
    /// Immediate wins found for the side the search was started for.
    pub wins_spotted: u64,
    /// Immediate wins found for its opponent.
    pub threats_spotted: u64,
    pub beta_cutoffs: u64,
    pub horizon_cutoffs: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchReport {
    pub column: usize,
    pub score: i32,
    pub stats: SearchStats,
}

#[derive(Clone, Debug, Default)]
pub struct SearchEngine {
    config: SearchConfig,
}

impl SearchEngine {
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    pub fn with_max_depth(max_depth: usize) -> Self {
        Self::new(SearchConfig { max_depth })
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Column judged best for the side to move. `board` must not be terminal.
    pub fn choose_move(&self, board: &Board) -> usize {
        self.search(board).column
    }

    /// Scores every valid column for the side to move and keeps the first
    /// strictly best one in [`COLUMN_ORDER`].
    pub fn search(&self, board: &Board) -> SearchReport {
        let mut stats = SearchStats::default();
        let piece = board.next_to_move();
        let move_count = board.move_count();

        let mut alpha = -win_score(move_count);
        let beta = win_score(move_count);
        let mut best: Option<(usize, i32)> = None;

        for column in COLUMN_ORDER {
            if !board.validate_move(column).is_valid() {
                continue;
            }
            let mut child = board.clone();
            child.apply_move(piece, column);
            let score = -self.negamax(
                &child,
                -beta,
                -alpha,
                1,
                Perspective::Opponent,
                &mut stats,
            );
            debug!(column, score, "scored candidate");

            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((column, score));
            }
            if score > alpha {
                alpha = score;
            }
        }

        let (column, score) = best.unwrap_or((COLUMN_ORDER[0], alpha));
        debug!(
            column,
            score,
            nodes = stats.nodes,
            depth = self.config.max_depth,
            "search finished"
        );
        SearchReport {
            column,
            score,
            stats,
        }
    }

    /// Fail-soft negamax. Positive scores favour the side to move on `board`.
    pub fn negamax(
        &self,
        board: &Board,
        mut alpha: i32,
        mut beta: i32,
        depth: usize,
        perspective: Perspective,
        stats: &mut SearchStats,
    ) -> i32 {
        stats.nodes += 1;

        if board.is_terminal() && board.winner() == Winner::Tie {
            return 0;
        }

        let piece = board.next_to_move();
        let move_count = board.move_count();

        let wins_now = (0..WIDTH).any(|column| {
            board.validate_move(column).is_valid() && board.is_winning_move(piece, column)
        });
        if wins_now {
            match perspective {
                Perspective::Searcher => stats.wins_spotted += 1,
                Perspective::Opponent => stats.threats_spotted += 1,
            }
            return win_score(move_count);
        }

        let bound = max_reachable(move_count);
        if bound < beta {
            beta = bound;
            if alpha >= beta {
                return beta;
            }
        }

        if depth >= self.config.max_depth {
            stats.horizon_cutoffs += 1;
            return alpha;
        }

        for column in COLUMN_ORDER {
            if !board.validate_move(column).is_valid() {
                continue;
            }
            let mut child = board.clone();
            child.apply_move(piece, column);
            let score = -self.negamax(
                &child,
                -beta,
                -alpha,
                depth + 1,
                perspective.flip(),
                stats,
            );

            if score >= beta {
                stats.beta_cutoffs += 1;
                return score;
            }
            if score > alpha {
                alpha = score;
            }
        }

        alpha
    }
}
