//! Connect 4 engine built on exact negamax search with alpha-beta pruning.
//! Positions are replayed from a move history string of zero-based column
//! digits (e.g. `3324`); the side to move follows from the number of moves
//! played. The engine plays for that side up to a configurable horizon.
pub mod board;
pub mod error;
pub mod history;
pub mod search;

use serde::{Deserialize, Serialize};

pub use board::{Board, MoveOutcome, MoveValidation, Piece, Winner, HEIGHT, MAX_MOVES, WIDTH};
pub use error::GameError;
pub use history::{format_history, parse_history};
pub use search::{
    SearchConfig, SearchEngine, SearchReport, SearchStats, COLUMN_ORDER, DEFAULT_MAX_DEPTH,
};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRequest {
    pub position: String,
    pub level: u8,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveResponse {
    pub column: usize,
    pub score: i32,
    pub nodes: u64,
}

/// Highest `level` a request may ask for. Deeper horizons are only
/// available through [`SearchConfig`] directly.
pub const MAX_REQUEST_LEVEL: usize = DEFAULT_MAX_DEPTH;

/// Search configuration for a requested level in `1..=MAX_REQUEST_LEVEL`.
pub fn request_config(level: u8) -> Result<SearchConfig, GameError> {
    let depth = level as usize;
    if !(1..=MAX_REQUEST_LEVEL).contains(&depth) {
        return Err(GameError::DepthOutOfRange {
            depth,
            max: MAX_REQUEST_LEVEL,
        });
    }
    Ok(SearchConfig { max_depth: depth })
}

/// Replays `request.position` and searches it to depth `request.level`.
pub fn best_move(request: MoveRequest) -> Result<MoveResponse, GameError> {
    let config = request_config(request.level)?;
    search_position(&request.position, config)
}

/// Replays a history string and searches the resulting position.
pub fn search_position(position: &str, config: SearchConfig) -> Result<MoveResponse, GameError> {
    config.validate()?;

    let columns = parse_history(position)?;
    let board = Board::from_history(&columns)?;
    if board.is_terminal() {
        return Err(GameError::RoundOver);
    }

    let report = SearchEngine::new(config).search(&board);
    Ok(MoveResponse {
        column: report.column,
        score: report.score,
        nodes: report.stats.nodes,
    })
}
