use thiserror::Error;

use crate::board::MoveValidation;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("invalid move string at position {position}: {reason}")]
    ParseMove { position: usize, reason: String },
    #[error("move {index} in column {column} is illegal: {reason}")]
    IllegalMove {
        index: usize,
        column: usize,
        reason: MoveValidation,
    },
    #[error("depth {depth} is out of range (1-{max})")]
    DepthOutOfRange { depth: usize, max: usize },
    #[error("the round is already over")]
    RoundOver,
}
