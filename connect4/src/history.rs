//! Move histories as strings of zero-based column digits, e.g. `"3324"`.
//! Pieces are implied by parity: the first digit is always an `X` move.
use crate::board::WIDTH;
use crate::error::GameError;

pub fn parse_history(history: &str) -> Result<Vec<usize>, GameError> {
    let mut columns = Vec::with_capacity(history.len());
    for (position, ch) in history.chars().enumerate() {
        if ch.is_whitespace() {
            continue;
        }
        let column = ch.to_digit(10).ok_or_else(|| GameError::ParseMove {
            position,
            reason: format!("expected column digit, found {ch}"),
        })? as usize;
        if column >= WIDTH {
            return Err(GameError::ParseMove {
                position,
                reason: format!("column must be 0-{}", WIDTH - 1),
            });
        }
        columns.push(column);
    }
    Ok(columns)
}

pub fn format_history(columns: &[usize]) -> String {
    columns.iter().map(|column| column.to_string()).collect()
}
