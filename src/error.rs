//! Error types for the search engine
//!
//! Malformed input is rejected at construction time with an
//! [`InvalidPositionError`]. Inside the search nothing fails: illegal move
//! requests are answered with `false`, timeouts end an iteration, and
//! positions without legal moves resolve to mate or stalemate scores.

use thiserror::Error;

use crate::game_repr::Color;

/// A board handed to the engine that it refuses to search
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidPositionError {
    /// Grid cell holding something other than a piece letter or the empty marker
    #[error("Unknown piece symbol {symbol:?} at row {row}, column {col}")]
    UnknownSymbol { symbol: char, row: usize, col: usize },

    /// Each side must have exactly one king
    #[error("Expected exactly one {color:?} king, found {count}")]
    KingCount { color: Color, count: u32 },

    /// Pawns can never stand on the first or eighth rank
    #[error("Pawn on back rank square {square}")]
    PawnOnBackRank { square: usize },

    /// Grid row that does not hold exactly eight cells
    #[error("Grid row {row} has {len} cells, expected 8")]
    MalformedGrid { row: usize, len: usize },

    /// FEN string that could not be parsed
    #[error("Malformed FEN: {0}")]
    MalformedFen(String),
}

/// Errors surfaced by the public engine API
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error(transparent)]
    InvalidPosition(#[from] InvalidPositionError),

    /// A requested move is not in the legal set of the position
    #[error("Illegal move: from {from} to {to}")]
    IllegalMove { from: String, to: String },

    /// Time budgets must be finite and non-negative
    #[error("Invalid time limit: {0} seconds")]
    InvalidTimeLimit(f64),
}

/// Result type alias for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_problem() {
        let err = InvalidPositionError::UnknownSymbol { symbol: 'x', row: 2, col: 5 };
        assert_eq!(err.to_string(), "Unknown piece symbol 'x' at row 2, column 5");

        let err = InvalidPositionError::KingCount { color: Color::Black, count: 0 };
        assert_eq!(err.to_string(), "Expected exactly one Black king, found 0");

        let err = InvalidPositionError::MalformedGrid { row: 3, len: 7 };
        assert_eq!(err.to_string(), "Grid row 3 has 7 cells, expected 8");
    }

    #[test]
    fn test_position_error_converts() {
        let err: EngineError = InvalidPositionError::MalformedFen("empty".into()).into();
        assert!(matches!(err, EngineError::InvalidPosition(_)));
        assert_eq!(err.to_string(), "Malformed FEN: empty");
    }
}
