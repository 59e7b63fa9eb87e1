//! Errors raised by the grid core

use thiserror::Error;

use crate::grid::Point;

/// Recoverable failures at the library boundary.
///
/// An unreachable goal is not an error; see [crate::SearchOutcome].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    /// Start or goal is outside the grid or sits on a wall
    #[error("invalid endpoint {point}: {reason}")]
    InvalidEndpoint { point: Point, reason: &'static str },

    /// Grid dimensions, probabilities or weight ranges out of range
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// Text layout rows of differing width
    #[error("layout line {line} has {found} cells, expected {expected}")]
    RaggedLayout {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// Unexpected symbol in a text layout
    #[error("unexpected character `{found}` at line {line}, column {column}")]
    Layout {
        line: usize,
        column: usize,
        found: char,
    },
}
