//! Error types for the layout parsers.

use thiserror::Error;

/// Result type for parse operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Errors raised by the parsers.
///
/// In permissive mode only [`ParseError::NoOptions`] can occur.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Unexpected layout at line {line}: {message}")]
    UnexpectedLayout { line: usize, message: String },

    #[error("Part header not found: {0}")]
    MissingHeader(String),

    #[error("Failed to parse any options from the quizzes part")]
    NoOptions,
}
