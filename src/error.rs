//! Error types for the Mondrago crate

use thiserror::Error;

/// Main error type for the Mondrago crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("cell {cell} is out of bounds (must be 0-24)")]
    InvalidCell { cell: usize },

    #[error("expected {expected} distinct markers, got {got} in '{context}'")]
    InvalidMarkerCount {
        expected: usize,
        got: usize,
        context: String,
    },

    #[error("mover and opponent markers overlap in '{context}'")]
    OverlappingMarkers { context: String },

    #[error("invalid position format '{input}' (expected format: '{expected}')")]
    InvalidPositionFormat { input: String, expected: String },

    #[error("malformed database line {line} '{content}': {reason}")]
    MalformedLine {
        line: usize,
        content: String,
        reason: String,
    },

    #[error("position {position} is not a legal position")]
    IllegalPosition { position: String },

    #[error("position {position} is not present in the solution")]
    UnknownPosition { position: String },

    #[error("position {position} appears more than once")]
    DuplicatePosition { position: String },

    #[error("solver invariant violated at {position}: {reason}")]
    InvariantViolation { position: String, reason: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("failed to {operation}: {message}")]
    SerializationContext { operation: String, message: String },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}
