use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid JSON pointer: {0:?} must be empty or start with '/'")]
    InvalidPointer(String),

    #[error("invalid escape in JSON pointer {pointer:?} at byte {position}")]
    InvalidEscape { pointer: String, position: usize },
}
