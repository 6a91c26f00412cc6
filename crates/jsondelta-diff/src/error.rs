//! Error types for the diff crate.

use jsondelta_types::JsonPointer;

/// Errors that can occur during diff operations.
#[derive(Debug, thiserror::Error)]
pub enum DiffError {
    /// Both operands of a comparison were arrays. Arrays are never diffed.
    #[error("unsupported operation: JSON arrays not supported (at '{path}')")]
    UnsupportedOperation { path: JsonPointer },

    /// A native value could not be converted into a value tree.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for DiffError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Convenience alias for diff results.
pub type DiffResult<T> = Result<T, DiffError>;
