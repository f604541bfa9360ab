//! Error types for code generation.

use thiserror::Error;

/// Errors that abort a generation pass.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// A query slot was empty. The parser must never produce one, so the
    /// whole pass is abandoned instead of emitting a partial model.
    #[error("query is missing at index {index} of {len}")]
    MissingQuery {
        /// Position of the empty slot.
        index: usize,
        /// Number of query slots.
        len: usize,
    },

    /// Settings could not be decoded.
    #[error("invalid settings: {0}")]
    Settings(#[from] serde_json::Error),
}

/// Result type alias for code generation.
pub type Result<T> = std::result::Result<T, GenerateError>;
