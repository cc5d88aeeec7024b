//! Unified error types for the crate.

use thiserror::Error;

/// Top-level error for vector-store operations.
#[derive(Debug, Error)]
pub enum VectorStoreError {
    /// Invalid or unsupported configuration.
    #[error("config error: {0}")]
    Config(String),

    /// A vector does not match the dimensionality of the collection.
    #[error("vector size mismatch: got {got}, want {want}")]
    VectorSizeMismatch { got: usize, want: usize },

    /// `top_k` must be strictly positive.
    #[error("top_k must be > 0")]
    InvalidTopK,

    /// Stored payload could not be read back (missing id, wrong shape).
    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    /// Qdrant client errors (wrapped).
    #[error("qdrant error: {0}")]
    Qdrant(String),
}
