//! Error taxonomy of the store/search pipelines.
//!
//! Collaborator failures are normalised into [`ClientError`] by the adapters;
//! the pipelines wrap them into [`StoreError`] / [`SearchError`].

use thiserror::Error;

/// Caller input rejected before any external call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("limit must be a positive integer")]
    NonPositiveLimit,
    #[error("topK must be a positive integer")]
    NonPositiveTopK,
    #[error("query text is empty")]
    EmptyQuery,
}

/// Failure of one collaborator call (catalog, embedder, index).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// The catalog has nothing for this query or id.
    #[error("not found: {0}")]
    NotFound(String),

    /// Third-party failure: transport, non-2xx, malformed payload.
    #[error("{service}: {message}")]
    Upstream {
        service: &'static str,
        message: String,
    },
}

impl ClientError {
    pub fn upstream(service: &'static str, err: impl std::fmt::Display) -> Self {
        Self::Upstream {
            service,
            message: err.to_string(),
        }
    }
}

/// Errors of [`crate::MovieLibrary::store`].
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The title search itself failed (per-candidate failures are skipped instead).
    #[error("{0}")]
    Catalog(ClientError),
}

/// Errors of [`crate::MovieLibrary::search`].
#[derive(Debug, Error)]
pub enum SearchError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("embedding failed: {0}")]
    Embedding(ClientError),

    #[error("index query failed: {0}")]
    Index(ClientError),
}

/// Why a single candidate was skipped during `store`.
#[derive(Debug, Clone, Error)]
#[error("{imdb_id} skipped at {stage}: {source}")]
pub struct CandidateFailure {
    pub imdb_id: String,
    pub stage: &'static str,
    pub source: ClientError,
}
