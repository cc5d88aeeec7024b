//! Error hierarchy for the catalog client.

use thiserror::Error;

/// Convenient alias for catalog results.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Root error type for OMDb calls.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The provider has no match for the query or id.
    #[error("not found: {0}")]
    NotFound(String),

    /// Rejected API key (HTTP 401).
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Provider answered `Response: "False"` with an error other than "not found".
    #[error("provider error: {0}")]
    Provider(String),

    /// Non-2xx status not covered by specific variants.
    #[error("http status {status}: {snippet}")]
    HttpStatus { status: u16, snippet: String },

    /// Timeout at transport level.
    #[error("timeout")]
    Timeout,

    /// Network/transport failure without HTTP status (DNS/connect/reset).
    #[error("network error: {0}")]
    Network(String),

    /// Unexpected/invalid shape of provider response.
    #[error("invalid provider response: {0}")]
    InvalidResponse(String),

    /// Missing API key, bad base URL.
    #[error("config error: {0}")]
    Config(String),
}

impl CatalogError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl From<reqwest::Error> for CatalogError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            return Self::Timeout;
        }
        if e.is_decode() {
            return Self::InvalidResponse(e.to_string());
        }
        if let Some(status) = e.status() {
            return Self::HttpStatus {
                status: status.as_u16(),
                snippet: String::new(),
            };
        }
        Self::Network(e.to_string())
    }
}
