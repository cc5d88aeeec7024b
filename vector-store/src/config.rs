//! Runtime and collection configuration.

use std::env;

use crate::errors::VectorStoreError;

/// Distance function used for the vector space.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DistanceKind {
    /// Cosine distance (recommended for most embeddings).
    Cosine,
    /// Dot product (useful for normalized vectors).
    Dot,
    /// Euclidean distance (L2).
    Euclid,
}

impl std::str::FromStr for DistanceKind {
    type Err = VectorStoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cosine" => Ok(Self::Cosine),
            "dot" => Ok(Self::Dot),
            "euclid" | "euclidean" => Ok(Self::Euclid),
            other => Err(VectorStoreError::Config(format!(
                "unsupported distance '{other}'"
            ))),
        }
    }
}

/// Configuration for the Qdrant-backed index.
#[derive(Clone, Debug)]
pub struct VectorStoreConfig {
    /// Qdrant gRPC endpoint, e.g. `http://localhost:6334`.
    pub qdrant_url: String,
    /// Optional API key for Qdrant Cloud.
    pub qdrant_api_key: Option<String>,
    /// Target collection name.
    pub collection: String,
    /// Distance function (Cosine by default).
    pub distance: DistanceKind,
    /// Vector dimensionality; must match the embedding model.
    pub dim: usize,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Exact search flag (false = HNSW ANN).
    pub exact_search: bool,
}

impl VectorStoreConfig {
    /// Creates a sane default config for a given Qdrant endpoint, collection and dimension.
    pub fn new_default(url: impl Into<String>, collection: impl Into<String>, dim: usize) -> Self {
        Self {
            qdrant_url: url.into(),
            qdrant_api_key: None,
            collection: collection.into(),
            distance: DistanceKind::Cosine,
            dim,
            timeout_secs: 30,
            exact_search: false,
        }
    }

    /// Reads `QDRANT_URL`, `QDRANT_API_KEY`, `QDRANT_COLLECTION`, `QDRANT_DISTANCE`
    /// and `QDRANT_EXACT_SEARCH`. The dimension and timeout come from the caller.
    ///
    /// # Errors
    /// Returns `VectorStoreError::Config` for unparsable values or a failed validation.
    pub fn from_env(dim: usize, timeout_secs: u64) -> Result<Self, VectorStoreError> {
        let url = env_or("QDRANT_URL", "http://localhost:6334");
        let collection = env_or("QDRANT_COLLECTION", "movies");

        let mut cfg = Self::new_default(url, collection, dim);
        cfg.timeout_secs = timeout_secs;
        cfg.qdrant_api_key = env::var("QDRANT_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty());
        if let Ok(d) = env::var("QDRANT_DISTANCE") {
            cfg.distance = d.parse()?;
        }
        if let Ok(v) = env::var("QDRANT_EXACT_SEARCH") {
            cfg.exact_search = matches!(v.trim(), "1" | "true" | "yes");
        }

        cfg.validate()?;
        Ok(cfg)
    }

    /// Validates config values.
    pub fn validate(&self) -> Result<(), VectorStoreError> {
        if self.qdrant_url.trim().is_empty() {
            return Err(VectorStoreError::Config("qdrant_url is empty".into()));
        }
        if self.collection.trim().is_empty() {
            return Err(VectorStoreError::Config("collection is empty".into()));
        }
        if self.dim == 0 {
            return Err(VectorStoreError::Config("dim must be > 0".into()));
        }
        if self.timeout_secs == 0 {
            return Err(VectorStoreError::Config("timeout_secs must be > 0".into()));
        }
        Ok(())
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}
