//! Client configuration.

use std::env;

use crate::errors::CatalogError;

/// Public OMDb endpoint.
pub const DEFAULT_OMDB_URL: &str = "https://www.omdbapi.com";

#[derive(Clone, Debug)]
pub struct OmdbConfig {
    /// Base URL without trailing slash, e.g. `https://www.omdbapi.com`.
    pub base_url: String,
    pub api_key: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl OmdbConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_OMDB_URL.to_string(),
            api_key: api_key.into(),
            timeout_secs: 30,
        }
    }

    /// Reads `OMDB_API_KEY` (required) and `OMDB_URL` (optional).
    ///
    /// # Errors
    /// `CatalogError::Config` when the key is missing or the URL is not http(s).
    pub fn from_env(timeout_secs: u64) -> Result<Self, CatalogError> {
        let api_key = env::var("OMDB_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| CatalogError::Config("missing OMDB_API_KEY".into()))?;

        let mut cfg = Self::new(api_key);
        if let Ok(url) = env::var("OMDB_URL") {
            if !url.trim().is_empty() {
                cfg.base_url = url;
            }
        }
        cfg.timeout_secs = timeout_secs;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), CatalogError> {
        let url = self.base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(CatalogError::Config(format!(
                "invalid OMDb url: {}",
                self.base_url
            )));
        }
        if self.api_key.trim().is_empty() {
            return Err(CatalogError::Config("empty OMDb api key".into()));
        }
        if self.timeout_secs == 0 {
            return Err(CatalogError::Config("timeout_secs must be > 0".into()));
        }
        Ok(())
    }
}
