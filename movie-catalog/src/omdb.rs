//! OMDb HTTP client.
//!
//! Endpoints used:
//!   * GET /?apikey={key}&s={query}&type=movie&page={n}   (10 hits per page)
//!   * GET /?apikey={key}&i={imdb_id}&plot=full

use std::collections::HashSet;
use std::time::{Duration, Instant};

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, error, info};

use crate::config::OmdbConfig;
use crate::errors::{CatalogError, CatalogResult};
use crate::types::{DetailsResponse, MovieDetails, SearchResponse, TitleMatch};

/// OMDb never serves more than 100 pages per search.
const MAX_PAGES: u32 = 100;
const SNIPPET_MAX_CHARS: usize = 240;

/// OMDb HTTP client wrapper.
#[derive(Debug, Clone)]
pub struct OmdbClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl OmdbClient {
    /// Builds a client with the configured request timeout.
    ///
    /// # Errors
    /// `CatalogError::Config` for an invalid config, `Network` if the HTTP client cannot be built.
    pub fn new(cfg: &OmdbConfig) -> CatalogResult<Self> {
        cfg.validate()?;
        let http = Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()?;

        let base_url = cfg.base_url.trim().trim_end_matches('/').to_string();
        debug!("Creating OmdbClient with base_url={}", base_url);

        Ok(Self {
            http,
            base_url,
            api_key: cfg.api_key.clone(),
        })
    }

    /// Returns at most `limit` movie titles matching `query`, in provider order.
    ///
    /// Pages are requested until `limit` is reached, `totalResults` is
    /// exhausted or a page comes back empty. Duplicate ids are dropped.
    ///
    /// # Errors
    /// `NotFound` when the provider has no match at all.
    pub async fn search_titles(&self, query: &str, limit: usize) -> CatalogResult<Vec<TitleMatch>> {
        let started = Instant::now();
        let mut out: Vec<TitleMatch> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        let mut page = 1u32;
        let mut fetched = 0u32;

        while out.len() < limit && page <= MAX_PAGES {
            let page_str = page.to_string();
            let params = [
                ("s", query),
                ("type", "movie"),
                ("page", page_str.as_str()),
            ];
            let raw: SearchResponse = self.get_json(&params).await?;
            fetched += 1;

            let decoded = match raw.into_page(query) {
                Ok(p) => p,
                // A later page running dry is the end of the listing, not a miss.
                Err(CatalogError::NotFound(_)) if !out.is_empty() => break,
                Err(e) => return Err(e),
            };
            if decoded.matches.is_empty() {
                break;
            }

            for m in decoded.matches {
                if out.len() == limit {
                    break;
                }
                if seen.insert(m.imdb_id.clone()) {
                    out.push(m);
                }
            }

            if (page as usize) * 10 >= decoded.total_results {
                break;
            }
            page += 1;
        }

        info!(
            query,
            limit,
            found = out.len(),
            pages = fetched,
            latency_ms = started.elapsed().as_millis() as u64,
            "OMDb title search completed"
        );
        Ok(out)
    }

    /// Fetches full details (full plot) for one IMDb id.
    ///
    /// # Errors
    /// `NotFound` when the id cannot be resolved.
    pub async fn fetch_details(&self, imdb_id: &str) -> CatalogResult<MovieDetails> {
        let params = [("i", imdb_id), ("plot", "full")];
        let raw: DetailsResponse = self.get_json(&params).await?;
        let details = raw.into_details(imdb_id)?;
        debug!(imdb_id, title = %details.title, "OMDb details fetched");
        Ok(details)
    }

    async fn get_json<R: DeserializeOwned>(&self, params: &[(&str, &str)]) -> CatalogResult<R> {
        let url = format!("{}/", self.base_url);
        debug!(?params, "GET {}", url);

        let resp = self
            .http
            .get(&url)
            .query(&[("apikey", self.api_key.as_str())])
            .query(params)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            let snippet = make_snippet(&text);
            error!(%status, %url, %snippet, "OMDb returned non-success status");
            return Err(match status {
                StatusCode::UNAUTHORIZED => CatalogError::Unauthorized(snippet),
                StatusCode::NOT_FOUND => CatalogError::NotFound(snippet),
                _ => CatalogError::HttpStatus {
                    status: status.as_u16(),
                    snippet,
                },
            });
        }

        let text = resp.text().await?;
        serde_json::from_str::<R>(&text).map_err(|e| {
            CatalogError::InvalidResponse(format!("{e}; body: {}", make_snippet(&text)))
        })
    }
}

fn make_snippet(text: &str) -> String {
    let mut s: String = text.chars().take(SNIPPET_MAX_CHARS).collect();
    if text.chars().count() > SNIPPET_MAX_CHARS {
        s.push('…');
    }
    s
}
