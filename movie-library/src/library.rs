use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, instrument, warn};
use vector_store::IndexPoint;

use crate::errors::{CandidateFailure, ClientError, SearchError, StoreError, ValidationError};
use crate::model::{MovieMatch, MovieRecord, StoreOutcome, describe_movie};
use crate::ports::{Candidate, MovieCatalog, TextEmbedder, VectorIndex};

/// Store/search orchestrator over a catalog, an embedder and a vector index.
///
/// Holds no state of its own besides the shared collaborators; clone the
/// surrounding `Arc` to share it between requests.
pub struct MovieLibrary {
    catalog: Arc<dyn MovieCatalog>,
    embedder: Arc<dyn TextEmbedder>,
    index: Arc<dyn VectorIndex>,
}

impl MovieLibrary {
    pub fn new(
        catalog: Arc<dyn MovieCatalog>,
        embedder: Arc<dyn TextEmbedder>,
        index: Arc<dyn VectorIndex>,
    ) -> Self {
        Self {
            catalog,
            embedder,
            index,
        }
    }

    /// Looks up to `limit` titles matching `query`, embeds each description
    /// and upserts it into the index.
    ///
    /// Candidates are processed one after another. A candidate that fails
    /// at any stage is logged and skipped; writes already made stay in
    /// place. `limit` caps the catalog hits, so fewer than `limit` movies
    /// may end up stored.
    ///
    /// # Errors
    /// `Validation` for a zero limit or blank query, `Catalog` if the title
    /// search fails for a reason other than "no match".
    #[instrument(skip(self))]
    pub async fn store(&self, query: &str, limit: usize) -> Result<StoreOutcome, StoreError> {
        if limit == 0 {
            return Err(ValidationError::NonPositiveLimit.into());
        }
        if query.trim().is_empty() {
            return Err(ValidationError::EmptyQuery.into());
        }
        let started = Instant::now();

        let candidates = match self.catalog.search_titles(query, limit).await {
            Ok(c) => c,
            Err(ClientError::NotFound(msg)) => {
                info!(%msg, "catalog has no match; nothing to store");
                return Ok(StoreOutcome::default());
            }
            Err(e) => return Err(StoreError::Catalog(e)),
        };
        let candidates: Vec<Candidate> = candidates.into_iter().take(limit).collect();
        debug!(candidates = candidates.len(), "catalog candidates");

        let mut results = Vec::with_capacity(candidates.len());
        for c in &candidates {
            results.push(self.store_candidate(c).await);
        }

        let (ok, failed): (Vec<_>, Vec<_>) = results.into_iter().partition(Result::is_ok);
        for f in failed.into_iter().filter_map(Result::err) {
            warn!(imdb_id = %f.imdb_id, stage = f.stage, error = %f.source, "candidate skipped");
        }
        let stored: Vec<MovieRecord> = ok.into_iter().filter_map(Result::ok).collect();

        info!(
            candidates = candidates.len(),
            stored = stored.len(),
            latency_ms = started.elapsed().as_millis() as u64,
            "store completed"
        );
        Ok(StoreOutcome::new(stored))
    }

    async fn store_candidate(&self, c: &Candidate) -> Result<MovieRecord, CandidateFailure> {
        let fail = |stage: &'static str| {
            move |source: ClientError| CandidateFailure {
                imdb_id: c.imdb_id.clone(),
                stage,
                source,
            }
        };

        let movie = self
            .catalog
            .fetch_details(&c.imdb_id)
            .await
            .map_err(fail("details"))?;
        let vector = self
            .embedder
            .embed(&describe_movie(&movie))
            .await
            .map_err(fail("embed"))?;
        self.index
            .upsert(IndexPoint {
                id: movie.imdb_id.clone(),
                vector,
                payload: movie.to_metadata(),
            })
            .await
            .map_err(fail("upsert"))?;

        debug!(imdb_id = %movie.imdb_id, title = %movie.title, "movie stored");
        Ok(movie)
    }

    /// Returns up to `top_k` stored movies most similar to `query`, in the
    /// order the index ranked them (descending score). Hits whose stored
    /// metadata does not decode into a movie are logged and dropped.
    ///
    /// # Errors
    /// `Validation` for a zero `top_k` or blank query, `Embedding` / `Index`
    /// when the respective collaborator fails.
    #[instrument(skip(self))]
    pub async fn search(&self, query: &str, top_k: usize) -> Result<Vec<MovieMatch>, SearchError> {
        if top_k == 0 {
            return Err(ValidationError::NonPositiveTopK.into());
        }
        if query.trim().is_empty() {
            return Err(ValidationError::EmptyQuery.into());
        }
        let started = Instant::now();

        let vector = self.embedder.embed(query).await.map_err(SearchError::Embedding)?;
        let hits = self
            .index
            .query(vector, top_k)
            .await
            .map_err(SearchError::Index)?;

        let ranked = hits.len();
        let matches: Vec<MovieMatch> = hits
            .into_iter()
            .filter_map(|h| match MovieRecord::from_metadata(&h.id, h.payload) {
                Ok(movie) => Some(MovieMatch {
                    movie,
                    score: h.score,
                }),
                Err(e) => {
                    warn!(id = %h.id, error = %e, "hit skipped");
                    None
                }
            })
            .collect();

        info!(
            ranked,
            hits = matches.len(),
            latency_ms = started.elapsed().as_millis() as u64,
            "search completed"
        );
        Ok(matches)
    }
}
