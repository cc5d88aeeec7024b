//! In-process collaborators for orchestrator tests.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use futures::future::BoxFuture;
use movie_library::{
    Candidate, ClientError, MovieCatalog, MovieLibrary, MovieRecord, TextEmbedder, VectorIndex,
};
use vector_store::{InMemoryIndex, IndexPoint, ScoredPayload};

pub const VOCAB: [&str; 6] = ["inception", "matrix", "titanic", "dream", "ship", "alien"];

pub fn movie(id: &str, title: &str, plot: &str) -> MovieRecord {
    MovieRecord {
        imdb_id: id.into(),
        title: title.into(),
        year: "2010".into(),
        rated: "PG-13".into(),
        plot: plot.into(),
        genre: "Drama".into(),
        director: "Somebody".into(),
        imdb_rating: Some(8.0),
    }
}

/// Title-substring catalog. Ids in `missing` fail `fetch_details` with `NotFound`.
#[derive(Default)]
pub struct StubCatalog {
    pub movies: Vec<MovieRecord>,
    pub missing: HashSet<String>,
    pub search_error: Option<ClientError>,
}

impl StubCatalog {
    pub fn with(movies: Vec<MovieRecord>) -> Self {
        Self {
            movies,
            ..Default::default()
        }
    }
}

impl MovieCatalog for StubCatalog {
    fn search_titles<'a>(
        &'a self,
        query: &'a str,
        limit: usize,
    ) -> BoxFuture<'a, Result<Vec<Candidate>, ClientError>> {
        Box::pin(async move {
            if let Some(e) = &self.search_error {
                return Err(e.clone());
            }
            let q = query.to_lowercase();
            let hits: Vec<Candidate> = self
                .movies
                .iter()
                .filter(|m| m.title.to_lowercase().contains(&q))
                .take(limit)
                .map(|m| Candidate {
                    imdb_id: m.imdb_id.clone(),
                    title: m.title.clone(),
                })
                .collect();
            if hits.is_empty() {
                return Err(ClientError::NotFound("Movie not found!".into()));
            }
            Ok(hits)
        })
    }

    fn fetch_details<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<MovieRecord, ClientError>> {
        Box::pin(async move {
            if self.missing.contains(id) {
                return Err(ClientError::NotFound(id.to_string()));
            }
            self.movies
                .iter()
                .find(|m| m.imdb_id == id)
                .cloned()
                .ok_or_else(|| ClientError::NotFound(id.to_string()))
        })
    }
}

/// Deterministic bag-of-keywords embedder over [`VOCAB`].
/// Texts containing "explode" fail as an upstream error.
pub struct KeywordEmbedder;

impl TextEmbedder for KeywordEmbedder {
    fn embed<'a>(&'a self, text: &'a str) -> BoxFuture<'a, Result<Vec<f32>, ClientError>> {
        Box::pin(async move {
            let lower = text.to_lowercase();
            if lower.contains("explode") {
                return Err(ClientError::upstream("embeddings", "HTTP 500"));
            }
            Ok(VOCAB
                .iter()
                .map(|w| lower.matches(w).count() as f32)
                .collect())
        })
    }
}

/// [`InMemoryIndex`] that counts upserts. Upserts of ids in `fail_ids`
/// and every query while `fail_queries` is set fail as upstream errors.
pub struct CountingIndex {
    pub inner: InMemoryIndex,
    pub upserts: AtomicUsize,
    pub fail_ids: HashSet<String>,
    pub fail_queries: AtomicBool,
}

impl CountingIndex {
    pub fn new() -> Self {
        Self {
            inner: InMemoryIndex::new(VOCAB.len()),
            upserts: AtomicUsize::new(0),
            fail_ids: HashSet::new(),
            fail_queries: AtomicBool::new(false),
        }
    }

    pub fn failing_upserts(ids: &[&str]) -> Self {
        Self {
            fail_ids: ids.iter().map(|id| id.to_string()).collect(),
            ..Self::new()
        }
    }

    pub fn upserts(&self) -> usize {
        self.upserts.load(Ordering::SeqCst)
    }
}

impl VectorIndex for CountingIndex {
    fn upsert(&self, point: IndexPoint) -> BoxFuture<'_, Result<(), ClientError>> {
        if self.fail_ids.contains(&point.id) {
            let id = point.id;
            return Box::pin(async move {
                Err(ClientError::upstream("vector index", format!("upsert of {id} rejected")))
            });
        }
        self.upserts.fetch_add(1, Ordering::SeqCst);
        VectorIndex::upsert(&self.inner, point)
    }

    fn query(
        &self,
        vector: Vec<f32>,
        top_k: usize,
    ) -> BoxFuture<'_, Result<Vec<ScoredPayload>, ClientError>> {
        if self.fail_queries.load(Ordering::SeqCst) {
            return Box::pin(async { Err(ClientError::upstream("vector index", "unavailable")) });
        }
        VectorIndex::query(&self.inner, vector, top_k)
    }
}

pub fn library(catalog: StubCatalog, index: Arc<CountingIndex>) -> MovieLibrary {
    MovieLibrary::new(Arc::new(catalog), Arc::new(KeywordEmbedder), index)
}
