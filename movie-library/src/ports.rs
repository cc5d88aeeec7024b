//! Collaborator interfaces of [`crate::MovieLibrary`].
//!
//! Implement these to plug in another catalog, embedding backend or index.
//! Production adapters live in [`crate::adapters`]; tests use in-process stubs.

use futures::future::BoxFuture;
use vector_store::{IndexPoint, ScoredPayload};

use crate::errors::ClientError;
use crate::model::MovieRecord;

/// Title hit returned by [`MovieCatalog::search_titles`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Candidate {
    pub imdb_id: String,
    pub title: String,
}

/// External movie metadata provider.
pub trait MovieCatalog: Send + Sync {
    /// Up to `limit` candidates in provider order; `NotFound` when nothing matches.
    fn search_titles<'a>(
        &'a self,
        query: &'a str,
        limit: usize,
    ) -> BoxFuture<'a, Result<Vec<Candidate>, ClientError>>;

    /// Full record for one id; `NotFound` when the id cannot be resolved.
    fn fetch_details<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<MovieRecord, ClientError>>;
}

/// Text → fixed-length vector.
pub trait TextEmbedder: Send + Sync {
    fn embed<'a>(&'a self, text: &'a str) -> BoxFuture<'a, Result<Vec<f32>, ClientError>>;
}

/// Nearest-neighbour store keyed by id.
pub trait VectorIndex: Send + Sync {
    /// Insert or replace the entry with `point.id`.
    fn upsert(&self, point: IndexPoint) -> BoxFuture<'_, Result<(), ClientError>>;

    /// Up to `top_k` hits, descending by score.
    fn query(
        &self,
        vector: Vec<f32>,
        top_k: usize,
    ) -> BoxFuture<'_, Result<Vec<ScoredPayload>, ClientError>>;
}
