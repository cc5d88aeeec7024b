//! Adapters from the concrete clients to the library's collaborator traits.

use std::sync::Arc;

use futures::future::BoxFuture;
use llm_service::LlmServiceProfiles;
use movie_catalog::{CatalogError, OmdbClient};
use vector_store::{InMemoryIndex, IndexPoint, QdrantFacade, ScoredPayload, VectorStoreError};

use crate::errors::ClientError;
use crate::model::MovieRecord;
use crate::ports::{Candidate, MovieCatalog, TextEmbedder, VectorIndex};

impl From<CatalogError> for ClientError {
    fn from(e: CatalogError) -> Self {
        match e {
            CatalogError::NotFound(msg) => ClientError::NotFound(msg),
            other => ClientError::upstream("omdb", other),
        }
    }
}

fn index_error(e: VectorStoreError) -> ClientError {
    ClientError::upstream("vector index", e)
}

impl MovieCatalog for OmdbClient {
    fn search_titles<'a>(
        &'a self,
        query: &'a str,
        limit: usize,
    ) -> BoxFuture<'a, Result<Vec<Candidate>, ClientError>> {
        Box::pin(async move {
            let hits = OmdbClient::search_titles(self, query, limit).await?;
            Ok(hits
                .into_iter()
                .map(|h| Candidate {
                    imdb_id: h.imdb_id,
                    title: h.title,
                })
                .collect())
        })
    }

    fn fetch_details<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<MovieRecord, ClientError>> {
        Box::pin(async move {
            let details = OmdbClient::fetch_details(self, id).await?;
            Ok(MovieRecord::from(details))
        })
    }
}

/// Embedding profile of the shared LLM service, with a dimension check.
#[derive(Clone)]
pub struct LlmEmbedder {
    svc: Arc<LlmServiceProfiles>,
    dim: usize,
}

impl LlmEmbedder {
    pub fn new(svc: Arc<LlmServiceProfiles>, dim: usize) -> Self {
        Self { svc, dim }
    }
}

impl TextEmbedder for LlmEmbedder {
    fn embed<'a>(&'a self, text: &'a str) -> BoxFuture<'a, Result<Vec<f32>, ClientError>> {
        Box::pin(async move {
            let v = self
                .svc
                .embed(text)
                .await
                .map_err(|e| ClientError::upstream("embeddings", e))?;

            if v.len() != self.dim {
                return Err(ClientError::upstream(
                    "embeddings",
                    format!("vector size mismatch: got {}, want {}", v.len(), self.dim),
                ));
            }
            Ok(v)
        })
    }
}

impl VectorIndex for QdrantFacade {
    fn upsert(&self, point: IndexPoint) -> BoxFuture<'_, Result<(), ClientError>> {
        Box::pin(async move { QdrantFacade::upsert(self, point).await.map_err(index_error) })
    }

    fn query(
        &self,
        vector: Vec<f32>,
        top_k: usize,
    ) -> BoxFuture<'_, Result<Vec<ScoredPayload>, ClientError>> {
        Box::pin(async move {
            QdrantFacade::query(self, vector, top_k)
                .await
                .map_err(index_error)
        })
    }
}

impl VectorIndex for InMemoryIndex {
    fn upsert(&self, point: IndexPoint) -> BoxFuture<'_, Result<(), ClientError>> {
        Box::pin(async move { InMemoryIndex::upsert(self, point).await.map_err(index_error) })
    }

    fn query(
        &self,
        vector: Vec<f32>,
        top_k: usize,
    ) -> BoxFuture<'_, Result<Vec<ScoredPayload>, ClientError>> {
        Box::pin(async move {
            InMemoryIndex::query(self, vector, top_k)
                .await
                .map_err(index_error)
        })
    }
}
