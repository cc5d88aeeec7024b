//! In-process vector index using cosine similarity.
//!
//! Backed by a `BTreeMap` under a `tokio::sync::RwLock`. Meant for local runs
//! and tests; nothing is persisted.

use std::collections::BTreeMap;

use tokio::sync::RwLock;
use tracing::debug;

use crate::errors::VectorStoreError;
use crate::record::{IndexPoint, Payload, ScoredPayload};

/// An in-memory index with fixed dimensionality.
#[derive(Debug)]
pub struct InMemoryIndex {
    dim: usize,
    points: RwLock<BTreeMap<String, (Vec<f32>, Payload)>>,
}

impl InMemoryIndex {
    pub fn new(dim: usize) -> Self {
        Self {
            dim,
            points: RwLock::new(BTreeMap::new()),
        }
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Inserts or replaces the point with the same id.
    pub async fn upsert(&self, point: IndexPoint) -> Result<(), VectorStoreError> {
        self.check_dim(point.vector.len())?;
        debug!(id = %point.id, "in-memory upsert");
        self.points
            .write()
            .await
            .insert(point.id, (point.vector, point.payload));
        Ok(())
    }

    /// Returns up to `top_k` hits sorted by descending cosine similarity.
    ///
    /// Ties keep id order.
    pub async fn query(
        &self,
        vector: Vec<f32>,
        top_k: usize,
    ) -> Result<Vec<ScoredPayload>, VectorStoreError> {
        if top_k == 0 {
            return Err(VectorStoreError::InvalidTopK);
        }
        self.check_dim(vector.len())?;

        let points = self.points.read().await;
        let mut scored: Vec<ScoredPayload> = points
            .iter()
            .map(|(id, (v, payload))| ScoredPayload {
                id: id.clone(),
                score: cosine_similarity(v, &vector),
                payload: payload.clone(),
            })
            .collect();

        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        scored.truncate(top_k);
        Ok(scored)
    }

    fn check_dim(&self, got: usize) -> Result<(), VectorStoreError> {
        if got != self.dim {
            return Err(VectorStoreError::VectorSizeMismatch {
                got,
                want: self.dim,
            });
        }
        Ok(())
    }
}

/// Cosine similarity; 0.0 when either vector has zero magnitude.
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}
