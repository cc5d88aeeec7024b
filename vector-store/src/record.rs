//! Core data models exchanged with the index backends.

use serde::{Deserialize, Serialize};

/// Flat metadata stored next to each vector.
pub type Payload = serde_json::Map<String, serde_json::Value>;

/// A vector with its caller-assigned id and metadata.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IndexPoint {
    /// Caller id (e.g. an IMDb id). Upserting the same id replaces the entry.
    pub id: String,
    pub vector: Vec<f32>,
    #[serde(default)]
    pub payload: Payload,
}

/// A single query hit, ordered by descending `score`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScoredPayload {
    pub id: String,
    pub score: f32,
    pub payload: Payload,
}
