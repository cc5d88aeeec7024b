//! Thin adapter around `qdrant-client` to isolate API usage.
//!
//! This facade concentrates all Qdrant interactions behind a minimal API,
//! hiding away the verbose builder pattern and keeping the rest of the
//! application decoupled from `qdrant-client`.
//!
//! Qdrant only accepts unsigned integers or UUIDs as point ids, so caller ids
//! are mapped to a stable UUIDv5 and the original id travels in the payload
//! under [`SOURCE_ID_KEY`].

use std::collections::HashMap;
use std::time::Duration;

use qdrant_client::Qdrant;
use qdrant_client::qdrant::{
    CreateCollectionBuilder, Distance, ListValue, PointId, PointStruct, SearchParamsBuilder,
    SearchPointsBuilder, Struct, UpsertPointsBuilder, Value as QValue, VectorParamsBuilder,
    value::Kind as K,
};
use services::uuid::stable_uuid;
use tracing::{debug, info};

use crate::config::{DistanceKind, VectorStoreConfig};
use crate::errors::VectorStoreError;
use crate::record::{IndexPoint, Payload, ScoredPayload};

/// Payload key holding the caller id of a point.
pub const SOURCE_ID_KEY: &str = "source_id";

/// A facade over the Qdrant client to keep the rest of the code clean and stable.
pub struct QdrantFacade {
    client: Qdrant,
    collection: String,
    distance: DistanceKind,
    dim: usize,
    exact: bool,
}

impl QdrantFacade {
    /// Creates a new facade from the given configuration.
    ///
    /// No network I/O happens here; call [`QdrantFacade::ensure_collection`] before use.
    pub fn new(cfg: &VectorStoreConfig) -> Result<Self, VectorStoreError> {
        cfg.validate()?;

        let mut builder = Qdrant::from_url(&cfg.qdrant_url)
            .timeout(Duration::from_secs(cfg.timeout_secs));
        if let Some(key) = &cfg.qdrant_api_key {
            builder = builder.api_key(key.clone());
        }
        let client = builder
            .build()
            .map_err(|e| VectorStoreError::Qdrant(e.to_string()))?;

        Ok(Self {
            client,
            collection: cfg.collection.clone(),
            distance: cfg.distance,
            dim: cfg.dim,
            exact: cfg.exact_search,
        })
    }

    /// Collection name this facade writes to.
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Vector dimensionality enforced on upsert and query.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Ensures that the collection exists in Qdrant.
    ///
    /// - If the collection already exists → no-op.
    /// - If missing → creates it with the configured size and distance.
    pub async fn ensure_collection(&self) -> Result<(), VectorStoreError> {
        let exists = self
            .client
            .collection_exists(&self.collection)
            .await
            .map_err(|e| VectorStoreError::Qdrant(e.to_string()))?;
        if exists {
            debug!("Collection '{}' already exists", self.collection);
            return Ok(());
        }

        info!(
            "Creating collection '{}' with size={} distance={:?}",
            self.collection, self.dim, self.distance
        );

        let distance = match self.distance {
            DistanceKind::Cosine => Distance::Cosine,
            DistanceKind::Dot => Distance::Dot,
            DistanceKind::Euclid => Distance::Euclid,
        };

        self.client
            .create_collection(
                CreateCollectionBuilder::new(&self.collection)
                    .vectors_config(VectorParamsBuilder::new(self.dim as u64, distance)),
            )
            .await
            .map_err(|e| VectorStoreError::Qdrant(e.to_string()))?;

        info!("Collection '{}' created successfully", self.collection);
        Ok(())
    }

    /// Inserts or replaces a single point, waiting for the write to be applied.
    pub async fn upsert(&self, point: IndexPoint) -> Result<(), VectorStoreError> {
        self.check_dim(point.vector.len())?;

        let pid = PointId::from(stable_uuid(&point.id).to_string());
        let mut payload: HashMap<String, QValue> = point
            .payload
            .into_iter()
            .map(|(k, v)| (k, json_to_qvalue(v)))
            .collect();
        payload.insert(
            SOURCE_ID_KEY.to_string(),
            json_to_qvalue(serde_json::Value::String(point.id.clone())),
        );

        let qpoint = PointStruct {
            id: Some(pid),
            payload,
            vectors: Some(point.vector.into()),
            ..Default::default()
        };

        debug!(id = %point.id, collection = %self.collection, "upserting point");
        self.client
            .upsert_points(UpsertPointsBuilder::new(&self.collection, vec![qpoint]).wait(true))
            .await
            .map_err(|e| VectorStoreError::Qdrant(e.to_string()))?;
        Ok(())
    }

    /// Performs a similarity search and returns hits sorted by descending score.
    pub async fn query(
        &self,
        vector: Vec<f32>,
        top_k: usize,
    ) -> Result<Vec<ScoredPayload>, VectorStoreError> {
        if top_k == 0 {
            return Err(VectorStoreError::InvalidTopK);
        }
        self.check_dim(vector.len())?;

        debug!(
            "Searching in '{}' with top_k={}, exact={}",
            self.collection, top_k, self.exact
        );

        let mut builder =
            SearchPointsBuilder::new(&self.collection, vector, top_k as u64).with_payload(true);
        if self.exact {
            builder = builder.params(SearchParamsBuilder::default().exact(true));
        }

        let res = self
            .client
            .search_points(builder)
            .await
            .map_err(|e| VectorStoreError::Qdrant(e.to_string()))?;

        let mut out = Vec::with_capacity(res.result.len());
        for r in res.result {
            let mut payload = qpayload_to_json(r.payload);
            let id = take_source_id(&mut payload)?;
            out.push(ScoredPayload {
                id,
                score: r.score,
                payload,
            });
        }

        debug!("Search completed: {} hits returned", out.len());
        Ok(out)
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

fn take_source_id(payload: &mut Payload) -> Result<String, VectorStoreError> {
    match payload.remove(SOURCE_ID_KEY) {
        Some(serde_json::Value::String(id)) => Ok(id),
        _ => Err(VectorStoreError::InvalidPayload(format!(
            "point without string `{SOURCE_ID_KEY}`"
        ))),
    }
}

/// Converts `serde_json::Value` into Qdrant `Value` (handles arrays/objects).
fn json_to_qvalue(v: serde_json::Value) -> QValue {
    let kind = match v {
        serde_json::Value::String(s) => Some(K::StringValue(s)),
        serde_json::Value::Number(n) => match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => Some(K::IntegerValue(i)),
            (None, Some(f)) => Some(K::DoubleValue(f)),
            _ => Some(K::StringValue(n.to_string())),
        },
        serde_json::Value::Bool(b) => Some(K::BoolValue(b)),
        serde_json::Value::Array(arr) => Some(K::ListValue(ListValue {
            values: arr.into_iter().map(json_to_qvalue).collect(),
        })),
        serde_json::Value::Object(map) => Some(K::StructValue(Struct {
            fields: map.into_iter().map(|(k, v)| (k, json_to_qvalue(v))).collect(),
        })),
        serde_json::Value::Null => None,
    };
    QValue { kind }
}

fn qvalue_to_json(v: QValue) -> serde_json::Value {
    match v.kind {
        Some(K::StringValue(s)) => serde_json::Value::String(s),
        Some(K::IntegerValue(i)) => serde_json::Value::Number(i.into()),
        Some(K::DoubleValue(f)) => serde_json::json!(f),
        Some(K::BoolValue(b)) => serde_json::Value::Bool(b),
        Some(K::ListValue(list)) => {
            serde_json::Value::Array(list.values.into_iter().map(qvalue_to_json).collect())
        }
        Some(K::StructValue(s)) => serde_json::Value::Object(qpayload_to_json(s.fields)),
        Some(K::NullValue(_)) | None => serde_json::Value::Null,
    }
}

/// Converts a Qdrant payload (`HashMap<String, qdrant::Value>`) into a JSON map.
fn qpayload_to_json(p: HashMap<String, QValue>) -> Payload {
    p.into_iter().map(|(k, v)| (k, qvalue_to_json(v))).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn payload_survives_qdrant_value_conversion() {
        let original = json!({
            "title": "Inception",
            "year": "2010",
            "imdbRating": 8.8,
            "votes": 2400000,
            "tags": ["Action", "Sci-Fi"],
            "extra": { "ok": true },
            "missing": null,
        });
        let serde_json::Value::Object(map) = original.clone() else {
            unreachable!()
        };

        let q: HashMap<String, QValue> =
            map.into_iter().map(|(k, v)| (k, json_to_qvalue(v))).collect();
        let back = serde_json::Value::Object(qpayload_to_json(q));
        assert_eq!(back, original);
    }

    #[test]
    fn source_id_is_stripped_from_payload() {
        let mut payload = Payload::new();
        payload.insert(SOURCE_ID_KEY.into(), json!("tt1375666"));
        payload.insert("title".into(), json!("Inception"));

        assert_eq!(take_source_id(&mut payload).unwrap(), "tt1375666");
        assert!(!payload.contains_key(SOURCE_ID_KEY));
        assert!(matches!(
            take_source_id(&mut payload),
            Err(VectorStoreError::InvalidPayload(_))
        ));
    }

    #[tokio::test]
    async fn dimension_and_top_k_are_checked_before_any_request() {
        let cfg = VectorStoreConfig::new_default("http://127.0.0.1:1", "movies", 3);
        let facade = QdrantFacade::new(&cfg).unwrap();

        assert!(matches!(
            facade.query(vec![1.0, 0.0, 0.0], 0).await,
            Err(VectorStoreError::InvalidTopK)
        ));
        assert!(matches!(
            facade.query(vec![1.0, 0.0], 1).await,
            Err(VectorStoreError::VectorSizeMismatch { got: 2, want: 3 })
        ));
    }
}
