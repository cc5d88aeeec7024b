//! Vector index access for the movie library.
//!
//! Two backends share the same record types:
//! - [`QdrantFacade`]: a Qdrant collection (persistent, the default)
//! - [`InMemoryIndex`]: a process-local cosine index for local runs and tests
//!
//! Both take caller ids (IMDb ids), upsert by id and return hits sorted by
//! descending score.

mod config;
mod errors;
mod memory;
mod qdrant_facade;
mod record;

pub use config::{DistanceKind, VectorStoreConfig};
pub use errors::VectorStoreError;
pub use memory::InMemoryIndex;
pub use qdrant_facade::{QdrantFacade, SOURCE_ID_KEY};
pub use record::{IndexPoint, Payload, ScoredPayload};
