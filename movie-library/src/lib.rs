//! Movie library: store movies from the OMDb catalog as embeddings in a
//! vector index, and search them by semantic similarity.
//!
//! [`MovieLibrary`] takes its three collaborators as trait objects
//! ([`MovieCatalog`], [`TextEmbedder`], [`VectorIndex`]). Adapters for the
//! production clients are in [`adapters`].

pub mod adapters;
mod errors;
mod library;
mod model;
mod ports;

pub use errors::{CandidateFailure, ClientError, SearchError, StoreError, ValidationError};
pub use library::MovieLibrary;
pub use model::{MovieMatch, MovieRecord, StoreOutcome, describe_movie};
pub use ports::{Candidate, MovieCatalog, TextEmbedder, VectorIndex};
