//! OMDb catalog client.
//!
//! Two operations back the movie library:
//! - [`OmdbClient::search_titles`]: title search with pagination, capped at a limit
//! - [`OmdbClient::fetch_details`]: full details of one IMDb id
//!
//! Third-party JSON is decoded into typed structs here; callers only see
//! [`TitleMatch`], [`MovieDetails`] and [`CatalogError`].

mod config;
mod errors;
mod omdb;
mod types;

pub use config::{DEFAULT_OMDB_URL, OmdbConfig};
pub use errors::{CatalogError, CatalogResult};
pub use omdb::OmdbClient;
pub use types::{MovieDetails, TitleMatch};
