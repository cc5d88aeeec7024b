use movie_library::{MovieRecord, StoreOutcome};
use serde::Serialize;

/// Body of a successful `store`.
#[derive(Debug, Serialize)]
pub struct StoreResponse {
    pub message: String,
    pub movies: Vec<MovieRecord>,
}

impl From<StoreOutcome> for StoreResponse {
    fn from(out: StoreOutcome) -> Self {
        Self {
            message: format!("Successfully stored {} movies!", out.stored_count),
            movies: out.stored,
        }
    }
}
