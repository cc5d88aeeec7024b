//! Movie records as returned to callers and stored as index metadata.

use serde::{Deserialize, Serialize};
use vector_store::Payload;

use crate::errors::ClientError;

/// One catalog movie. Built once per successful lookup and never mutated.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieRecord {
    pub imdb_id: String,
    pub title: String,
    #[serde(default)]
    pub year: String,
    #[serde(default)]
    pub rated: String,
    #[serde(default)]
    pub plot: String,
    /// Comma-joined, as the catalog reports it. See [`MovieRecord::genres`].
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub director: String,
    /// 0–10; `None` when the catalog has no rating.
    #[serde(default)]
    pub imdb_rating: Option<f32>,
}

impl MovieRecord {
    /// Genre list parsed from the comma-joined string.
    pub fn genres(&self) -> Vec<&str> {
        self.genre
            .split(',')
            .map(str::trim)
            .filter(|g| !g.is_empty())
            .collect()
    }

    /// Flat metadata map stored next to the vector.
    pub fn to_metadata(&self) -> Payload {
        match serde_json::to_value(self) {
            Ok(serde_json::Value::Object(map)) => map,
            // A struct of strings and an optional float always serializes to an object.
            _ => Payload::new(),
        }
    }

    /// Rebuilds a record from index metadata; `id` wins over a missing `imdbId`.
    pub fn from_metadata(id: &str, mut payload: Payload) -> Result<Self, ClientError> {
        payload
            .entry("imdbId")
            .or_insert_with(|| serde_json::Value::String(id.to_string()));
        serde_json::from_value(serde_json::Value::Object(payload))
            .map_err(|e| ClientError::upstream("vector index", format!("bad metadata for {id}: {e}")))
    }
}

impl From<movie_catalog::MovieDetails> for MovieRecord {
    fn from(d: movie_catalog::MovieDetails) -> Self {
        Self {
            imdb_id: d.imdb_id,
            title: d.title,
            year: d.year,
            rated: d.rated,
            plot: d.plot,
            genre: d.genre,
            director: d.director,
            imdb_rating: d.imdb_rating,
        }
    }
}

/// A search hit: the stored record plus its similarity score.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MovieMatch {
    #[serde(flatten)]
    pub movie: MovieRecord,
    pub score: f32,
}

/// Result of a `store` call. `stored_count == stored.len()`.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreOutcome {
    pub stored_count: usize,
    pub stored: Vec<MovieRecord>,
}

impl StoreOutcome {
    pub fn new(stored: Vec<MovieRecord>) -> Self {
        Self {
            stored_count: stored.len(),
            stored,
        }
    }
}

/// Text that gets embedded for a movie. Empty fields are left out.
pub fn describe_movie(m: &MovieRecord) -> String {
    let mut lines = Vec::with_capacity(6);
    if m.year.is_empty() {
        lines.push(format!("Title: {}", m.title));
    } else {
        lines.push(format!("Title: {} ({})", m.title, m.year));
    }
    let genres = m.genres();
    if !genres.is_empty() {
        lines.push(format!("Genre: {}", genres.join(", ")));
    }
    if !m.director.is_empty() {
        lines.push(format!("Director: {}", m.director));
    }
    if !m.rated.is_empty() {
        lines.push(format!("Rated: {}", m.rated));
    }
    if let Some(r) = m.imdb_rating {
        lines.push(format!("IMDb rating: {r:.1}/10"));
    }
    if !m.plot.is_empty() {
        lines.push(format!("Plot: {}", m.plot));
    }
    lines.join("\n")
}
