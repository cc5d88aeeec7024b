//! Public catalog types and the raw OMDb payloads they are decoded from.

use serde::{Deserialize, Serialize};

use crate::errors::{CatalogError, CatalogResult};

/// One hit of a title search, in provider order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleMatch {
    pub imdb_id: String,
    pub title: String,
    pub year: String,
}

/// Full details of one title. `N/A` fields are normalised to empty strings,
/// an `N/A` rating to `None`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MovieDetails {
    pub imdb_id: String,
    pub title: String,
    pub year: String,
    pub rated: String,
    pub plot: String,
    pub genre: String,
    pub director: String,
    pub imdb_rating: Option<f32>,
}

/* ==========================
Raw OMDb payloads
========================== */

/// `GET /?s=...` response. `Search` and `totalResults` are absent when `Response` is `"False"`.
#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Error")]
    error: Option<String>,
    #[serde(rename = "Search", default)]
    search: Vec<SearchItem>,
    #[serde(rename = "totalResults")]
    total_results: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Year", default)]
    year: String,
    #[serde(rename = "imdbID")]
    imdb_id: String,
}

/// `GET /?i=...` response.
#[derive(Debug, Deserialize)]
pub(crate) struct DetailsResponse {
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Error")]
    error: Option<String>,
    #[serde(rename = "imdbID")]
    imdb_id: Option<String>,
    #[serde(rename = "Title")]
    title: Option<String>,
    #[serde(rename = "Year")]
    year: Option<String>,
    #[serde(rename = "Rated")]
    rated: Option<String>,
    #[serde(rename = "Plot")]
    plot: Option<String>,
    #[serde(rename = "Genre")]
    genre: Option<String>,
    #[serde(rename = "Director")]
    director: Option<String>,
    #[serde(rename = "imdbRating")]
    imdb_rating: Option<String>,
}

/// One decoded search page.
#[derive(Debug)]
pub(crate) struct SearchPage {
    pub matches: Vec<TitleMatch>,
    pub total_results: usize,
}

impl SearchResponse {
    /// Converts a page into matches, mapping `Response: "False"` into an error.
    pub(crate) fn into_page(self, query: &str) -> CatalogResult<SearchPage> {
        if !is_true(&self.response) {
            return Err(false_response(self.error, query));
        }

        let total_results = self
            .total_results
            .as_deref()
            .and_then(|t| t.trim().parse::<usize>().ok())
            .unwrap_or(self.search.len());

        let matches = self
            .search
            .into_iter()
            .map(|s| TitleMatch {
                imdb_id: s.imdb_id,
                title: s.title,
                year: s.year,
            })
            .collect();

        Ok(SearchPage {
            matches,
            total_results,
        })
    }
}

impl DetailsResponse {
    pub(crate) fn into_details(self, id: &str) -> CatalogResult<MovieDetails> {
        if !is_true(&self.response) {
            // OMDb answers "Incorrect IMDb ID." / "Error getting data." for unknown ids.
            return match self.error {
                Some(msg) if msg.to_ascii_lowercase().contains("invalid api key") => {
                    Err(CatalogError::Unauthorized(msg))
                }
                Some(msg) => Err(CatalogError::NotFound(format!("{id}: {msg}"))),
                None => Err(CatalogError::NotFound(id.to_string())),
            };
        }

        let imdb_id = self
            .imdb_id
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| CatalogError::InvalidResponse(format!("{id}: missing imdbID")))?;
        let title = self
            .title
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| CatalogError::InvalidResponse(format!("{id}: missing Title")))?;

        Ok(MovieDetails {
            imdb_id,
            title,
            year: clean(self.year),
            rated: clean(self.rated),
            plot: clean(self.plot),
            genre: clean(self.genre),
            director: clean(self.director),
            imdb_rating: parse_rating(self.imdb_rating.as_deref()),
        })
    }
}

fn is_true(s: &str) -> bool {
    s.eq_ignore_ascii_case("true")
}

fn false_response(error: Option<String>, query: &str) -> CatalogError {
    let msg = error.unwrap_or_else(|| "unknown error".into());
    let lower = msg.to_ascii_lowercase();
    if lower.contains("not found") {
        CatalogError::NotFound(format!("'{query}': {msg}"))
    } else if lower.contains("invalid api key") {
        CatalogError::Unauthorized(msg)
    } else {
        CatalogError::Provider(msg)
    }
}

/// OMDb uses the literal `N/A` for missing values.
fn clean(v: Option<String>) -> String {
    match v {
        Some(s) if s.trim() != "N/A" => s.trim().to_string(),
        _ => String::new(),
    }
}

/// Parses `"8.8"` into `Some(8.8)`; `N/A`, garbage and values outside 0–10 become `None`.
pub(crate) fn parse_rating(raw: Option<&str>) -> Option<f32> {
    raw.and_then(|r| r.trim().parse::<f32>().ok())
        .filter(|r| (0.0..=10.0).contains(r))
}
