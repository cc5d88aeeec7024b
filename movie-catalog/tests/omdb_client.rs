//! Drives `OmdbClient` against a local axum stand-in for OMDb.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use movie_catalog::{CatalogError, OmdbClient, OmdbConfig};
use serde_json::{Value, json};

const KEY: &str = "test-key";
const TOTAL: usize = 25;

/// Counts title-search page requests.
#[derive(Clone, Default)]
struct Stub {
    search_pages: Arc<AtomicUsize>,
}

async fn omdb(
    State(stub): State<Stub>,
    Query(q): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    if q.get("apikey").map(String::as_str) != Some(KEY) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"Response": "False", "Error": "Invalid API key!"})),
        );
    }

    if let Some(id) = q.get("i") {
        assert_eq!(q.get("plot").map(String::as_str), Some("full"));
        let body = if id == "tt0000001" {
            json!({
                "Title": "Movie 1", "Year": "2001", "Rated": "PG", "Genre": "Drama, Sci-Fi",
                "Director": "Someone", "Plot": "A long plot.", "imdbRating": "7.5",
                "imdbID": id, "Response": "True"
            })
        } else {
            json!({"Response": "False", "Error": "Incorrect IMDb ID."})
        };
        return (StatusCode::OK, Json(body));
    }

    stub.search_pages.fetch_add(1, Ordering::SeqCst);
    let query = q.get("s").cloned().unwrap_or_default();
    assert_eq!(q.get("type").map(String::as_str), Some("movie"));
    if query != "movie" {
        return (
            StatusCode::OK,
            Json(json!({"Response": "False", "Error": "Movie not found!"})),
        );
    }

    let page: usize = q.get("page").and_then(|p| p.parse().ok()).unwrap_or(1);
    let items: Vec<Value> = ((page - 1) * 10 + 1..=(page * 10).min(TOTAL))
        .map(|n| {
            json!({
                "Title": format!("Movie {n}"),
                "Year": "2001",
                "imdbID": format!("tt{n:07}"),
                "Type": "movie"
            })
        })
        .collect();
    if items.is_empty() {
        return (
            StatusCode::OK,
            Json(json!({"Response": "False", "Error": "Movie not found!"})),
        );
    }
    (
        StatusCode::OK,
        Json(json!({"Search": items, "totalResults": TOTAL.to_string(), "Response": "True"})),
    )
}

async fn spawn_stub() -> SocketAddr {
    spawn_counting_stub().await.0
}

async fn spawn_counting_stub() -> (SocketAddr, Stub) {
    let stub = Stub::default();
    let app = Router::new().route("/", get(omdb)).with_state(stub.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (addr, stub)
}

fn client(addr: SocketAddr, key: &str) -> OmdbClient {
    let mut cfg = OmdbConfig::new(key);
    cfg.base_url = format!("http://{addr}");
    cfg.timeout_secs = 5;
    OmdbClient::new(&cfg).unwrap()
}

#[tokio::test]
async fn search_paginates_up_to_limit() {
    let addr = spawn_stub().await;
    let omdb = client(addr, KEY);

    let hits = omdb.search_titles("movie", 12).await.unwrap();
    assert_eq!(hits.len(), 12);
    assert_eq!(hits[0].imdb_id, "tt0000001");
    assert_eq!(hits[11].imdb_id, "tt0000012");
}

#[tokio::test]
async fn search_requests_only_the_pages_it_needs() {
    for (limit, pages) in [(10, 1), (12, 2), (20, 2), (100, 3)] {
        let (addr, stub) = spawn_counting_stub().await;
        let omdb = client(addr, KEY);

        omdb.search_titles("movie", limit).await.unwrap();
        assert_eq!(stub.search_pages.load(Ordering::SeqCst), pages, "limit {limit}");
    }
}

#[tokio::test]
async fn search_stops_when_results_are_exhausted() {
    let addr = spawn_stub().await;
    let omdb = client(addr, KEY);

    let hits = omdb.search_titles("movie", 100).await.unwrap();
    assert_eq!(hits.len(), TOTAL);
}

#[tokio::test]
async fn unknown_title_is_not_found() {
    let addr = spawn_stub().await;
    let omdb = client(addr, KEY);

    let err = omdb.search_titles("asdkjasd", 5).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn details_are_decoded_and_unknown_ids_are_not_found() {
    let addr = spawn_stub().await;
    let omdb = client(addr, KEY);

    let d = omdb.fetch_details("tt0000001").await.unwrap();
    assert_eq!(d.title, "Movie 1");
    assert_eq!(d.imdb_rating, Some(7.5));

    assert!(omdb.fetch_details("tt9999999").await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn bad_key_is_unauthorized() {
    let addr = spawn_stub().await;
    let omdb = client(addr, "wrong");

    let err = omdb.search_titles("movie", 1).await.unwrap_err();
    assert!(matches!(err, CatalogError::Unauthorized(_)));
}
