mod common;

use std::sync::Arc;

use std::sync::atomic::Ordering;

use common::{CountingIndex, StubCatalog, VOCAB, library, movie};
use movie_library::{ClientError, SearchError, StoreError, ValidationError, VectorIndex};
use serde_json::json;
use vector_store::{IndexPoint, Payload};

fn catalog() -> StubCatalog {
    StubCatalog::with(vec![
        movie("tt1375666", "Inception", "A thief plants an idea in a sleeping mind."),
        movie("tt0133093", "The Matrix", "A hacker learns the matrix is a simulation."),
        movie("tt0120338", "Titanic", "Romance aboard the doomed ship."),
        movie("tt0078748", "Alien", "The crew of a ship meets an alien."),
    ])
}

#[tokio::test]
async fn store_with_no_candidates_is_empty_not_error() {
    let index = Arc::new(CountingIndex::new());
    let lib = library(catalog(), index.clone());

    let out = lib.store("asdkjasd", 25).await.unwrap();
    assert_eq!(out.stored_count, 0);
    assert!(out.stored.is_empty());
    assert_eq!(index.upserts(), 0);
}

#[tokio::test]
async fn store_single_match_upserts_once() {
    let index = Arc::new(CountingIndex::new());
    let lib = library(catalog(), index.clone());

    let out = lib.store("Inception", 1).await.unwrap();
    assert_eq!(out.stored_count, 1);
    assert_eq!(out.stored[0].imdb_id, "tt1375666");
    assert_eq!(index.upserts(), 1);
}

#[tokio::test]
async fn failed_candidates_are_skipped_and_counted() {
    let mut cat = StubCatalog::with(vec![
        movie("tt1", "Ship One", "Calm waters."),
        movie("tt2", "Ship Two", "Everything will explode."),
        movie("tt3", "Ship Three", "A quiet ship."),
        movie("tt4", "Ship Four", "Another ship."),
    ]);
    cat.missing.insert("tt3".into());
    let index = Arc::new(CountingIndex::new());
    let lib = library(cat, index.clone());

    let out = lib.store("ship", 4).await.unwrap();
    let ids: Vec<_> = out.stored.iter().map(|m| m.imdb_id.as_str()).collect();
    assert_eq!(ids, vec!["tt1", "tt4"]);
    assert_eq!(out.stored_count, out.stored.len());
    assert!(out.stored_count <= 4);
    // tt2 failed at embed, tt3 at details: neither reached the index.
    assert_eq!(index.upserts(), 2);
}

#[tokio::test]
async fn limit_caps_candidates_before_failures() {
    let mut cat = StubCatalog::with(vec![
        movie("tt1", "Ship One", "Calm waters."),
        movie("tt2", "Ship Two", "Calm waters."),
        movie("tt3", "Ship Three", "Calm waters."),
    ]);
    cat.missing.insert("tt1".into());
    let lib = library(cat, Arc::new(CountingIndex::new()));

    let out = lib.store("ship", 2).await.unwrap();
    assert_eq!(out.stored_count, 1);
    assert_eq!(out.stored[0].imdb_id, "tt2");
}

#[tokio::test]
async fn catalog_failure_fails_store() {
    let mut cat = catalog();
    cat.search_error = Some(ClientError::upstream("omdb", "timeout"));
    let lib = library(cat, Arc::new(CountingIndex::new()));

    let err = lib.store("Inception", 5).await.unwrap_err();
    assert!(matches!(err, StoreError::Catalog(ClientError::Upstream { .. })));
    assert_eq!(err.to_string(), "omdb: timeout");
}

#[tokio::test]
async fn zero_limit_and_top_k_are_rejected() {
    let lib = library(catalog(), Arc::new(CountingIndex::new()));

    assert!(matches!(
        lib.store("Inception", 0).await,
        Err(StoreError::Validation(ValidationError::NonPositiveLimit))
    ));
    assert!(matches!(
        lib.search("Inception", 0).await,
        Err(SearchError::Validation(ValidationError::NonPositiveTopK))
    ));
}

#[tokio::test]
async fn stored_inception_is_found_with_high_score() {
    let lib = library(catalog(), Arc::new(CountingIndex::new()));
    lib.store("", 1).await.unwrap_err();
    lib.store("Inception", 1).await.unwrap();
    lib.store("Matrix", 1).await.unwrap();

    let hits = lib.search("Inception", 1).await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].movie.title, "Inception");
    assert!(hits[0].score > 0.9, "score = {}", hits[0].score);
}

#[tokio::test]
async fn search_results_are_sorted_and_top_k_may_exceed_index() {
    let lib = library(catalog(), Arc::new(CountingIndex::new()));
    for q in ["Inception", "Matrix", "Titanic", "Alien"] {
        lib.store(q, 5).await.unwrap();
    }

    let hits = lib.search("a ship with an alien", 50).await.unwrap();
    assert_eq!(hits.len(), 4);
    assert!(hits.windows(2).all(|w| w[0].score >= w[1].score));
    assert_eq!(hits[0].movie.imdb_id, "tt0078748");
}

#[tokio::test]
async fn search_on_empty_index_returns_nothing() {
    let lib = library(catalog(), Arc::new(CountingIndex::new()));
    assert!(lib.search("asdkjasd", 25).await.unwrap().is_empty());
}

#[tokio::test]
async fn restoring_an_id_keeps_only_latest_metadata() {
    let index = Arc::new(CountingIndex::new());
    let first = library(
        StubCatalog::with(vec![movie("tt1375666", "Inception", "Old plot about a dream.")]),
        index.clone(),
    );
    let second = library(
        StubCatalog::with(vec![movie("tt1375666", "Inception", "New plot about a dream.")]),
        index.clone(),
    );

    first.store("Inception", 1).await.unwrap();
    second.store("Inception", 1).await.unwrap();

    let hits = first.search("inception dream", 10).await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].movie.plot, "New plot about a dream.");
}

#[tokio::test]
async fn embedding_failure_fails_search() {
    let lib = library(catalog(), Arc::new(CountingIndex::new()));
    let err = lib.search("explode", 3).await.unwrap_err();
    assert!(matches!(err, SearchError::Embedding(_)));
}

#[tokio::test]
async fn failed_upsert_skips_only_that_candidate() {
    let cat = StubCatalog::with(vec![
        movie("tt1", "Ship One", "Calm waters."),
        movie("tt2", "Ship Two", "Calm waters."),
        movie("tt3", "Ship Three", "Calm waters."),
    ]);
    let index = Arc::new(CountingIndex::failing_upserts(&["tt2"]));
    let lib = library(cat, index.clone());

    let out = lib.store("ship", 3).await.unwrap();
    let ids: Vec<_> = out.stored.iter().map(|m| m.imdb_id.as_str()).collect();
    assert_eq!(ids, vec!["tt1", "tt3"]);
    assert_eq!(out.stored_count, 2);
    assert_eq!(index.upserts(), 2);
}

#[tokio::test]
async fn index_failure_fails_search() {
    let index = Arc::new(CountingIndex::new());
    index.fail_queries.store(true, Ordering::SeqCst);
    let lib = library(catalog(), index);

    let err = lib.search("Inception", 3).await.unwrap_err();
    assert!(matches!(err, SearchError::Index(ClientError::Upstream { .. })));
    assert_eq!(err.to_string(), "index query failed: vector index: unavailable");
}

#[tokio::test]
async fn undecodable_hit_is_dropped_from_results() {
    let index = Arc::new(CountingIndex::new());
    let lib = library(catalog(), index.clone());
    lib.store("Inception", 1).await.unwrap();

    let mut foreign = Payload::new();
    foreign.insert("kind".into(), json!("not a movie"));
    let mut vector = vec![0.0; VOCAB.len()];
    vector[0] = 1.0;
    VectorIndex::upsert(
        &index.inner,
        IndexPoint {
            id: "foreign-1".into(),
            vector,
            payload: foreign,
        },
    )
    .await
    .unwrap();

    let hits = lib.search("Inception", 10).await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].movie.imdb_id, "tt1375666");
}
