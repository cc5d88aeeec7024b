use axum::{
    Json,
    body::Bytes,
    extract::State,
    response::{IntoResponse, Response},
};
use tracing::{debug, info, instrument};

use crate::{
    core::app_state::AppState,
    error_handler::ApiResult,
    routes::movies::{
        movies_request::{MoviesAction, MoviesRequest},
        movies_response::StoreResponse,
    },
};

/// `POST /api/movies`: store movies from the catalog or search the index.
///
/// The body is read raw so that empty and malformed payloads get the
/// documented error bodies instead of axum's rejections.
#[instrument(name = "movies_route", skip_all)]
pub async fn movies_route(State(state): State<AppState>, body: Bytes) -> ApiResult<Response> {
    let req = MoviesRequest::parse(&body)?;
    debug!(action = ?req.action, text = %req.text, num_results = req.num_results, "movies request");

    match req.action {
        MoviesAction::Store => {
            let outcome = state.library.store(&req.text, req.num_results).await?;
            info!(stored = outcome.stored_count, "store request completed");
            Ok(Json(StoreResponse::from(outcome)).into_response())
        }
        MoviesAction::Search => {
            let matches = state.library.search(&req.text, req.num_results).await?;
            info!(hits = matches.len(), "search request completed");
            Ok(Json(matches).into_response())
        }
    }
}
