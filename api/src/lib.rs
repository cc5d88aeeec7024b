//! HTTP boundary of the movie library backend.
//!
//! Routes:
//! - `POST /api/movies` → store or search movies (`{text, action, numResults?}`)
//! - `POST /api/chat`   → single-turn chat with the configured model
//! - `GET  /health`     → provider probes

use axum::{
    Router,
    response::IntoResponse,
    routing::{get, post},
};
use tokio::signal;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};
use tracing::{info, warn};

pub mod core;
pub mod error_handler;
mod routes;

use crate::{
    core::app_state::{AppConfig, AppState},
    error_handler::{AppError, ApiError, handle_panic},
    routes::{
        chat::chat_route::chat_route, health::health_route::health_route,
        movies::movies_route::movies_route,
    },
};

/// Builds the router with tracing and panic-to-500 layers.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/movies", post(movies_route))
        .route("/api/chat", post(chat_route))
        .route("/health", get(health_route))
        .method_not_allowed_fallback(method_not_allowed)
        .with_state(state)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
}

async fn method_not_allowed() -> impl IntoResponse {
    ApiError::MethodNotAllowed
}

/// Reads configuration, builds all clients and serves until Ctrl+C.
pub async fn start() -> Result<(), AppError> {
    let cfg = AppConfig::from_env()?;
    let state = AppState::from_env(&cfg).await?;
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&cfg.address)
        .await
        .map_err(|source| AppError::Bind {
            addr: cfg.address.clone(),
            source,
        })?;
    info!(address = %cfg.address, backend = ?cfg.vector_backend, "movie library API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    Ok(())
}

/// Resolves when Ctrl+C is pressed.
async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
