use axum::{Json, extract::State};
use llm_service::HealthStatus;
use serde::Serialize;

use crate::core::app_state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `ok` when every provider probe passed, `degraded` otherwise.
    pub status: &'static str,
    pub providers: Vec<HealthStatus>,
}

/// `GET /health`: best-effort provider probes. Always 200.
pub async fn health_route(State(state): State<AppState>) -> Json<HealthResponse> {
    let providers = state.llm.health_all().await;
    let status = if providers.iter().all(|p| p.ok) {
        "ok"
    } else {
        "degraded"
    };
    Json(HealthResponse { status, providers })
}
