use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use tracing::{debug, instrument};

use crate::{
    core::app_state::AppState,
    error_handler::{ApiError, ApiResult},
    routes::chat::chat_request::{ChatRequest, ChatResponse},
};

/// `POST /api/chat`: forwards one user message to the chat profile.
#[instrument(name = "chat_route", skip_all)]
pub async fn chat_route(
    State(state): State<AppState>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> ApiResult<Json<ChatResponse>> {
    let Json(req) = body.map_err(|e| ApiError::InvalidJson(e.body_text()))?;

    let message = req
        .message
        .filter(|m| !m.trim().is_empty())
        .ok_or(ApiError::MissingMessage)?;
    debug!(message_len = message.len(), "chat request");

    let reply = state
        .llm
        .chat(&message, None)
        .await
        .map_err(|e| ApiError::Chat(e.to_string()))?;

    Ok(Json(ChatResponse { reply }))
}
