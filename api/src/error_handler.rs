use std::any::Any;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use llm_service::LlmError;
use movie_catalog::CatalogError;
use movie_library::{SearchError, StoreError};
use serde::Serialize;
use thiserror::Error;
use tracing::error;
use vector_store::VectorStoreError;

/// Startup failures: configuration, client construction, listener.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(String),

    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    VectorStore(#[from] VectorStoreError),

    #[error("failed to bind listener on {addr}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error")]
    Server(#[source] std::io::Error),
}

/// Request-level errors. `Display` is the exact `error` string sent to clients.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Request body is empty")]
    EmptyBody,

    #[error("Invalid JSON in request body")]
    InvalidJson(String),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("numResults must be a positive integer")]
    InvalidNumResults,

    #[error("Invalid action: {0}")]
    InvalidAction(String),

    #[error("{0}")]
    Validation(String),

    #[error("Failed to fetch or store movies: {0}")]
    Store(String),

    #[error("Failed to search movies: {0}")]
    Search(String),

    #[error("Message is required")]
    MissingMessage,

    #[error("{0}")]
    Chat(String),

    #[error("Method Not Allowed")]
    MethodNotAllowed,

    #[error("An unexpected error occurred")]
    Unexpected(String),
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::EmptyBody
            | ApiError::InvalidJson(_)
            | ApiError::MissingField(_)
            | ApiError::InvalidNumResults
            | ApiError::InvalidAction(_)
            | ApiError::Validation(_)
            | ApiError::MissingMessage => StatusCode::BAD_REQUEST,

            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,

            ApiError::Store(_) | ApiError::Search(_) | ApiError::Chat(_) | ApiError::Unexpected(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn details(&self) -> Option<&str> {
        match self {
            ApiError::InvalidJson(d) | ApiError::Unexpected(d) => Some(d),
            _ => None,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<&'a str>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(%status, error = %self, details = ?self.details(), "request failed");
        }
        let body = ErrorBody {
            error: self.to_string(),
            details: self.details(),
        };
        (status, Json(body)).into_response()
    }
}

/// Handy result alias used across handlers.
pub type ApiResult<T> = Result<T, ApiError>;

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Validation(v) => ApiError::Validation(v.to_string()),
            StoreError::Catalog(e) => ApiError::Store(e.to_string()),
        }
    }
}

impl From<SearchError> for ApiError {
    fn from(err: SearchError) -> Self {
        match err {
            SearchError::Validation(v) => ApiError::Validation(v.to_string()),
            other => ApiError::Search(other.to_string()),
        }
    }
}

/// `CatchPanicLayer` hook: turns a handler panic into the generic 500 body.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let details = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic".to_string()
    };
    ApiError::Unexpected(details).into_response()
}
