//! Request-level errors and their HTTP mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use quill_core::{InvalidPage, ListError, StoreError, ValidationErrors};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Everything a handler can fail with. [`IntoResponse`] is the only place
/// status codes are picked.
#[derive(Debug, Error)]
pub enum ApiError {
    /// 400 with field-scoped messages.
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    /// 404 `{"detail": "Invalid page."}`.
    #[error(transparent)]
    InvalidPage(#[from] InvalidPage),

    /// 400, the body was not valid JSON.
    #[error("JSON parse error - {0}")]
    Parse(String),

    /// 400, the request URL could not be turned into an absolute one.
    #[error("Malformed request URL.")]
    Url(#[from] url::ParseError),

    /// 500; the cause is logged, not returned.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// 500, a blocking task panicked or was cancelled.
    #[error("background task failed: {0}")]
    Task(String),
}

impl From<ListError> for ApiError {
    fn from(err: ListError) -> Self {
        match err {
            ListError::InvalidPage(e) => Self::InvalidPage(e),
            ListError::Store(e) => Self::Store(e),
        }
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::Task(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(errors) => (StatusCode::BAD_REQUEST, Json(errors)).into_response(),
            ApiError::InvalidPage(e) => {
                (StatusCode::NOT_FOUND, Json(json!({ "detail": e.to_string() }))).into_response()
            }
            err @ (ApiError::Parse(_) | ApiError::Url(_)) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "detail": err.to_string() })))
                    .into_response()
            }
            err @ (ApiError::Store(_) | ApiError::Task(_)) => {
                error!(error = %err, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "detail": "A server error occurred." })),
                )
                    .into_response()
            }
        }
    }
}
