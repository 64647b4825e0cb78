use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::board::RenderError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid layout: {0}")]
    InvalidLayout(String),

    #[error("Missing background: {0}")]
    MissingBackground(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<RenderError> for AppError {
    fn from(e: RenderError) -> Self {
        match e {
            RenderError::InvalidLayout(msg) => AppError::InvalidLayout(msg),
            e @ RenderError::MissingBackground { .. } => AppError::MissingBackground(e.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::InvalidLayout(msg) => {
                (StatusCode::BAD_REQUEST, "INVALID_LAYOUT", msg.clone())
            }
            AppError::MissingBackground(msg) => {
                tracing::error!("Render failed: {msg}");
                (StatusCode::NOT_FOUND, "MISSING_BACKGROUND", msg.clone())
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
