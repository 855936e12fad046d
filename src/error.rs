//! Error handling
//!
//! Startup errors (dataset or model load) abort the process from `main`.
//! Everything that reaches this boundary at runtime is either a recoverable
//! user-input problem (400 with an inline message) or a wiring bug (500).

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::logic::chart::ChartError;
use crate::logic::codec::CodecError;
use crate::logic::predict::InvalidFeatureError;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug)]
pub enum AppError {
    /// User-input validation failure; rendered inline, never a crash.
    InvalidFeature(String),

    /// Programmer error surfaced through the boundary.
    InternalError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::InvalidFeature(msg) => (StatusCode::BAD_REQUEST, msg.as_str()),
            AppError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        let body = Json(json!({
            "error": error_message,
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}

impl From<InvalidFeatureError> for AppError {
    fn from(err: InvalidFeatureError) -> Self {
        AppError::InvalidFeature(err.to_string())
    }
}

impl From<ChartError> for AppError {
    fn from(err: ChartError) -> Self {
        AppError::InternalError(err.to_string())
    }
}

impl From<CodecError> for AppError {
    fn from(err: CodecError) -> Self {
        AppError::InternalError(err.to_string())
    }
}
