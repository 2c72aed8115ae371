use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Unknown tier: {0}")]
    UnknownTier(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::UnknownTier(_) => StatusCode::NOT_FOUND,
        };
        tracing::debug!("Request failed: {}", self);
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
