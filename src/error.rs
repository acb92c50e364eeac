use axum::{Json, extract::rejection::JsonRejection, http::StatusCode, response::{IntoResponse, Response}};
use serde_json::json;
use thiserror::Error;

use crate::generator::GenerationError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")] InvalidRequest(String),
    #[error("{context}: {source}")] GenerationFailed { context: &'static str, #[source] source: GenerationError },
    #[error("{0}")] NotFound(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::GenerationFailed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidRequest(format!("Invalid request body: {}", rejection.body_text()))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            AppError::GenerationFailed { context, source } => {
                tracing::error!("❌ {}: {}", context, source);
                json!({ "error": context, "details": source.to_string() })
            }
            AppError::InvalidRequest(message) | AppError::NotFound(message) => {
                tracing::warn!("⚠️ {} {}", status.as_u16(), message);
                json!({ "error": message })
            }
        };
        (status, Json(body)).into_response()
    }
}
