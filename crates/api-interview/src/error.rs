use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    InvalidInput(String),

    #[error("Document not found")]
    NotFound,

    #[error("Chat export is too large ({:.2} MB). Maximum size is 10 MB.", megabytes(.size))]
    PayloadTooLarge { size: usize },

    #[error("Failed to create document: {0}")]
    DocumentFailed(String),

    #[error("Too many active sessions")]
    Unavailable(String),

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

fn megabytes(bytes: &usize) -> f64 {
    *bytes as f64 / (1024.0 * 1024.0)
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidInput(rejection.body_text())
    }
}

impl From<kickoff_srs::DocumentNotFound> for ApiError {
    fn from(_: kickoff_srs::DocumentNotFound) -> Self {
        Self::NotFound
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let internal_message = "Internal server error".to_string();

        let (status, message) = match &self {
            Self::InvalidInput(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            Self::NotFound => (StatusCode::NOT_FOUND, self.to_string()),
            Self::PayloadTooLarge { .. } => (StatusCode::PAYLOAD_TOO_LARGE, self.to_string()),
            Self::DocumentFailed(message) => {
                tracing::error!(error = %message, "document_error");
                sentry::capture_message(message, sentry::Level::Error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to create document".to_string(),
                )
            }
            Self::Unavailable(message) => {
                tracing::warn!(reason = %message, "service_unavailable");
                (StatusCode::SERVICE_UNAVAILABLE, self.to_string())
            }
            Self::Upstream(message) => {
                tracing::error!(error = %message, "upstream_error");
                sentry::capture_message(message, sentry::Level::Error);
                (StatusCode::INTERNAL_SERVER_ERROR, internal_message)
            }
            Self::Internal(message) => {
                tracing::error!(error = %message, "internal_error");
                sentry::capture_message(message, sentry::Level::Error);
                (StatusCode::INTERNAL_SERVER_ERROR, internal_message)
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
