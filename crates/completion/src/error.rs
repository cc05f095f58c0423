use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("HTTP client error: {0}")]
    Http(Box<dyn std::error::Error + Send + Sync>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("completion API error: {kind} - {message}")]
    Api { kind: String, message: String },

    #[error("completion returned no content")]
    EmptyCompletion,

    #[error("completion timed out after {0:?}")]
    Timeout(Duration),
}
