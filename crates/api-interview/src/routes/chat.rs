use axum::{Json, extract::State};
use axum_extra::extract::WithRejection;
use kickoff_conversation::{Language, SessionId};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, Result};
use crate::state::AppState;
use crate::turn::run_turn;

#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub message: String,
    /// `en` (default) or `ja`; `jp` is accepted as an alias.
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "en")]
    pub language: Option<Language>,
    /// Conversation to continue: 1 to 64 ASCII letters, digits, `-` or `_`.
    /// Requests without one share the `default` session.
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub session_id: Option<SessionId>,
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub response: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_error: Option<String>,
}

#[utoipa::path(
    post,
    path = "/chat",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Assistant reply, with a document link when one was requested", body = ChatResponse),
        (status = 400, description = "Missing or empty message, or malformed session id", body = crate::error::ErrorResponse),
        (status = 500, description = "Completion service failure", body = crate::error::ErrorResponse),
        (status = 503, description = "Session limit reached", body = crate::error::ErrorResponse),
    ),
    tag = "interview",
)]
pub async fn chat(
    State(state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<ChatRequest>, ApiError>,
) -> Result<Json<ChatResponse>> {
    if payload.message.trim().is_empty() {
        return Err(ApiError::InvalidInput("message must not be empty".into()));
    }

    let session_id = payload.session_id.unwrap_or_default();
    let language = payload.language.unwrap_or_default();

    let outcome = run_turn(&state, &session_id, payload.message, language).await?;

    Ok(Json(ChatResponse {
        response: outcome.reply,
        document_id: outcome.document.map(|id| id.to_string()),
        document_error: outcome
            .document_error
            .map(|_| "Failed to generate SRS document".to_string()),
    }))
}
