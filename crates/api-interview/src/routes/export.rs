use axum::{Json, http::header, response::IntoResponse};
use axum_extra::extract::WithRejection;
use serde::Deserialize;

use crate::error::{ApiError, Result};

pub const MAX_EXPORT_BYTES: usize = 10 * 1024 * 1024;

/// Body limit for the export route. Larger than [`MAX_EXPORT_BYTES`] so that
/// oversize exports reach the handler and get a descriptive 413.
pub const EXPORT_BODY_LIMIT: usize = 4 * MAX_EXPORT_BYTES;

const EXPORT_FILE_NAME: &str = "chat_export.html";

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct ExportRequest {
    /// Rendered chat markup.
    pub content: String,
}

#[utoipa::path(
    post,
    path = "/export-chat",
    request_body = ExportRequest,
    responses(
        (status = 200, description = "The content as a downloadable HTML file", body = String, content_type = "text/html"),
        (status = 400, description = "Missing content", body = crate::error::ErrorResponse),
        (status = 413, description = "Content larger than 10 MB", body = crate::error::ErrorResponse),
    ),
    tag = "interview",
)]
pub async fn export_chat(
    WithRejection(Json(payload), _): WithRejection<Json<ExportRequest>, ApiError>,
) -> Result<impl IntoResponse> {
    let size = payload.content.len();
    if size > MAX_EXPORT_BYTES {
        return Err(ApiError::PayloadTooLarge { size });
    }

    tracing::debug!(bytes = size, "chat_exported");

    Ok((
        [
            (header::CONTENT_TYPE, "text/html; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{EXPORT_FILE_NAME}\""),
            ),
        ],
        payload.content,
    ))
}
