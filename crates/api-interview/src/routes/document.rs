use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
};
use kickoff_srs::{DocumentId, DocumentWriter};

use crate::error::{ApiError, Result};
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/create_document/{doc_id}",
    params(("doc_id" = String, Path, description = "Identifier from the document link")),
    responses(
        (status = 200, description = "SRS document", body = Vec<u8>, content_type = "application/vnd.openxmlformats-officedocument.wordprocessingml.document"),
        (status = 404, description = "Unknown document", body = crate::error::ErrorResponse),
        (status = 500, description = "Failed to create document", body = crate::error::ErrorResponse),
    ),
    tag = "interview",
)]
pub async fn create_document(
    State(state): State<AppState>,
    Path(doc_id): Path<String>,
) -> Result<impl IntoResponse> {
    let id: DocumentId = doc_id.parse()?;
    let record = state.documents.get(&id).await?;

    let outline = kickoff_srs::format(&record.content);
    let writer = state.config.writer.clone();
    let bytes = writer.write(&outline).map_err(|e| {
        tracing::error!(document_id = %id, error = %e, "document_write_failed");
        ApiError::DocumentFailed(e.to_string())
    })?;

    Ok((
        [
            (header::CONTENT_TYPE, writer.content_type().to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", writer.file_name()),
            ),
        ],
        bytes,
    ))
}
