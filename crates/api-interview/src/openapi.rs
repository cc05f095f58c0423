use utoipa::OpenApi;

use crate::error::ErrorResponse;
use crate::routes::{ChatRequest, ChatResponse, ExportRequest};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::chat::chat,
        crate::routes::document::create_document,
        crate::routes::export::export_chat,
    ),
    components(schemas(ChatRequest, ChatResponse, ExportRequest, ErrorResponse)),
    tags(
        (name = "interview", description = "Project interview chat and SRS documents")
    )
)]
struct ApiDoc;

pub fn openapi() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}
