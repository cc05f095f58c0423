pub(crate) mod chat;
pub(crate) mod document;
pub(crate) mod export;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};

use crate::config::InterviewConfig;
use crate::state::AppState;

pub use chat::{ChatRequest, ChatResponse};
pub use export::{EXPORT_BODY_LIMIT, ExportRequest, MAX_EXPORT_BYTES};

pub fn router(config: InterviewConfig) -> Router {
    let state = AppState::new(config);

    Router::new()
        .route("/chat", post(chat::chat))
        .route("/create_document/{doc_id}", get(document::create_document))
        .route(
            "/export-chat",
            post(export::export_chat).layer(DefaultBodyLimit::max(EXPORT_BODY_LIMIT)),
        )
        .with_state(state)
}
