mod config;
mod env;
mod error;
mod openapi;
mod routes;
mod state;
mod turn;

pub use config::InterviewConfig;
pub use env::{CompletionEnv, filter_empty, string_to_u64};
pub use error::{ApiError, ErrorResponse};
pub use openapi::openapi;
pub use routes::{
    ChatRequest, ChatResponse, EXPORT_BODY_LIMIT, ExportRequest, MAX_EXPORT_BYTES, router,
};
