mod client;
mod error;
mod http;
mod service;
mod types;

pub use client::{ChatCompletionsClient, DEFAULT_TIMEOUT};
pub use error::Error;
pub use http::{HttpClient, ReqwestHttpClient};
pub use service::{BoxFuture, CompletionService};
pub use types::*;
