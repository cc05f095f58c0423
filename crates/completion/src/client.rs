use std::time::Duration;

use crate::error::Error;
use crate::http::HttpClient;
use crate::service::{BoxFuture, CompletionService};
use crate::types::{CompletionRequest, parse_response};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

const CHAT_COMPLETIONS_PATH: &str = "/chat/completions";

pub struct ChatCompletionsClient<C> {
    http: C,
    timeout: Duration,
}

impl<C: HttpClient> ChatCompletionsClient<C> {
    pub fn new(http: C) -> Self {
        Self {
            http,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sends one non-streaming chat completion and returns the text of the
    /// first choice. The whole exchange is bounded by the configured timeout.
    pub async fn chat_completion(&self, request: &CompletionRequest) -> Result<String, Error> {
        let body = serde_json::to_vec(request)?;

        let bytes = tokio::time::timeout(
            self.timeout,
            self.http
                .post(CHAT_COMPLETIONS_PATH, body, "application/json"),
        )
        .await
        .map_err(|_| Error::Timeout(self.timeout))?
        .map_err(Error::Http)?;

        parse_response(&bytes)
    }
}

impl<C: HttpClient> CompletionService for ChatCompletionsClient<C> {
    fn complete<'a>(
        &'a self,
        request: &'a CompletionRequest,
    ) -> BoxFuture<'a, Result<String, Error>> {
        Box::pin(self.chat_completion(request))
    }
}
