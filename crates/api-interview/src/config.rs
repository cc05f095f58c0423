use std::sync::Arc;
use std::time::Duration;

use kickoff_completion::{ChatCompletionsClient, CompletionService, ReqwestHttpClient};
use kickoff_conversation::DEFAULT_MAX_SESSIONS;
use kickoff_srs::{DocumentWriter, DocxWriter};

use crate::env::CompletionEnv;

const DEFAULT_MODEL: &str = "llama3-8b-8192";
const DEFAULT_PUBLIC_BASE_URL: &str = "http://localhost:3001";

#[derive(Clone)]
pub struct InterviewConfig {
    pub completion: Arc<dyn CompletionService>,
    pub writer: Arc<dyn DocumentWriter>,
    pub model: String,
    pub public_base_url: String,
    pub max_sessions: usize,
}

impl InterviewConfig {
    pub fn new(completion: Arc<dyn CompletionService>) -> Self {
        Self {
            completion,
            writer: Arc::new(DocxWriter),
            model: DEFAULT_MODEL.to_string(),
            public_base_url: DEFAULT_PUBLIC_BASE_URL.to_string(),
            max_sessions: DEFAULT_MAX_SESSIONS,
        }
    }

    pub fn from_env(env: &CompletionEnv) -> Self {
        let http = ReqwestHttpClient::new(&env.groq_api_base, &env.groq_api_key);
        let client = ChatCompletionsClient::new(http)
            .with_timeout(Duration::from_secs(env.completion_timeout_secs));

        Self::new(Arc::new(client)).with_model(&env.completion_model)
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_writer(mut self, writer: Arc<dyn DocumentWriter>) -> Self {
        self.writer = writer;
        self
    }

    pub fn with_max_sessions(mut self, max_sessions: usize) -> Self {
        self.max_sessions = max_sessions;
        self
    }

    pub fn with_public_base_url(mut self, url: impl Into<String>) -> Self {
        self.public_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub(crate) fn document_link(&self, id: impl std::fmt::Display) -> String {
        format!("{}/create_document/{}", self.public_base_url, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_env_uses_configured_model() {
        let env = CompletionEnv {
            groq_api_key: "key".into(),
            groq_api_base: "https://example.invalid/v1".into(),
            completion_model: "other-model".into(),
            completion_timeout_secs: 5,
        };
        let config = InterviewConfig::from_env(&env);
        assert_eq!(config.model, "other-model");
        assert_eq!(config.public_base_url, DEFAULT_PUBLIC_BASE_URL);
    }

    #[test]
    fn document_link_has_no_double_slash() {
        let env = CompletionEnv {
            groq_api_key: "key".into(),
            groq_api_base: "https://example.invalid/v1".into(),
            completion_model: DEFAULT_MODEL.into(),
            completion_timeout_secs: 60,
        };
        let config = InterviewConfig::from_env(&env).with_public_base_url("https://kickoff.example/");
        assert_eq!(
            config.document_link("abc"),
            "https://kickoff.example/create_document/abc"
        );
    }
}
