use std::future::Future;

pub type Error = Box<dyn std::error::Error + Send + Sync>;

pub trait HttpClient: Send + Sync {
    fn post(
        &self,
        path: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> impl Future<Output = Result<Vec<u8>, Error>> + Send;
}

/// Bearer-authenticated client for an OpenAI-compatible API root such as
/// `https://api.groq.com/openai/v1`.
///
/// Non-success statuses are not turned into errors here: the body is handed
/// back so the caller can decode the provider's error envelope.
#[derive(Clone)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl ReqwestHttpClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url, api_key)
    }

    pub fn with_client(
        client: reqwest::Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        let base_url: String = base_url.into();
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }
}

impl HttpClient for ReqwestHttpClient {
    async fn post(&self, path: &str, body: Vec<u8>, content_type: &str) -> Result<Vec<u8>, Error> {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(body)
            .send()
            .await?;

        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            tracing::warn!(
                http_status = %status.as_u16(),
                url = %url,
                "completion_upstream_error_status"
            );
        }

        Ok(bytes.to_vec())
    }
}
