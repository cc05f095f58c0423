use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use axum::{
    Router,
    body::Body,
    http::{Request, Response, StatusCode},
};
use kickoff_completion::{BoxFuture, CompletionRequest, CompletionService, Error};
use tower::ServiceExt;

use api_interview::InterviewConfig;

pub const BASE_URL: &str = "http://kickoff.test";

enum Step {
    Answer(Result<String, Error>),
    Hang,
}

/// Replies from a script, in order, and records every request it sees.
#[derive(Default)]
pub struct ScriptedCompletion {
    script: Mutex<VecDeque<Step>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedCompletion {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn reply(&self, text: &str) -> &Self {
        self.push(Step::Answer(Ok(text.to_string())))
    }

    pub fn fail(&self) -> &Self {
        self.push(Step::Answer(Err(Error::Api {
            kind: "server_error".to_string(),
            message: "model overloaded".to_string(),
        })))
    }

    /// The next call never completes.
    pub fn hang(&self) -> &Self {
        self.push(Step::Hang)
    }

    fn push(&self, step: Step) -> &Self {
        self.script.lock().unwrap().push_back(step);
        self
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> CompletionRequest {
        self.requests().pop().expect("no completion request recorded")
    }
}

impl CompletionService for ScriptedCompletion {
    fn complete<'a>(
        &'a self,
        request: &'a CompletionRequest,
    ) -> BoxFuture<'a, Result<String, Error>> {
        self.requests.lock().unwrap().push(request.clone());
        let next = self.script.lock().unwrap().pop_front();
        match next {
            Some(Step::Answer(answer)) => Box::pin(async move { answer }),
            Some(Step::Hang) => Box::pin(std::future::pending()),
            None => Box::pin(async { Err(Error::EmptyCompletion) }),
        }
    }
}

pub fn config(completion: Arc<ScriptedCompletion>) -> InterviewConfig {
    InterviewConfig::new(completion)
        .with_model("test-model")
        .with_public_base_url(BASE_URL)
}

pub fn app(completion: Arc<ScriptedCompletion>) -> Router {
    api_interview::router(config(completion))
}

pub fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub async fn chat(app: &Router, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
    let response = send(app, post_json("/chat", body)).await;
    let status = response.status();
    (status, body_json(response).await)
}
