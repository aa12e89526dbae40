use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;

use super::{ApiError, ApiResponse, JobBoardApi};

#[derive(Debug, Clone)]
pub(crate) enum Scripted {
    Respond(StatusCode, Value),
    TransportFailure,
    /// Never resolves; used to hold a call open.
    Hang,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RecordedCall {
    pub method: &'static str,
    pub path: String,
    pub body: Option<Value>,
}

/// In-memory backend double that replays scripted outcomes in order.
#[derive(Default)]
pub(crate) struct ScriptedApi {
    posts: Mutex<VecDeque<Scripted>>,
    gets: Mutex<VecDeque<Scripted>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_post(self, outcome: Scripted) -> Self {
        self.posts.lock().unwrap().push_back(outcome);
        self
    }

    pub fn on_get(self, outcome: Scripted) -> Self {
        self.gets.lock().unwrap().push_back(outcome);
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn post_count(&self) -> usize {
        self.calls().iter().filter(|c| c.method == "POST").count()
    }

    pub fn get_count(&self) -> usize {
        self.calls().iter().filter(|c| c.method == "GET").count()
    }

    async fn play(next: Option<Scripted>) -> Result<ApiResponse, ApiError> {
        // Give other futures on the same task a chance to observe the in-flight state.
        tokio::task::yield_now().await;
        match next {
            Some(Scripted::Respond(status, body)) => Ok(ApiResponse::new(status, body)),
            Some(Scripted::TransportFailure) => Err(transport_error()),
            Some(Scripted::Hang) => std::future::pending().await,
            None => Ok(ApiResponse::new(StatusCode::INTERNAL_SERVER_ERROR, Value::Null)),
        }
    }
}

fn transport_error() -> ApiError {
    let err = reqwest::Client::new()
        .get("not a url")
        .build()
        .unwrap_err();
    ApiError::Http(err)
}

#[async_trait]
impl JobBoardApi for ScriptedApi {
    async fn post_json(&self, path: &str, body: &Value) -> Result<ApiResponse, ApiError> {
        self.calls.lock().unwrap().push(RecordedCall {
            method: "POST",
            path: path.to_string(),
            body: Some(body.clone()),
        });
        let next = self.posts.lock().unwrap().pop_front();
        Self::play(next).await
    }

    async fn get_json(&self, path: &str) -> Result<ApiResponse, ApiError> {
        self.calls.lock().unwrap().push(RecordedCall {
            method: "GET",
            path: path.to_string(),
            body: None,
        });
        let next = self.gets.lock().unwrap().pop_front();
        Self::play(next).await
    }
}
