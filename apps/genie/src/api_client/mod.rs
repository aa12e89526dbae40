/// Job-board API client. The single point of entry for all backend calls.
///
/// Forms never talk to the network directly: they hold a `&dyn JobBoardApi` and the
/// binary wires in `HttpJobBoardClient`. No call is retried here; a failed submission
/// goes back to the user.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

#[cfg(test)]
pub(crate) mod testing;

pub const CANDIDATE_SIGNUP_PATH: &str = "/api/v1/candidates/signup";
pub const RECRUITER_SIGNUP_PATH: &str = "/api/v1/recruiters/signup";
pub const JOB_APPLICATIONS_PATH: &str = "/api/v1/applications";
pub const USER_APPLICATIONS_PATH: &str = "/api/v1/applications/me";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Status code plus decoded JSON body. Bodies that are empty or not JSON decode to `Null`.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl ApiResponse {
    pub fn new(status: StatusCode, body: Value) -> Self {
        Self { status, body }
    }

    /// Turns a non-2xx response into `ApiError::Api`, keeping the backend's message.
    pub fn error_for_status(self) -> Result<Self, ApiError> {
        if self.status.is_success() {
            return Ok(self);
        }

        let message = serde_json::from_value::<BackendError>(self.body.clone())
            .map(|e| e.message())
            .unwrap_or_else(|_| self.body.to_string());
        Err(ApiError::Api {
            status: self.status.as_u16(),
            message,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum BackendError {
    Nested { error: BackendErrorBody },
    Flat { message: String },
}

#[derive(Debug, Deserialize)]
struct BackendErrorBody {
    message: String,
}

impl BackendError {
    fn message(self) -> String {
        match self {
            BackendError::Nested { error } => error.message,
            BackendError::Flat { message } => message,
        }
    }
}

/// Generic request/response seam over the job-board backend.
#[async_trait]
pub trait JobBoardApi: Send + Sync {
    async fn post_json(&self, path: &str, body: &Value) -> Result<ApiResponse, ApiError>;

    async fn get_json(&self, path: &str) -> Result<ApiResponse, ApiError>;
}

/// reqwest-backed implementation of [`JobBoardApi`].
#[derive(Clone)]
pub struct HttpJobBoardClient {
    client: Client,
    base_url: String,
}

impl HttpJobBoardClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn read(response: reqwest::Response) -> Result<ApiResponse, ApiError> {
        let status = response.status();
        let text = response.text().await?;
        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).unwrap_or(Value::String(text))
        };
        debug!("backend responded {status}");
        Ok(ApiResponse { status, body })
    }
}

#[async_trait]
impl JobBoardApi for HttpJobBoardClient {
    async fn post_json(&self, path: &str, body: &Value) -> Result<ApiResponse, ApiError> {
        debug!("POST {path}");
        let response = self.client.post(self.url(path)).json(body).send().await?;
        Self::read(response).await
    }

    async fn get_json(&self, path: &str) -> Result<ApiResponse, ApiError> {
        debug!("GET {path}");
        let response = self.client.get(self.url(path)).send().await?;
        Self::read(response).await
    }
}
