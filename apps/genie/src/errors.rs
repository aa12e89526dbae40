use reqwest::StatusCode;
use thiserror::Error;

use crate::api_client::ApiError;

/// The only submission failure text users ever see.
pub const GENERIC_SUBMIT_ERROR: &str = "Something went wrong!";

/// Why a submission did not succeed.
/// Every variant collapses to [`GENERIC_SUBMIT_ERROR`] at the form layer; the cause is
/// only logged.
#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("Backend rejected submission (status {status})")]
    Rejected { status: StatusCode },

    #[error("Transport error: {0}")]
    Transport(#[from] ApiError),

    #[error("Payload error: {0}")]
    Payload(#[from] serde_json::Error),
}

impl SubmissionError {
    /// Logs the underlying cause and returns the user-facing message.
    pub fn user_message(&self, flow: &str) -> &'static str {
        match self {
            SubmissionError::Rejected { status } => {
                tracing::error!("{flow} submission rejected: status {status}");
            }
            SubmissionError::Transport(e) => {
                tracing::error!("{flow} submission transport error: {e}");
            }
            SubmissionError::Payload(e) => {
                tracing::error!("{flow} submission payload error: {e}");
            }
        }
        GENERIC_SUBMIT_ERROR
    }
}
