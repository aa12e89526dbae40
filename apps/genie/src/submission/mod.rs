//! Submission lifecycle shared by the signup forms and the job-application modal.
//!
//! A [`SubmissionFlow`] describes one form: where it posts, how its state is turned
//! into a request body, and what counts as success. [`SubmissionController`] drives any
//! flow through `Idle → InFlight → {Succeeded, Failed}`; the signup and application
//! wrappers add the flow-specific success actions.

pub mod application;
pub mod controller;
pub mod signup;

use serde::Serialize;
use serde_json::Value;

use crate::api_client::ApiResponse;
use crate::errors::SubmissionError;
use crate::validation::{Validate, ValidationErrors};

pub use controller::{settle, EditRejected, FormSnapshot, SubmissionController, TeardownHandle};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    Idle,
    InFlight,
    Failed,
    Succeeded,
}

/// Why a submit attempt was refused before any validation or network call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    InFlight,
    AlreadyApplied,
    Completed,
    Discarded,
}

/// Result of one `submit` call.
#[derive(Debug)]
pub enum SubmitOutcome<R> {
    Rejected(RejectReason),
    Invalid(ValidationErrors),
    Succeeded(R),
    /// The generic error message is stored on the form snapshot.
    Failed,
    /// The view was torn down while the call was in flight; the response was dropped.
    Discarded,
}

impl<R> SubmitOutcome<R> {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmitOutcome::Succeeded(_))
    }

    pub fn label(&self) -> &'static str {
        match self {
            SubmitOutcome::Rejected(RejectReason::InFlight) => "rejected_in_flight",
            SubmitOutcome::Rejected(RejectReason::AlreadyApplied) => "already_applied",
            SubmitOutcome::Rejected(RejectReason::Completed) => "already_submitted",
            SubmitOutcome::Rejected(RejectReason::Discarded) => "form_closed",
            SubmitOutcome::Invalid(_) => "invalid",
            SubmitOutcome::Succeeded(_) => "succeeded",
            SubmitOutcome::Failed => "failed",
            SubmitOutcome::Discarded => "discarded",
        }
    }

    /// Same outcome with the success payload replaced.
    pub fn map<U>(self, f: impl FnOnce(R) -> U) -> SubmitOutcome<U> {
        match self {
            SubmitOutcome::Rejected(reason) => SubmitOutcome::Rejected(reason),
            SubmitOutcome::Invalid(errors) => SubmitOutcome::Invalid(errors),
            SubmitOutcome::Succeeded(receipt) => SubmitOutcome::Succeeded(f(receipt)),
            SubmitOutcome::Failed => SubmitOutcome::Failed,
            SubmitOutcome::Discarded => SubmitOutcome::Discarded,
        }
    }
}

/// One concrete form workflow.
pub trait SubmissionFlow: Send + Sync {
    type Form: Validate + Clone + Send;
    type Receipt: Send;

    /// Short name used in logs.
    fn name(&self) -> &'static str;

    fn endpoint(&self) -> &'static str;

    /// Normalized request body for the create call.
    fn payload(&self, form: &Self::Form) -> Result<Value, serde_json::Error>;

    /// Decides whether the backend response is a success and extracts its payload.
    fn interpret(&self, response: ApiResponse) -> Result<Self::Receipt, SubmissionError>;

    /// Form contents to show after a successful submission. `None` leaves them as is.
    fn reset(&self, _form: &Self::Form) -> Option<Self::Form> {
        None
    }
}
