use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, info};
use uuid::Uuid;

use super::{RejectReason, SubmissionFlow, SubmissionStatus, SubmitOutcome};
use crate::api_client::JobBoardApi;
use crate::errors::SubmissionError;
use crate::validation::{Validate, ValidationErrors};

#[derive(Debug, Error, PartialEq, Eq)]
#[error("form cannot be edited while a submission is in flight")]
pub struct EditRejected;

/// Everything a view renders for one form instance.
#[derive(Debug, Clone, Serialize)]
pub struct FormSnapshot<T> {
    pub status: SubmissionStatus,
    pub form: T,
    pub errors: ValidationErrors,
    /// Flow-wide submission error, shown below the submit control.
    pub error: Option<String>,
    /// Set when a prior application exists; blocks every further submit.
    pub locked: bool,
}

impl<T> FormSnapshot<T> {
    pub fn new(form: T) -> Self {
        Self {
            status: SubmissionStatus::Idle,
            form,
            errors: ValidationErrors::new(),
            error: None,
            locked: false,
        }
    }

    fn rejection(&self, discarded: bool) -> Option<RejectReason> {
        if discarded {
            Some(RejectReason::Discarded)
        } else if self.status == SubmissionStatus::InFlight {
            Some(RejectReason::InFlight)
        } else if self.status == SubmissionStatus::Succeeded {
            Some(RejectReason::Completed)
        } else if self.locked {
            Some(RejectReason::AlreadyApplied)
        } else {
            None
        }
    }
}

/// Computes the state that follows a completed remote call.
///
/// Applied in one assignment once the call resolves so the view never observes a
/// half-updated form.
pub fn settle<F: SubmissionFlow>(
    flow: &F,
    current: &FormSnapshot<F::Form>,
    result: Result<F::Receipt, SubmissionError>,
) -> (FormSnapshot<F::Form>, SubmitOutcome<F::Receipt>) {
    match result {
        Ok(receipt) => {
            let form = flow
                .reset(&current.form)
                .unwrap_or_else(|| current.form.clone());
            let next = FormSnapshot {
                status: SubmissionStatus::Succeeded,
                form,
                errors: current.errors.clone(),
                error: None,
                locked: current.locked,
            };
            (next, SubmitOutcome::Succeeded(receipt))
        }
        Err(err) => {
            let message = err.user_message(flow.name());
            let next = FormSnapshot {
                status: SubmissionStatus::Failed,
                form: current.form.clone(),
                errors: current.errors.clone(),
                error: Some(message.to_string()),
                locked: current.locked,
            };
            (next, SubmitOutcome::Failed)
        }
    }
}

/// Signals that the owning view is gone. Any call still in flight is dropped.
#[derive(Clone)]
pub struct TeardownHandle(Arc<watch::Sender<bool>>);

impl TeardownHandle {
    pub fn discard(&self) {
        self.0.send_replace(true);
    }
}

pub struct SubmissionController<F: SubmissionFlow> {
    id: Uuid,
    flow: F,
    state: Mutex<FormSnapshot<F::Form>>,
    teardown: Arc<watch::Sender<bool>>,
}

impl<F: SubmissionFlow> SubmissionController<F> {
    pub fn new(flow: F, form: F::Form) -> Self {
        let (teardown, _) = watch::channel(false);
        Self {
            id: Uuid::new_v4(),
            flow,
            state: Mutex::new(FormSnapshot::new(form)),
            teardown: Arc::new(teardown),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn flow(&self) -> &F {
        &self.flow
    }

    fn state(&self) -> MutexGuard<'_, FormSnapshot<F::Form>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn snapshot(&self) -> FormSnapshot<F::Form> {
        self.state().clone()
    }

    pub fn status(&self) -> SubmissionStatus {
        self.state().status
    }

    pub fn form(&self) -> F::Form {
        self.state().form.clone()
    }

    pub fn errors(&self) -> ValidationErrors {
        self.state().errors.clone()
    }

    pub fn error_message(&self) -> Option<String> {
        self.state().error.clone()
    }

    pub fn is_locked(&self) -> bool {
        self.state().locked
    }

    /// Blocks further submissions for the lifetime of this instance.
    pub fn lock(&self) {
        self.state().locked = true;
    }

    pub fn is_discarded(&self) -> bool {
        *self.teardown.borrow()
    }

    pub fn teardown_handle(&self) -> TeardownHandle {
        TeardownHandle(Arc::clone(&self.teardown))
    }

    /// Applies a user edit. Refused while a submission is in flight.
    pub fn edit(&self, apply: impl FnOnce(&mut F::Form)) -> Result<(), EditRejected> {
        let mut state = self.state();
        if state.status == SubmissionStatus::InFlight {
            return Err(EditRejected);
        }
        apply(&mut state.form);
        Ok(())
    }

    /// Why a submit attempt would be refused right now, if it would.
    pub fn rejection(&self) -> Option<RejectReason> {
        self.state().rejection(self.is_discarded())
    }

    /// Whether the submit control is enabled.
    pub fn submit_enabled(&self) -> bool {
        let state = self.state();
        state.rejection(self.is_discarded()).is_none() && state.form.can_attempt_submit()
    }

    pub async fn submit(&self, api: &dyn JobBoardApi) -> SubmitOutcome<F::Receipt> {
        let payload = {
            let mut state = self.state();
            if let Some(reason) = state.rejection(self.is_discarded()) {
                debug!(form = %self.id, "{} submit rejected: {reason:?}", self.flow.name());
                return SubmitOutcome::Rejected(reason);
            }

            state.error = None;
            state.errors = state.form.validate();
            if !state.errors.is_valid() {
                debug!(
                    form = %self.id,
                    "{} validation failed on {} field(s)",
                    self.flow.name(),
                    state.errors.len()
                );
                return SubmitOutcome::Invalid(state.errors.clone());
            }

            match self.flow.payload(&state.form) {
                Ok(payload) => {
                    state.status = SubmissionStatus::InFlight;
                    payload
                }
                Err(e) => {
                    let (next, outcome) = settle(&self.flow, &state, Err(e.into()));
                    *state = next;
                    return outcome;
                }
            }
        };

        info!(form = %self.id, "{} submission in flight", self.flow.name());

        let mut teardown = self.teardown.subscribe();
        let response = tokio::select! {
            response = api.post_json(self.flow.endpoint(), &payload) => response,
            _ = teardown.wait_for(|discarded| *discarded) => {
                self.state().status = SubmissionStatus::Idle;
                info!(form = %self.id, "{} view discarded, response ignored", self.flow.name());
                return SubmitOutcome::Discarded;
            }
        };

        let result = response
            .map_err(SubmissionError::from)
            .and_then(|response| self.flow.interpret(response));

        let mut state = self.state();
        let (next, outcome) = settle(&self.flow, &state, result);
        *state = next;
        info!(form = %self.id, "{} submission settled: {:?}", self.flow.name(), state.status);
        outcome
    }
}
