use tracing::info;

use super::{EditRejected, SubmissionController, SubmissionFlow, SubmitOutcome};
use crate::api_client::JobBoardApi;
use crate::forms::{
    CandidateSignupFlow, CandidateSignupForm, RecruiterSignupFlow, RecruiterSignupForm,
};
use crate::models::{Role, Session, SessionIdentity};
use crate::session::{AuthGate, GateDecision};
use crate::validation::{confirm_password_indicator, ConfirmIndicator};

/// A registration flow: succeeds with the new account's identity.
pub trait SignupFlow: SubmissionFlow<Receipt = SessionIdentity> {
    const ROLE: Role;

    /// `(password, confirm_password)` for the live match indicator.
    fn passwords(form: &Self::Form) -> (&str, &str);
}

impl SignupFlow for CandidateSignupFlow {
    const ROLE: Role = Role::Candidate;

    fn passwords(form: &CandidateSignupForm) -> (&str, &str) {
        (&form.password, &form.confirm_password)
    }
}

impl SignupFlow for RecruiterSignupFlow {
    const ROLE: Role = Role::Recruiter;

    fn passwords(form: &RecruiterSignupForm) -> (&str, &str) {
        (&form.password, &form.confirm_password)
    }
}

/// A signup form behind an [`AuthGate`].
///
/// Leaving the form (an existing session, or a completed signup) tears the view down,
/// so a call still in flight at that moment is dropped.
pub struct SignupForm<F: SignupFlow> {
    controller: SubmissionController<F>,
    gate: AuthGate,
}

impl<F> SignupForm<F>
where
    F: SignupFlow,
    F::Form: Default,
{
    /// Mounts the form. A user who is already signed in is redirected immediately.
    pub fn new(flow: F, gate: AuthGate) -> Self {
        let form = Self {
            controller: SubmissionController::new(flow, F::Form::default()),
            gate,
        };
        form.on_gate(form.gate.evaluate());
        form
    }
}

impl<F: SignupFlow> SignupForm<F> {
    pub fn controller(&self) -> &SubmissionController<F> {
        &self.controller
    }

    pub fn gate(&self) -> &AuthGate {
        &self.gate
    }

    pub fn edit(&self, apply: impl FnOnce(&mut F::Form)) -> Result<(), EditRejected> {
        self.controller.edit(apply)
    }

    pub fn confirm_indicator(&self) -> ConfirmIndicator {
        let form = self.controller.form();
        let (password, confirm) = F::passwords(&form);
        confirm_password_indicator(password, confirm)
    }

    pub fn on_session_changed(&self, session: &Session) -> GateDecision {
        let decision = self.gate.on_session_changed(session);
        self.on_gate(decision);
        decision
    }

    /// Watches the auth store until the user is sent away from the form.
    pub async fn follow_session(&self) -> GateDecision {
        let decision = self.gate.follow().await;
        self.on_gate(decision);
        decision
    }

    pub async fn submit(&self, api: &dyn JobBoardApi) -> SubmitOutcome<SessionIdentity> {
        let outcome = self.controller.submit(api).await;
        if let SubmitOutcome::Succeeded(identity) = &outcome {
            self.gate.complete_signup(identity.clone(), F::ROLE);
            self.on_gate(GateDecision::Redirect);
        }
        outcome
    }

    fn on_gate(&self, decision: GateDecision) {
        if decision == GateDecision::Redirect && !self.controller.is_discarded() {
            info!(form = %self.controller.id(), "leaving {} form", self.controller.flow().name());
            self.controller.teardown_handle().discard();
        }
    }
}
