use serde_json::Value;
use tracing::info;

use super::{EditRejected, RejectReason, SubmissionController, SubmitOutcome};
use crate::api_client::JobBoardApi;
use crate::dedup::ApplicationDedupGuard;
use crate::forms::{JobApplicationFlow, JobApplicationForm};
use crate::models::{JobPosting, SessionIdentity};

pub const APPLY_LABEL: &str = "Apply";
pub const ALREADY_APPLIED_LABEL: &str = "Already Applied";

/// The job-application modal for one posting.
///
/// Once the identity is known to have applied (from the backend, or from a submission
/// made here) the modal stays locked for the rest of its life.
pub struct JobApplicationModal {
    controller: SubmissionController<JobApplicationFlow>,
    dedup: ApplicationDedupGuard,
}

impl JobApplicationModal {
    pub fn new(job: JobPosting, identity: SessionIdentity) -> Self {
        let form = JobApplicationForm::for_identity(&identity);
        Self {
            controller: SubmissionController::new(JobApplicationFlow::new(job, identity), form),
            dedup: ApplicationDedupGuard::new(),
        }
    }

    pub fn controller(&self) -> &SubmissionController<JobApplicationFlow> {
        &self.controller
    }

    /// Runs the prior-application check the modal performs when it opens.
    pub async fn open(&self, api: &dyn JobBoardApi) -> bool {
        self.resolve_dedup(api).await
    }

    pub fn has_applied(&self) -> bool {
        self.controller.is_locked()
    }

    pub fn button_label(&self) -> &'static str {
        if self.has_applied() {
            ALREADY_APPLIED_LABEL
        } else {
            APPLY_LABEL
        }
    }

    pub fn submit_enabled(&self) -> bool {
        self.controller.submit_enabled()
    }

    pub fn edit(&self, apply: impl FnOnce(&mut JobApplicationForm)) -> Result<(), EditRejected> {
        self.controller.edit(apply)
    }

    pub async fn submit(&self, api: &dyn JobBoardApi) -> SubmitOutcome<Value> {
        if let Some(reason) = self.controller.rejection() {
            return SubmitOutcome::Rejected(reason);
        }

        if self.resolve_dedup(api).await {
            info!(
                job = %self.controller.flow().job().id,
                "already applied for this job"
            );
            return SubmitOutcome::Rejected(RejectReason::AlreadyApplied);
        }

        let outcome = self.controller.submit(api).await;
        if outcome.is_success() {
            self.dedup.mark_applied();
            self.controller.lock();
        }
        outcome
    }

    async fn resolve_dedup(&self, api: &dyn JobBoardApi) -> bool {
        let applied = self
            .dedup
            .check(api, &self.controller.flow().identity().email)
            .await;
        if applied {
            self.controller.lock();
        }
        applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api_client::testing::{Scripted, ScriptedApi};
    use crate::api_client::JOB_APPLICATIONS_PATH;
    use crate::errors::GENERIC_SUBMIT_ERROR;
    use crate::models::OptionRecord;
    use crate::submission::SubmissionStatus;
    use crate::validation::{rules, Field};
    use reqwest::StatusCode;
    use serde_json::json;

    fn identity() -> SessionIdentity {
        SessionIdentity::new("Ann Lee", "a@b.com", vec!["Go".into()])
    }

    fn job(id: &str) -> JobPosting {
        serde_json::from_value(json!({
            "id": id,
            "position": "Backend Engineer",
            "company": "Acme",
            "location": "Pune",
            "experience": 2,
            "skills": ["Go", "SQL"]
        }))
        .unwrap()
    }

    fn fill(form: &mut JobApplicationForm) {
        form.phone = "9876543210".into();
        form.resume_link = "https://drive.google.com/file/3232va3".into();
        form.qualification = Some(OptionRecord::new("btech", "B.Tech"));
    }

    fn no_prior_applications() -> ScriptedApi {
        ScriptedApi::new().on_get(Scripted::Respond(StatusCode::OK, json!([])))
    }

    #[tokio::test]
    async fn test_successful_application_locks_and_resets() {
        let api = no_prior_applications().on_post(Scripted::Respond(
            StatusCode::CREATED,
            json!({"id": "app-1", "status": "Pending"}),
        ));
        let modal = JobApplicationModal::new(job("job-7"), identity());
        assert!(!modal.open(&api).await);
        assert_eq!(modal.button_label(), APPLY_LABEL);
        modal.edit(fill).unwrap();

        let outcome = modal.submit(&api).await;

        assert!(matches!(outcome, SubmitOutcome::Succeeded(ref body) if body["id"] == "app-1"));
        let post = &api.calls()[1];
        assert_eq!(post.path, JOB_APPLICATIONS_PATH);
        let body = post.body.as_ref().unwrap();
        assert_eq!(body["jobId"], "job-7");
        assert_eq!(body["status"], "Pending");
        assert_eq!(body["qualification"], "btech");

        assert_eq!(modal.button_label(), ALREADY_APPLIED_LABEL);
        assert!(!modal.submit_enabled());
        let form = modal.controller().form();
        assert_eq!(form, JobApplicationForm::for_identity(&identity()));
    }

    #[tokio::test]
    async fn test_second_apply_in_same_view_makes_no_call() {
        let api =
            no_prior_applications().on_post(Scripted::Respond(StatusCode::CREATED, json!({})));
        let modal = JobApplicationModal::new(job("job-7"), identity());
        modal.edit(fill).unwrap();
        assert!(modal.submit(&api).await.is_success());

        modal.edit(fill).unwrap();
        assert!(matches!(modal.submit(&api).await, SubmitOutcome::Rejected(_)));
        assert_eq!(api.post_count(), 1);
        assert_eq!(api.get_count(), 1);
    }

    #[tokio::test]
    async fn test_rapid_double_submit_issues_one_lookup_and_one_post() {
        let api = no_prior_applications()
            .on_post(Scripted::Respond(StatusCode::CREATED, json!({"id": "app-1"})));
        let modal = JobApplicationModal::new(job("job-7"), identity());
        modal.edit(fill).unwrap();

        let (a, b) = tokio::join!(modal.submit(&api), modal.submit(&api));

        assert!(a.is_success());
        assert!(matches!(b, SubmitOutcome::Rejected(RejectReason::InFlight)));
        assert_eq!(api.get_count(), 1);
        assert_eq!(api.post_count(), 1);
        assert_eq!(modal.button_label(), ALREADY_APPLIED_LABEL);
    }

    #[tokio::test]
    async fn test_open_racing_submit_shares_the_lookup() {
        let api = no_prior_applications()
            .on_post(Scripted::Respond(StatusCode::CREATED, json!({"id": "app-1"})));
        let modal = JobApplicationModal::new(job("job-7"), identity());
        modal.edit(fill).unwrap();

        let (opened, outcome) = tokio::join!(modal.open(&api), modal.submit(&api));

        assert!(!opened);
        assert!(outcome.is_success());
        assert_eq!(api.get_count(), 1);
        assert_eq!(api.post_count(), 1);
    }

    #[tokio::test]
    async fn test_prior_application_blocks_without_post() {
        let api = ScriptedApi::new().on_get(Scripted::Respond(
            StatusCode::OK,
            json!([{"jobId": "job-7", "email": "a@b.com", "status": "Pending"}]),
        ));
        let modal = JobApplicationModal::new(job("job-7"), identity());

        assert!(modal.open(&api).await);
        modal.edit(fill).unwrap();

        assert!(matches!(
            modal.submit(&api).await,
            SubmitOutcome::Rejected(RejectReason::AlreadyApplied)
        ));
        assert_eq!(api.post_count(), 0);
        assert_eq!(modal.button_label(), ALREADY_APPLIED_LABEL);
    }

    #[tokio::test]
    async fn test_application_to_other_job_still_blocks() {
        // Dedup is keyed on email only; a record for job-1 locks job-7 as well.
        let api = ScriptedApi::new().on_get(Scripted::Respond(
            StatusCode::OK,
            json!([{"jobId": "job-1", "email": "a@b.com", "status": "Accepted"}]),
        ));
        let modal = JobApplicationModal::new(job("job-7"), identity());
        modal.edit(fill).unwrap();

        assert!(matches!(
            modal.submit(&api).await,
            SubmitOutcome::Rejected(RejectReason::AlreadyApplied)
        ));
        assert_eq!(api.post_count(), 0);
    }

    #[tokio::test]
    async fn test_bad_phone_rejected_before_any_post() {
        let api = no_prior_applications();
        let modal = JobApplicationModal::new(job("job-7"), identity());
        modal
            .edit(|f| {
                fill(f);
                f.phone = "12345".into();
            })
            .unwrap();

        match modal.submit(&api).await {
            SubmitOutcome::Invalid(errors) => {
                assert_eq!(errors.get(Field::Phone), Some(rules::PHONE_INVALID));
            }
            other => panic!("expected invalid, got {other:?}"),
        }
        assert_eq!(api.post_count(), 0);
        assert_eq!(modal.controller().status(), SubmissionStatus::Idle);
    }

    #[tokio::test]
    async fn test_failure_then_corrected_resubmit() {
        let api = no_prior_applications()
            .on_post(Scripted::Respond(StatusCode::INTERNAL_SERVER_ERROR, json!({})))
            .on_post(Scripted::Respond(StatusCode::OK, json!({"id": "app-2"})));
        let modal = JobApplicationModal::new(job("job-7"), identity());
        modal.edit(fill).unwrap();

        assert!(matches!(modal.submit(&api).await, SubmitOutcome::Failed));
        let snap = modal.controller().snapshot();
        assert_eq!(snap.error.as_deref(), Some(GENERIC_SUBMIT_ERROR));
        assert_eq!(snap.form.phone, "9876543210");
        assert_eq!(modal.button_label(), APPLY_LABEL);
        assert!(modal.submit_enabled());

        modal.edit(|f| f.phone = "9123456780".into()).unwrap();
        assert!(modal.submit(&api).await.is_success());
        assert_eq!(api.post_count(), 2);
    }

    #[tokio::test]
    async fn test_unreachable_dedup_check_does_not_block() {
        let api = ScriptedApi::new()
            .on_get(Scripted::TransportFailure)
            .on_get(Scripted::Respond(StatusCode::OK, json!([])))
            .on_post(Scripted::Respond(StatusCode::CREATED, json!({})));
        let modal = JobApplicationModal::new(job("job-7"), identity());

        assert!(!modal.open(&api).await);
        modal.edit(fill).unwrap();
        assert!(modal.submit(&api).await.is_success());
        assert_eq!(api.get_count(), 2);
    }
}
