use serde::Serialize;
use serde_json::Value;

use crate::api_client::{ApiResponse, JOB_APPLICATIONS_PATH};
use crate::errors::SubmissionError;
use crate::models::option::option_values;
use crate::models::{ApplicationStatus, JobId, JobPosting, OptionRecord, SessionIdentity};
use crate::submission::SubmissionFlow;
use crate::validation::{rules, Field, Validate, ValidationErrors};

/// Application modal inputs. Name and email are read-only copies of the session.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobApplicationForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub resume_link: String,
    pub qualification: Option<OptionRecord>,
    pub skills: Vec<OptionRecord>,
}

impl JobApplicationForm {
    /// Defaults derived from the signed-in identity; everything else starts blank.
    pub fn for_identity(identity: &SessionIdentity) -> Self {
        Self {
            name: identity.name.clone(),
            email: identity.email.clone(),
            skills: identity.skill_options(),
            ..Self::default()
        }
    }
}

impl Validate for JobApplicationForm {
    fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        errors.check(Field::Phone, rules::phone(&self.phone));
        errors.check(Field::Qualification, rules::qualification(self.qualification.as_ref()));
        errors.check(Field::ResumeLink, rules::resume_link(&self.resume_link));
        errors
    }

    fn can_attempt_submit(&self) -> bool {
        // The button is gated only by the controller's in-flight and applied states.
        true
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct JobApplicationRequest<'a> {
    job_id: &'a JobId,
    name: &'a str,
    email: &'a str,
    phone: &'a str,
    resume_link: &'a str,
    qualification: &'a str,
    skills: Vec<String>,
    status: ApplicationStatus,
}

/// Applying to one posting as one identity.
pub struct JobApplicationFlow {
    job: JobPosting,
    identity: SessionIdentity,
}

impl JobApplicationFlow {
    pub fn new(job: JobPosting, identity: SessionIdentity) -> Self {
        Self { job, identity }
    }

    pub fn job(&self) -> &JobPosting {
        &self.job
    }

    pub fn identity(&self) -> &SessionIdentity {
        &self.identity
    }
}

impl SubmissionFlow for JobApplicationFlow {
    type Form = JobApplicationForm;
    type Receipt = Value;

    fn name(&self) -> &'static str {
        "job application"
    }

    fn endpoint(&self) -> &'static str {
        JOB_APPLICATIONS_PATH
    }

    fn payload(&self, form: &JobApplicationForm) -> Result<Value, serde_json::Error> {
        let qualification = form
            .qualification
            .as_ref()
            .map(|q| q.value.as_str())
            .unwrap_or_default();

        serde_json::to_value(JobApplicationRequest {
            job_id: &self.job.id,
            name: &form.name,
            email: &form.email,
            phone: &form.phone,
            resume_link: &form.resume_link,
            qualification,
            skills: option_values(&form.skills),
            status: ApplicationStatus::Pending,
        })
    }

    fn interpret(&self, response: ApiResponse) -> Result<Value, SubmissionError> {
        if response.status.is_success() {
            Ok(response.body)
        } else {
            Err(SubmissionError::Rejected {
                status: response.status,
            })
        }
    }

    fn reset(&self, _form: &JobApplicationForm) -> Option<JobApplicationForm> {
        Some(JobApplicationForm::for_identity(&self.identity))
    }
}
