use serde::Serialize;
use serde_json::Value;

use crate::api_client::{ApiResponse, RECRUITER_SIGNUP_PATH};
use crate::errors::SubmissionError;
use crate::models::SessionIdentity;
use crate::submission::SubmissionFlow;
use crate::validation::{rules, Field, Validate, ValidationErrors};

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecruiterSignupForm {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    #[serde(skip_serializing)]
    pub confirm_password: String,
    pub company: String,
    pub location: String,
    pub position: String,
}

impl Validate for RecruiterSignupForm {
    fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        errors.check(Field::Name, rules::recruiter_name(&self.name));
        errors.check(Field::Email, rules::email(&self.email));
        errors.check(Field::Password, rules::password(&self.password));
        errors.check(
            Field::ConfirmPassword,
            rules::confirm_password(&self.password, &self.confirm_password),
        );
        errors.check(Field::Company, rules::company(&self.company));
        errors.check(Field::Location, rules::location(&self.location));
        errors.check(Field::Position, rules::position(&self.position));
        errors
    }

    fn can_attempt_submit(&self) -> bool {
        super::signup_ready(&self.name, &self.email, &self.password, &self.confirm_password)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RecruiterSignupRequest<'a> {
    name: &'a str,
    email: &'a str,
    password: &'a str,
    company: &'a str,
    location: &'a str,
    position: &'a str,
    /// New recruiters own no postings yet.
    job_ids: Vec<String>,
}

pub struct RecruiterSignupFlow;

impl SubmissionFlow for RecruiterSignupFlow {
    type Form = RecruiterSignupForm;
    type Receipt = SessionIdentity;

    fn name(&self) -> &'static str {
        "recruiter signup"
    }

    fn endpoint(&self) -> &'static str {
        RECRUITER_SIGNUP_PATH
    }

    fn payload(&self, form: &RecruiterSignupForm) -> Result<Value, serde_json::Error> {
        serde_json::to_value(RecruiterSignupRequest {
            name: &form.name,
            email: &form.email,
            password: &form.password,
            company: &form.company,
            location: &form.location,
            position: &form.position,
            job_ids: Vec::new(),
        })
    }

    fn interpret(&self, response: ApiResponse) -> Result<SessionIdentity, SubmissionError> {
        super::created_identity(response)
    }
}
