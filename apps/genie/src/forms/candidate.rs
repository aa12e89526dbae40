use serde::Serialize;
use serde_json::Value;

use crate::api_client::{ApiResponse, CANDIDATE_SIGNUP_PATH};
use crate::errors::SubmissionError;
use crate::models::option::option_values;
use crate::models::{OptionRecord, SessionIdentity};
use crate::submission::SubmissionFlow;
use crate::validation::{rules, Field, Validate, ValidationErrors};

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateSignupForm {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    #[serde(skip_serializing)]
    pub confirm_password: String,
    pub skills: Vec<OptionRecord>,
}

impl Validate for CandidateSignupForm {
    fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        errors.check(Field::Name, rules::candidate_name(&self.name));
        errors.check(Field::Email, rules::email(&self.email));
        errors.check(Field::Password, rules::password(&self.password));
        errors.check(
            Field::ConfirmPassword,
            rules::confirm_password(&self.password, &self.confirm_password),
        );
        errors.check(Field::Skills, rules::skills(&self.skills));
        errors
    }

    fn can_attempt_submit(&self) -> bool {
        super::signup_ready(&self.name, &self.email, &self.password, &self.confirm_password)
    }
}

#[derive(Debug, Serialize)]
struct CandidateSignupRequest<'a> {
    name: &'a str,
    email: &'a str,
    password: &'a str,
    skills: Vec<String>,
}

pub struct CandidateSignupFlow;

impl SubmissionFlow for CandidateSignupFlow {
    type Form = CandidateSignupForm;
    type Receipt = SessionIdentity;

    fn name(&self) -> &'static str {
        "candidate signup"
    }

    fn endpoint(&self) -> &'static str {
        CANDIDATE_SIGNUP_PATH
    }

    fn payload(&self, form: &CandidateSignupForm) -> Result<Value, serde_json::Error> {
        serde_json::to_value(CandidateSignupRequest {
            name: &form.name,
            email: &form.email,
            password: &form.password,
            skills: option_values(&form.skills),
        })
    }

    fn interpret(&self, response: ApiResponse) -> Result<SessionIdentity, SubmissionError> {
        super::created_identity(response)
    }
}
