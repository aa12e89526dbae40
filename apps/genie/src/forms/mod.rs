//! The three concrete forms: candidate signup, recruiter signup and job application.

pub mod application;
pub mod candidate;
pub mod recruiter;

use reqwest::StatusCode;

use crate::api_client::ApiResponse;
use crate::errors::SubmissionError;
use crate::models::SessionIdentity;

pub use application::{JobApplicationFlow, JobApplicationForm};
pub use candidate::{CandidateSignupFlow, CandidateSignupForm};
pub use recruiter::{RecruiterSignupFlow, RecruiterSignupForm};

/// Submit-button gate shared by both signup forms: everything filled in and the two
/// password inputs agree.
fn signup_ready(name: &str, email: &str, password: &str, confirm: &str) -> bool {
    !name.is_empty()
        && !email.is_empty()
        && !password.is_empty()
        && !confirm.is_empty()
        && password == confirm
}

/// Signup endpoints answer `201 Created` with the new account's profile.
fn created_identity(response: ApiResponse) -> Result<SessionIdentity, SubmissionError> {
    if response.status != StatusCode::CREATED {
        return Err(SubmissionError::Rejected {
            status: response.status,
        });
    }
    Ok(serde_json::from_value(response.body)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_signup_ready_requires_matching_passwords() {
        assert!(signup_ready("Ann", "a@b.com", "x", "x"));
        assert!(!signup_ready("Ann", "a@b.com", "x", "y"));
        assert!(!signup_ready("", "a@b.com", "x", "x"));
        assert!(!signup_ready("Ann", "a@b.com", "", ""));
    }

    #[test]
    fn test_signup_ready_is_weaker_than_validation() {
        // Short name and weak password still enable the button.
        assert!(signup_ready("A", "nope", "a", "a"));
    }

    #[test]
    fn test_created_identity_requires_201() {
        let ok = ApiResponse::new(StatusCode::CREATED, json!({"name": "Ann", "email": "a@b.com"}));
        assert_eq!(created_identity(ok).unwrap().email, "a@b.com");

        let ok_but_not_created =
            ApiResponse::new(StatusCode::OK, json!({"name": "Ann", "email": "a@b.com"}));
        assert!(matches!(
            created_identity(ok_but_not_created),
            Err(SubmissionError::Rejected { status }) if status == StatusCode::OK
        ));
    }

    #[test]
    fn test_created_identity_rejects_malformed_payload() {
        let malformed = ApiResponse::new(StatusCode::CREATED, json!({"id": 3}));
        assert!(matches!(created_identity(malformed), Err(SubmissionError::Payload(_))));
    }
}
