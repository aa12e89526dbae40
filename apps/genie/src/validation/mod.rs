//! Form validation.
//!
//! Every form implements [`Validate`]: a full pass that checks every field and returns
//! the complete error map, plus a cheaper `can_attempt_submit` predicate used to enable
//! the submit control. The full pass is always run on a submit attempt, whatever the
//! predicate says.

pub mod rules;

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Name,
    Email,
    Password,
    ConfirmPassword,
    Skills,
    Company,
    Location,
    Position,
    Phone,
    Qualification,
    ResumeLink,
}

impl Field {
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Password => "password",
            Field::ConfirmPassword => "confirmPassword",
            Field::Skills => "skills",
            Field::Company => "company",
            Field::Location => "location",
            Field::Position => "position",
            Field::Phone => "phone",
            Field::Qualification => "qualification",
            Field::ResumeLink => "resumeLink",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-field messages from the latest validation pass. A field with no entry is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<Field, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `message` for `field` when a rule failed.
    pub fn check(&mut self, field: Field, failure: Option<&str>) {
        if let Some(message) = failure {
            self.0.insert(field, message.to_string());
        }
    }

    pub fn is_valid(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

pub trait Validate {
    /// Full validation pass over every field.
    fn validate(&self) -> ValidationErrors;

    /// Lightweight gate for the submit control.
    fn can_attempt_submit(&self) -> bool;
}

/// Visual state of the confirm-password input while the user types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfirmIndicator {
    Match,
    Mismatch,
    Neutral,
}

pub fn confirm_password_indicator(password: &str, confirm: &str) -> ConfirmIndicator {
    if password == confirm {
        ConfirmIndicator::Match
    } else if confirm.is_empty() {
        ConfirmIndicator::Neutral
    } else {
        ConfirmIndicator::Mismatch
    }
}
