use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::models::option::OptionRecord;

/// Which kind of account a signup creates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Candidate,
    Recruiter,
}

impl Role {
    pub fn is_recruiter(self) -> bool {
        matches!(self, Role::Recruiter)
    }
}

/// The authenticated user's profile as returned by the signup endpoints.
///
/// Only `name`, `email` and `skills` are read by the forms; every other field the
/// backend sends is kept in `profile` so the session store holds the full payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionIdentity {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(flatten)]
    pub profile: Map<String, Value>,
}

impl SessionIdentity {
    pub fn new(name: impl Into<String>, email: impl Into<String>, skills: Vec<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            skills,
            profile: Map::new(),
        }
    }

    /// Known skills as selectable records, used to pre-fill the application form.
    pub fn skill_options(&self) -> Vec<OptionRecord> {
        self.skills.iter().map(OptionRecord::custom).collect()
    }
}

/// Snapshot of the shared authentication store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub is_authenticated: bool,
    pub is_recruiter: bool,
    pub user_data: Option<SessionIdentity>,
}

impl Session {
    pub fn signed_in(identity: SessionIdentity, role: Role) -> Self {
        Self {
            is_authenticated: true,
            is_recruiter: role.is_recruiter(),
            user_data: Some(identity),
        }
    }
}
