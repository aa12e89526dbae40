use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Job posting identifier. The backend sends either strings or integers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct JobId(pub String);

impl<'de> Deserialize<'de> for JobId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(i64),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(s) => JobId(s),
            Raw::Number(n) => JobId(n.to_string()),
        })
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for JobId {
    fn from(value: &str) -> Self {
        JobId(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApplicationStatus {
    Pending,
    Accepted,
    Rejected,
    #[serde(other)]
    Other,
}

/// A prior application as listed by the backend for the current session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRecord {
    pub job_id: JobId,
    #[serde(alias = "applicantEmail")]
    pub email: String,
    pub status: ApplicationStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// The posting a candidate is applying to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: JobId,
    pub position: String,
    pub company: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub experience: Option<u32>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_accepts_numeric_job_id() {
        let record: ApplicationRecord = serde_json::from_value(json!({
            "jobId": 42,
            "email": "a@b.com",
            "status": "Pending"
        }))
        .unwrap();
        assert_eq!(record.job_id, JobId("42".into()));
        assert_eq!(record.status, ApplicationStatus::Pending);
        assert!(record.created_at.is_none());
    }

    #[test]
    fn test_record_accepts_applicant_email_alias_and_unknown_status() {
        let record: ApplicationRecord = serde_json::from_value(json!({
            "jobId": "j-1",
            "applicantEmail": "a@b.com",
            "status": "Shortlisted",
            "createdAt": "2026-03-01T10:00:00Z"
        }))
        .unwrap();
        assert_eq!(record.email, "a@b.com");
        assert_eq!(record.status, ApplicationStatus::Other);
        assert!(record.created_at.is_some());
    }

    #[test]
    fn test_pending_serializes_as_bare_word() {
        assert_eq!(serde_json::to_value(ApplicationStatus::Pending).unwrap(), json!("Pending"));
    }
}
