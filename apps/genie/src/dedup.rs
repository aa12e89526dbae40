use std::sync::Mutex;

use tokio::sync::Mutex as AsyncMutex;
use tracing::{debug, warn};

use crate::api_client::{ApiError, JobBoardApi, USER_APPLICATIONS_PATH};
use crate::models::ApplicationRecord;

/// Returns true when `email` appears among the applicant emails of `records`.
///
/// Matches on email alone, not on the (email, job) pair: any prior application by the
/// identity counts for every posting.
pub fn has_applied(email: &str, records: &[ApplicationRecord]) -> bool {
    records.iter().any(|r| r.email == email)
}

/// Lists the current session's applications.
pub async fn fetch_user_applications(
    api: &dyn JobBoardApi,
) -> Result<Vec<ApplicationRecord>, ApiError> {
    let response = api
        .get_json(USER_APPLICATIONS_PATH)
        .await?
        .error_for_status()?;
    Ok(serde_json::from_value(response.body)?)
}

/// Per-view cache of the "already applied" answer.
///
/// At most one fetch is outstanding at a time; concurrent checks wait for it.
#[derive(Default)]
pub struct ApplicationDedupGuard {
    answer: Mutex<Option<bool>>,
    fetching: AsyncMutex<()>,
}

impl ApplicationDedupGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached answer, if a check has completed.
    pub fn cached(&self) -> Option<bool> {
        *self.answer.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Records a successful submission without re-fetching.
    pub fn mark_applied(&self) {
        *self.answer.lock().unwrap_or_else(|e| e.into_inner()) = Some(true);
    }

    /// Answers from the cache, or fetches the session's applications once.
    ///
    /// A failed fetch counts as "not applied" and is not cached.
    pub async fn check(&self, api: &dyn JobBoardApi, email: &str) -> bool {
        if let Some(answer) = self.cached() {
            return answer;
        }
        if email.is_empty() {
            return false;
        }

        let _fetching = self.fetching.lock().await;
        if let Some(answer) = self.cached() {
            return answer;
        }

        match fetch_user_applications(api).await {
            Ok(records) => {
                let applied = has_applied(email, &records);
                debug!(applied, records = records.len(), "application dedup check");
                let mut answer = self.answer.lock().unwrap_or_else(|e| e.into_inner());
                // A submission may have landed while the fetch was outstanding.
                let merged = answer.unwrap_or(false) || applied;
                *answer = Some(merged);
                merged
            }
            Err(e) => {
                warn!("could not load prior applications: {e}");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api_client::testing::{Scripted, ScriptedApi};
    use crate::models::{ApplicationStatus, JobId};
    use reqwest::StatusCode;
    use serde_json::json;

    fn record(job: &str, email: &str) -> ApplicationRecord {
        ApplicationRecord {
            job_id: JobId::from(job),
            email: email.to_string(),
            status: ApplicationStatus::Pending,
            created_at: None,
        }
    }

    #[test]
    fn test_empty_set_is_not_applied() {
        assert!(!has_applied("a@b.com", &[]));
    }

    #[test]
    fn test_membership_by_email() {
        let records = vec![record("j1", "x@y.com"), record("j2", "a@b.com")];
        assert!(has_applied("a@b.com", &records));
        assert!(!has_applied("c@d.com", &records));
    }

    #[test]
    fn test_email_only_key_ignores_job() {
        // Keyed on email alone: an application to j1 blocks every other posting too.
        let records = vec![record("j1", "a@b.com")];
        assert!(has_applied("a@b.com", &records));
    }

    #[tokio::test]
    async fn test_check_fetches_once_and_caches() {
        let api = ScriptedApi::new().on_get(Scripted::Respond(
            StatusCode::OK,
            json!([{"jobId": "j1", "email": "a@b.com", "status": "Pending"}]),
        ));
        let guard = ApplicationDedupGuard::new();

        assert!(guard.check(&api, "a@b.com").await);
        assert!(guard.check(&api, "a@b.com").await);
        assert_eq!(api.get_count(), 1);
    }

    #[tokio::test]
    async fn test_failed_fetch_is_not_cached() {
        let api = ScriptedApi::new()
            .on_get(Scripted::Respond(StatusCode::SERVICE_UNAVAILABLE, json!({"message": "down"})))
            .on_get(Scripted::Respond(StatusCode::OK, json!([])));
        let guard = ApplicationDedupGuard::new();

        assert!(!guard.check(&api, "a@b.com").await);
        assert_eq!(guard.cached(), None);
        assert!(!guard.check(&api, "a@b.com").await);
        assert_eq!(guard.cached(), Some(false));
        assert_eq!(api.get_count(), 2);
    }

    #[tokio::test]
    async fn test_missing_email_skips_fetch() {
        let api = ScriptedApi::new();
        let guard = ApplicationDedupGuard::new();
        assert!(!guard.check(&api, "").await);
        assert_eq!(api.get_count(), 0);
    }

    #[tokio::test]
    async fn test_concurrent_checks_share_one_fetch() {
        let api = ScriptedApi::new().on_get(Scripted::Respond(StatusCode::OK, json!([])));
        let guard = ApplicationDedupGuard::new();

        let (a, b) = tokio::join!(guard.check(&api, "a@b.com"), guard.check(&api, "a@b.com"));

        assert!(!a && !b);
        assert_eq!(api.get_count(), 1);
    }

    #[tokio::test]
    async fn test_mark_applied_overrides_cache() {
        let api = ScriptedApi::new().on_get(Scripted::Respond(StatusCode::OK, json!([])));
        let guard = ApplicationDedupGuard::new();
        assert!(!guard.check(&api, "a@b.com").await);

        guard.mark_applied();
        assert!(guard.check(&api, "a@b.com").await);
        assert_eq!(api.get_count(), 1);
    }
}
