use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use super::{AuthStore, Navigator};
use crate::models::{Role, Session, SessionIdentity};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GateDecision {
    Stay,
    Redirect,
}

/// Keeps signed-in users off the entry forms and finishes a signup by committing the
/// new session. Each gate navigates away at most once.
pub struct AuthGate {
    auth: Arc<dyn AuthStore>,
    navigator: Arc<dyn Navigator>,
    landing_path: String,
    redirected: AtomicBool,
}

impl AuthGate {
    pub fn new(
        auth: Arc<dyn AuthStore>,
        navigator: Arc<dyn Navigator>,
        landing_path: impl Into<String>,
    ) -> Self {
        Self {
            auth,
            navigator,
            landing_path: landing_path.into(),
            redirected: AtomicBool::new(false),
        }
    }

    pub fn landing_path(&self) -> &str {
        &self.landing_path
    }

    pub fn has_redirected(&self) -> bool {
        self.redirected.load(Ordering::SeqCst)
    }

    /// Checks the store's current session.
    pub fn evaluate(&self) -> GateDecision {
        self.on_session_changed(&self.auth.session())
    }

    pub fn on_session_changed(&self, session: &Session) -> GateDecision {
        if !session.is_authenticated {
            return GateDecision::Stay;
        }
        self.leave();
        GateDecision::Redirect
    }

    /// Re-evaluates on every store change until the user is redirected or the store
    /// goes away.
    pub async fn follow(&self) -> GateDecision {
        let mut rx = self.auth.subscribe();
        loop {
            let session = rx.borrow_and_update().clone();
            if self.on_session_changed(&session) == GateDecision::Redirect {
                return GateDecision::Redirect;
            }
            if rx.changed().await.is_err() {
                return GateDecision::Stay;
            }
        }
    }

    /// Commits the identity returned by a signup and leaves the form.
    pub fn complete_signup(&self, identity: SessionIdentity, role: Role) {
        info!(?role, email = %identity.email, "signup complete");
        self.auth.commit_session(identity, role.is_recruiter());
        self.leave();
    }

    fn leave(&self) {
        if !self.redirected.swap(true, Ordering::SeqCst) {
            self.navigator.go_to(&self.landing_path);
        }
    }
}
