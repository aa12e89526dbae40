use tokio::sync::watch;
use tracing::info;

use crate::models::{Role, Session, SessionIdentity};

/// Shared authentication store.
///
/// `commit_session` must apply atomically: forms call it once per signup and never
/// coordinate with each other.
pub trait AuthStore: Send + Sync {
    fn session(&self) -> Session;

    fn commit_session(&self, identity: SessionIdentity, is_recruiter: bool);

    /// Change feed; the receiver starts at the current session.
    fn subscribe(&self) -> watch::Receiver<Session>;
}

pub struct InMemoryAuthStore {
    tx: watch::Sender<Session>,
}

impl InMemoryAuthStore {
    pub fn new() -> Self {
        Self::with_session(Session::default())
    }

    pub fn with_session(session: Session) -> Self {
        let (tx, _) = watch::channel(session);
        Self { tx }
    }

    pub fn signed_in(identity: SessionIdentity, role: Role) -> Self {
        Self::with_session(Session::signed_in(identity, role))
    }

    pub fn logout(&self) {
        self.tx.send_replace(Session::default());
    }
}

impl Default for InMemoryAuthStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthStore for InMemoryAuthStore {
    fn session(&self) -> Session {
        self.tx.borrow().clone()
    }

    fn commit_session(&self, identity: SessionIdentity, is_recruiter: bool) {
        info!(email = %identity.email, is_recruiter, "session committed");
        self.tx.send_replace(Session {
            is_authenticated: true,
            is_recruiter,
            user_data: Some(identity),
        });
    }

    fn subscribe(&self) -> watch::Receiver<Session> {
        self.tx.subscribe()
    }
}
