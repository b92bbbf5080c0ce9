//! # Session State
//!
//! Who is signed in, mirrored in memory and kept in a [`SessionStore`].
//!
//! The in-memory copy is what commands read; the store is only touched on
//! sign in, sign out and startup.

use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Utc};
use playzone_client::{ClientResult, RememberedLogin, Session, SessionStore};
use playzone_core::UserProfile;
use tracing::{info, warn};

/// Injected session container. Clones share state.
#[derive(Clone)]
pub struct SessionState {
    store: Arc<dyn SessionStore>,
    current: Arc<RwLock<Option<Session>>>,
}

impl std::fmt::Debug for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionState")
            .field("signed_in", &self.is_signed_in())
            .finish()
    }
}

impl SessionState {
    /// Wraps `store`, picking up a session saved by an earlier run.
    ///
    /// An unreadable store starts signed out.
    pub fn load(store: Arc<dyn SessionStore>) -> Self {
        let current = match store.load_session() {
            Ok(session) => session,
            Err(e) => {
                warn!(error = %e, "Could not read saved session");
                None
            }
        };
        if let Some(session) = &current {
            info!(role = ?session.profile.role, "Saved session found");
        }
        SessionState {
            store,
            current: Arc::new(RwLock::new(current)),
        }
    }

    pub fn current(&self) -> Option<Session> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn profile(&self) -> Option<UserProfile> {
        self.current().map(|s| s.profile)
    }

    pub fn is_signed_in(&self) -> bool {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(Session::is_admin)
    }

    /// Records a fresh session in memory and in the store.
    pub fn sign_in(&self, session: Session) -> ClientResult<()> {
        self.store.save_session(&session)?;
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Some(session);
        Ok(())
    }

    /// Drops the session. Memory is cleared even if the store fails.
    pub fn sign_out(&self) -> ClientResult<()> {
        self.current
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        self.store.clear_session()
    }

    pub fn remember(&self, login: &RememberedLogin) -> ClientResult<()> {
        self.store.save_remembered(login)
    }

    pub fn forget_remembered(&self) -> ClientResult<()> {
        self.store.clear_remembered()
    }

    /// The remembered login, if one exists and has not expired at `now`.
    pub fn remembered(&self, now: DateTime<Utc>) -> Option<RememberedLogin> {
        match self.store.load_remembered() {
            Ok(Some(login)) if !login.is_expired(now) => Some(login),
            Ok(Some(_)) => {
                info!("Remembered login expired");
                if let Err(e) = self.store.clear_remembered() {
                    warn!(error = %e, "Could not forget expired login");
                }
                None
            }
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "Could not read remembered login");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use playzone_client::{FileSessionStore, MemorySessionStore};
    use playzone_core::UserRole;
    use tempfile::TempDir;

    fn session(role: UserRole) -> Session {
        Session {
            token: "tok-1".into(),
            profile: UserProfile {
                role,
                name: "Sari".into(),
                email: "sari@example.com".into(),
                phone: "081298765432".into(),
            },
        }
    }

    #[test]
    fn test_sign_in_and_out() {
        let state = SessionState::load(Arc::new(MemorySessionStore::new()));
        assert!(!state.is_signed_in());

        state.sign_in(session(UserRole::Customer)).unwrap();
        assert!(state.is_signed_in());
        assert!(!state.is_admin());
        assert_eq!(state.profile().unwrap().name, "Sari");

        state.sign_out().unwrap();
        assert!(state.current().is_none());
    }

    #[test]
    fn test_session_survives_restart() {
        let dir = TempDir::new().unwrap();
        let state = SessionState::load(Arc::new(FileSessionStore::new(dir.path())));
        state.sign_in(session(UserRole::Admin)).unwrap();

        let reopened = SessionState::load(Arc::new(FileSessionStore::new(dir.path())));
        assert!(reopened.is_admin());
    }

    #[test]
    fn test_expired_remembered_login_is_dropped() {
        let state = SessionState::load(Arc::new(MemorySessionStore::new()));
        let now = Utc::now();
        state
            .remember(&RememberedLogin {
                username: "sari".into(),
                token: "remember-1".into(),
                expires_at: now + Duration::days(1),
            })
            .unwrap();

        assert!(state.remembered(now).is_some());
        assert!(state.remembered(now + Duration::days(2)).is_none());
        // gone for good once seen expired
        assert!(state.remembered(now).is_none());
    }
}
