//! # Session Storage
//!
//! Persists who is signed in between launches.
//!
//! ## Stored Keys
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  session.json                                                           │
//! │                                                                         │
//! │  auth_token        bearer token for API calls                          │
//! │  user_profile      { role, name, email, phone }                        │
//! │  remembered_login  { username, token, expires_at }                     │
//! │                    server-issued token, never the password             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A session is only considered present when both `auth_token` and
//! `user_profile` are stored.

use chrono::{DateTime, Utc};
use playzone_core::UserProfile;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, warn};

use crate::error::{ClientError, ClientResult};

/// File name of the session document inside the data directory.
pub const SESSION_FILE_NAME: &str = "session.json";

/// A signed-in user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub profile: UserProfile,
}

impl Session {
    pub fn is_admin(&self) -> bool {
        self.profile.is_admin()
    }
}

/// "Remember me" data: a long-lived token the server can exchange for a
/// fresh session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RememberedLogin {
    pub username: String,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl RememberedLogin {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Where sessions live.
pub trait SessionStore: Send + Sync {
    fn load_session(&self) -> ClientResult<Option<Session>>;
    fn save_session(&self, session: &Session) -> ClientResult<()>;
    fn clear_session(&self) -> ClientResult<()>;

    fn load_remembered(&self) -> ClientResult<Option<RememberedLogin>>;
    fn save_remembered(&self, login: &RememberedLogin) -> ClientResult<()>;
    fn clear_remembered(&self) -> ClientResult<()>;
}

// =============================================================================
// Stored Document
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct SessionDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    auth_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    user_profile: Option<UserProfile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    remembered_login: Option<RememberedLogin>,
}

impl SessionDocument {
    fn session(&self) -> Option<Session> {
        match (&self.auth_token, &self.user_profile) {
            (Some(token), Some(profile)) => Some(Session {
                token: token.clone(),
                profile: profile.clone(),
            }),
            _ => None,
        }
    }

    fn set_session(&mut self, session: Option<&Session>) {
        self.auth_token = session.map(|s| s.token.clone());
        self.user_profile = session.map(|s| s.profile.clone());
    }

    fn is_empty(&self) -> bool {
        self.auth_token.is_none() && self.user_profile.is_none() && self.remembered_login.is_none()
    }
}

fn lock_failed<T>(_: T) -> ClientError {
    ClientError::SessionStorage("session lock poisoned".to_string())
}

// =============================================================================
// In-Memory Store
// =============================================================================

/// Session store that forgets everything on exit.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    doc: Mutex<SessionDocument>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn load_session(&self) -> ClientResult<Option<Session>> {
        Ok(self.doc.lock().map_err(lock_failed)?.session())
    }

    fn save_session(&self, session: &Session) -> ClientResult<()> {
        self.doc.lock().map_err(lock_failed)?.set_session(Some(session));
        Ok(())
    }

    fn clear_session(&self) -> ClientResult<()> {
        self.doc.lock().map_err(lock_failed)?.set_session(None);
        Ok(())
    }

    fn load_remembered(&self) -> ClientResult<Option<RememberedLogin>> {
        Ok(self.doc.lock().map_err(lock_failed)?.remembered_login.clone())
    }

    fn save_remembered(&self, login: &RememberedLogin) -> ClientResult<()> {
        self.doc.lock().map_err(lock_failed)?.remembered_login = Some(login.clone());
        Ok(())
    }

    fn clear_remembered(&self) -> ClientResult<()> {
        self.doc.lock().map_err(lock_failed)?.remembered_login = None;
        Ok(())
    }
}

// =============================================================================
// File Store
// =============================================================================

/// Session store backed by one JSON file.
///
/// Every write rewrites the whole document. A document with nothing left in
/// it is deleted rather than written.
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    // serializes read-modify-write cycles
    lock: Mutex<()>,
}

impl FileSessionStore {
    /// Store at `dir/session.json`.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(SESSION_FILE_NAME),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> ClientResult<SessionDocument> {
        if !self.path.exists() {
            return Ok(SessionDocument::default());
        }

        let json = fs::read_to_string(&self.path)
            .map_err(|e| ClientError::SessionStorage(e.to_string()))?;
        match serde_json::from_str(&json) {
            Ok(doc) => Ok(doc),
            Err(e) => {
                // a corrupt file is treated as signed out
                warn!(path = ?self.path, error = %e, "Discarding unreadable session file");
                Ok(SessionDocument::default())
            }
        }
    }

    fn write(&self, doc: &SessionDocument) -> ClientResult<()> {
        if doc.is_empty() {
            if self.path.exists() {
                fs::remove_file(&self.path)
                    .map_err(|e| ClientError::SessionStorage(e.to_string()))?;
            }
            return Ok(());
        }

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| ClientError::SessionStorage(e.to_string()))?;
        }
        let json = serde_json::to_string_pretty(doc)?;
        fs::write(&self.path, json).map_err(|e| ClientError::SessionStorage(e.to_string()))?;
        debug!(path = ?self.path, "Session file written");
        Ok(())
    }

    fn update(&self, change: impl FnOnce(&mut SessionDocument)) -> ClientResult<()> {
        let _guard = self.lock.lock().map_err(lock_failed)?;
        let mut doc = self.read()?;
        change(&mut doc);
        self.write(&doc)
    }
}

impl SessionStore for FileSessionStore {
    fn load_session(&self) -> ClientResult<Option<Session>> {
        let _guard = self.lock.lock().map_err(lock_failed)?;
        Ok(self.read()?.session())
    }

    fn save_session(&self, session: &Session) -> ClientResult<()> {
        self.update(|doc| doc.set_session(Some(session)))
    }

    fn clear_session(&self) -> ClientResult<()> {
        self.update(|doc| doc.set_session(None))
    }

    fn load_remembered(&self) -> ClientResult<Option<RememberedLogin>> {
        let _guard = self.lock.lock().map_err(lock_failed)?;
        Ok(self.read()?.remembered_login)
    }

    fn save_remembered(&self, login: &RememberedLogin) -> ClientResult<()> {
        self.update(|doc| doc.remembered_login = Some(login.clone()))
    }

    fn clear_remembered(&self) -> ClientResult<()> {
        self.update(|doc| doc.remembered_login = None)
    }
}
