//! Durable session store: the single source of truth for "who is logged in".
//! In-memory state is mirrored to a profile file so it survives restarts.
//! The store is an owned object injected where needed, not a process global.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{AppError, AppResult};
use crate::profile_paths;

use super::principal::{Role, Session};
use super::provider::normalize_identity;

/// Persisted form: the canonical session record plus the bearer token. One
/// file, written on login and removed on logout. The role is projected from
/// the session on read and never stored a second time, so the two copies
/// cannot diverge.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredProfile {
    session: Session,
    token: String,
}

pub struct SessionStore {
    path: PathBuf,
    slot: RwLock<Option<StoredProfile>>,
}

impl SessionStore {
    /// Open a store rooted at a profile directory. Does not touch the disk;
    /// call [`restore`](Self::restore) to load any persisted session.
    pub fn open(profile_root: &Path) -> Self {
        Self {
            path: profile_paths::session_file(profile_root),
            slot: RwLock::new(None),
        }
    }

    /// Load a previously persisted session, if any. Returns true when a
    /// well-formed session was restored. Missing or malformed data leaves the
    /// store logged out; it is never a fatal error.
    pub fn restore(&self) -> bool {
        let bytes = match fs::read(&self.path) {
            Ok(b) => b,
            Err(_) => return false,
        };
        match serde_json::from_slice::<StoredProfile>(&bytes) {
            Ok(profile) => {
                debug!(
                    "session.restore user={} role={}",
                    profile.session.user_id, profile.session.role
                );
                *self.slot.write() = Some(profile);
                true
            }
            Err(e) => {
                warn!("session.restore discarding malformed profile: {}", e);
                false
            }
        }
    }

    /// Accept a raw identity payload from the auth endpoint, normalize it into
    /// a canonical [`Session`], persist it, and make it current. A payload
    /// with a missing or unrecognized role is rejected here, at the boundary.
    pub fn login(&self, raw: &Value) -> AppResult<Session> {
        let ident = normalize_identity(raw)?;
        let profile = StoredProfile {
            session: ident.session,
            token: ident.token,
        };
        self.persist(&profile)?;
        debug!(
            "session.login user={} role={}",
            profile.session.user_id, profile.session.role
        );
        let session = profile.session.clone();
        *self.slot.write() = Some(profile);
        Ok(session)
    }

    /// Clear the in-memory session and remove the persisted profile.
    /// Idempotent; logging out while logged out is a no-op.
    pub fn logout(&self) {
        let had_session = self.slot.write().take().is_some();
        match fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => warn!("session.logout could not remove profile: {}", e),
        }
        if had_session {
            debug!("session.logout cleared");
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.slot.read().is_some()
    }

    pub fn current(&self) -> Option<Session> {
        self.slot.read().as_ref().map(|p| p.session.clone())
    }

    pub fn current_role(&self) -> Option<Role> {
        self.slot.read().as_ref().map(|p| p.session.role)
    }

    pub fn token(&self) -> Option<String> {
        self.slot
            .read()
            .as_ref()
            .map(|p| p.token.clone())
            .filter(|t| !t.is_empty())
    }

    fn persist(&self, profile: &StoredProfile) -> AppResult<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        let body = serde_json::to_vec_pretty(profile)
            .map_err(|e| AppError::session("profile_encode", e.to_string()))?;
        fs::write(&self.path, body)?;
        Ok(())
    }
}
