//! Shared session container and its persisted record.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every consumer that needs "who is logged in" holds a cloned
//! [`SessionHandle`]: the gateway reads the token from it, the route guard
//! reads a snapshot, and the [`SessionStore`](super::SessionStore) drives its
//! mutations. Public mutation is limited to `set_access_token`; the remaining
//! writes are crate-private and reached only through the store's operations
//! and the gateway's refresh path.
//!
//! PERSISTENCE
//! ===========
//! Two storage keys are owned here:
//! - `auth-storage`: `{"state": {user, accessToken, isAuthenticated}, "version": 0}`
//! - `access_token`: the raw token, for quick reads without record decoding
//!
//! Every mutation updates memory and then both keys while holding the write
//! lock, so this process never observes memory and storage out of step.
//!
//! TRADE-OFFS
//! ==========
//! The storage write is synchronous and runs under the `RwLock`, including on
//! async paths (login, the refresh layer). [`FileStore`](super::FileStore)
//! rewrites a file of a few hundred bytes, so the blocking window is short. A
//! backend with slow writes would need them moved onto `spawn_blocking`.

#[cfg(test)]
#[path = "state_test.rs"]
mod tests;

use std::sync::{Arc, PoisonError, RwLock};

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::storage::{KeyValueStore, MemoryStore};
use crate::error::StorageError;
use crate::net::types::User;

/// Storage key of the serialized session record.
pub const SESSION_STORAGE_KEY: &str = "auth-storage";
/// Storage key of the raw access token.
pub const ACCESS_TOKEN_KEY: &str = "access_token";

const RECORD_VERSION: u32 = 0;

// =============================================================================
// SESSION RECORD
// =============================================================================

/// Point-in-time view of the session.
///
/// `is_authenticated` always equals `access_token.is_some()`. `user` may be
/// `None` while authenticated, e.g. right after a restart before the account
/// has been re-fetched.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub is_authenticated: bool,
}

impl SessionRecord {
    fn with_token(user: Option<User>, access_token: Option<String>) -> Self {
        let is_authenticated = access_token.is_some();
        Self { user, access_token, is_authenticated }
    }

    /// Role name of the loaded user, if any.
    #[must_use]
    pub fn role_name(&self) -> Option<&str> {
        self.user.as_ref().and_then(User::role_name)
    }
}

#[derive(Serialize, Deserialize)]
struct PersistedRecord {
    state: SessionRecord,
    #[serde(default)]
    version: u32,
}

// =============================================================================
// SESSION HANDLE
// =============================================================================

struct SessionInner {
    state: RwLock<SessionRecord>,
    storage: Arc<dyn KeyValueStore>,
}

/// Cheaply cloneable handle to the process-wide session.
#[derive(Clone)]
pub struct SessionHandle {
    inner: Arc<SessionInner>,
}

impl std::fmt::Debug for SessionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionHandle").field("state", &self.snapshot()).finish_non_exhaustive()
    }
}

impl SessionHandle {
    /// Create a handle and rehydrate it from `storage`.
    ///
    /// # Errors
    ///
    /// Returns an error if storage cannot be read or the reconciled record
    /// cannot be written back.
    pub fn load(storage: Arc<dyn KeyValueStore>) -> Result<Self, StorageError> {
        let handle = Self {
            inner: Arc::new(SessionInner { state: RwLock::new(SessionRecord::default()), storage }),
        };
        handle.reload()?;
        Ok(handle)
    }

    /// An empty session backed by process-local storage.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            inner: Arc::new(SessionInner {
                state: RwLock::new(SessionRecord::default()),
                storage: Arc::new(MemoryStore::new()),
            }),
        }
    }

    /// Re-read both storage keys into memory.
    ///
    /// The serialized record wins when present and valid; otherwise the raw
    /// token key seeds an authenticated session with no user. A corrupt record
    /// is logged and ignored. Both keys are rewritten afterwards so they agree.
    ///
    /// # Errors
    ///
    /// Returns an error if storage cannot be read or written.
    pub fn reload(&self) -> Result<(), StorageError> {
        let storage = &self.inner.storage;
        let raw_token = storage.get(ACCESS_TOKEN_KEY)?.filter(|t| !t.is_empty());
        let persisted = match storage.get(SESSION_STORAGE_KEY)? {
            Some(raw) => match serde_json::from_str::<PersistedRecord>(&raw) {
                Ok(record) => Some(record.state),
                Err(e) => {
                    warn!(error = %e, "discarding unreadable session record");
                    None
                }
            },
            None => None,
        };

        let record = match persisted {
            Some(state) => SessionRecord::with_token(state.user, state.access_token),
            None => SessionRecord::with_token(None, raw_token),
        };

        let mut state = self.inner.state.write().unwrap_or_else(PoisonError::into_inner);
        *state = record;
        self.persist(&state)
    }

    /// Copy of the current session.
    #[must_use]
    pub fn snapshot(&self) -> SessionRecord {
        self.inner.state.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    #[must_use]
    pub fn access_token(&self) -> Option<String> {
        self.inner.state.read().unwrap_or_else(PoisonError::into_inner).access_token.clone()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.inner.state.read().unwrap_or_else(PoisonError::into_inner).is_authenticated
    }

    #[must_use]
    pub fn user(&self) -> Option<User> {
        self.inner.state.read().unwrap_or_else(PoisonError::into_inner).user.clone()
    }

    /// Replace the access token, keeping the user. `None` signs out the token
    /// without touching the user record.
    ///
    /// # Errors
    ///
    /// Returns an error if the change cannot be persisted. Memory is updated
    /// regardless.
    pub fn set_access_token(&self, token: Option<String>) -> Result<(), StorageError> {
        self.mutate(|state| *state = SessionRecord::with_token(state.user.take(), token))
    }

    pub(crate) fn apply_login(&self, token: String, user: User) -> Result<(), StorageError> {
        self.mutate(|state| *state = SessionRecord::with_token(Some(user), Some(token)))
    }

    pub(crate) fn set_user(&self, user: User) -> Result<(), StorageError> {
        self.mutate(|state| state.user = Some(user))
    }

    /// Drop token and user and erase both storage keys.
    pub(crate) fn clear(&self) -> Result<(), StorageError> {
        let mut state = self.inner.state.write().unwrap_or_else(PoisonError::into_inner);
        *state = SessionRecord::default();
        self.inner.storage.remove(ACCESS_TOKEN_KEY)?;
        self.inner.storage.remove(SESSION_STORAGE_KEY)
    }

    /// Erase every key in the backing storage and reset memory.
    pub(crate) fn wipe(&self) -> Result<(), StorageError> {
        let mut state = self.inner.state.write().unwrap_or_else(PoisonError::into_inner);
        *state = SessionRecord::default();
        self.inner.storage.clear()
    }

    fn mutate<F>(&self, apply: F) -> Result<(), StorageError>
    where
        F: FnOnce(&mut SessionRecord),
    {
        let mut state = self.inner.state.write().unwrap_or_else(PoisonError::into_inner);
        apply(&mut state);
        self.persist(&state)
    }

    fn persist(&self, state: &SessionRecord) -> Result<(), StorageError> {
        let storage = &self.inner.storage;
        match &state.access_token {
            Some(token) => storage.set(ACCESS_TOKEN_KEY, token)?,
            None => storage.remove(ACCESS_TOKEN_KEY)?,
        }
        let record = PersistedRecord { state: state.clone(), version: RECORD_VERSION };
        storage.set(SESSION_STORAGE_KEY, &serde_json::to_string(&record)?)
    }
}
