//! Durable cookie jar for the HTTP-only refresh credential.
//!
//! SYSTEM CONTEXT
//! ==============
//! A browser keeps the refresh cookie across page reloads. The CLI restarts on
//! every command, so the jar lives in the same key-value storage as the
//! session: each `Set-Cookie` the transport accepts is written back under
//! [`COOKIE_STORAGE_KEY`], and a new process starts from the saved jar.
//!
//! Session (non-expiring) cookies are saved too; the backend decides their
//! lifetime, not the process.

#[cfg(test)]
#[path = "cookies_test.rs"]
mod tests;

use std::sync::{Arc, PoisonError};

use reqwest::Url;
use reqwest::header::HeaderValue;
use reqwest_cookie_store::{CookieStore, CookieStoreMutex};
use tracing::warn;

use super::storage::{KeyValueStore, MemoryStore};
use crate::error::StorageError;

/// Storage key holding the serialized jar.
pub const COOKIE_STORAGE_KEY: &str = "cookie-jar";

/// A `reqwest` cookie provider that persists itself on every update.
pub struct PersistentCookieJar {
    jar: CookieStoreMutex,
    storage: Arc<dyn KeyValueStore>,
}

impl PersistentCookieJar {
    /// Rehydrate the jar from `storage`. An unreadable jar is logged and
    /// replaced with an empty one.
    ///
    /// # Errors
    ///
    /// Returns an error if storage cannot be read.
    pub fn load(storage: Arc<dyn KeyValueStore>) -> Result<Self, StorageError> {
        let store = match storage.get(COOKIE_STORAGE_KEY)? {
            Some(raw) => cookie_store::serde::json::load_all(raw.as_bytes()).unwrap_or_else(|e| {
                warn!(error = %e, "discarding unreadable cookie jar");
                CookieStore::default()
            }),
            None => CookieStore::default(),
        };
        Ok(Self { jar: CookieStoreMutex::new(store), storage })
    }

    /// An empty jar that is lost on exit.
    #[must_use]
    pub fn in_memory() -> Self {
        Self { jar: CookieStoreMutex::new(CookieStore::default()), storage: Arc::new(MemoryStore::new()) }
    }

    /// Write the current jar to storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the jar cannot be serialized or storage cannot be
    /// written.
    pub fn save(&self) -> Result<(), StorageError> {
        let mut raw = Vec::new();
        {
            let store = self.jar.lock().unwrap_or_else(PoisonError::into_inner);
            cookie_store::serde::json::save_incl_expired_and_nonpersistent(&store, &mut raw)
                .map_err(|e| StorageError::Cookies(e.to_string()))?;
        }
        let raw = String::from_utf8(raw).map_err(|e| StorageError::Cookies(e.to_string()))?;
        self.storage.set(COOKIE_STORAGE_KEY, &raw)
    }

    /// Drop every cookie, in memory and in storage.
    ///
    /// # Errors
    ///
    /// Returns an error if storage cannot be written.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.jar.lock().unwrap_or_else(PoisonError::into_inner).clear();
        self.storage.remove(COOKIE_STORAGE_KEY)
    }

    /// Number of unexpired cookies held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.jar.lock().unwrap_or_else(PoisonError::into_inner).iter_unexpired().count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl reqwest::cookie::CookieStore for PersistentCookieJar {
    fn set_cookies(&self, cookie_headers: &mut dyn Iterator<Item = &HeaderValue>, url: &Url) {
        reqwest::cookie::CookieStore::set_cookies(&self.jar, cookie_headers, url);
        if let Err(e) = self.save() {
            warn!(error = %e, %url, "failed to persist cookie jar");
        }
    }

    fn cookies(&self, url: &Url) -> Option<HeaderValue> {
        reqwest::cookie::CookieStore::cookies(&self.jar, url)
    }
}
