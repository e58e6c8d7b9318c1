//! Session operations: login, logout, fetch-user, set-token.
//!
//! ARCHITECTURE
//! ============
//! [`SessionStore`] pairs the shared [`SessionHandle`] with an [`AuthApi`]
//! implementation. The production `AuthApi` routes through the gateway, which
//! itself holds a clone of the same handle; splitting state from operations
//! keeps that relationship acyclic.
//!
//! ERROR HANDLING
//! ==============
//! Login failures leave the session untouched and are returned verbatim.
//! Logout is best-effort against the backend and always clears locally.
//! A failed account fetch is treated as an invalid session and clears without
//! contacting the logout endpoint.

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;

use std::sync::Arc;

use tracing::{info, warn};

use super::state::{SessionHandle, SessionRecord};
use crate::error::{ApiError, StorageError};
use crate::net::types::{AccountData, LoginData, RegisterRequest, Registered, User};

/// Backend auth endpoints the session depends on. Enables stubbing in tests.
#[async_trait::async_trait]
pub trait AuthApi: Send + Sync {
    /// `POST /auth/login`.
    async fn login(&self, username: &str, password: &str) -> Result<LoginData, ApiError>;

    /// `GET /auth/account`.
    async fn account(&self) -> Result<AccountData, ApiError>;

    /// `POST /auth/logout`.
    async fn logout(&self) -> Result<(), ApiError>;

    /// `POST /auth/register`. Does not sign the new account in.
    async fn register(&self, request: &RegisterRequest) -> Result<Registered, ApiError>;
}

/// The single mutation surface for the process-wide session.
#[derive(Clone)]
pub struct SessionStore {
    session: SessionHandle,
    api: Arc<dyn AuthApi>,
}

impl SessionStore {
    #[must_use]
    pub fn new(session: SessionHandle, api: Arc<dyn AuthApi>) -> Self {
        Self { session, api }
    }

    /// The shared handle this store mutates.
    #[must_use]
    pub fn handle(&self) -> &SessionHandle {
        &self.session
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionRecord {
        self.session.snapshot()
    }

    /// Replace or remove the access token. No network call.
    ///
    /// # Errors
    ///
    /// Returns an error if the token cannot be persisted.
    pub fn set_access_token(&self, token: Option<String>) -> Result<(), StorageError> {
        self.session.set_access_token(token)
    }

    /// Authenticate with credentials and store the resulting session.
    ///
    /// # Errors
    ///
    /// Returns the backend error unchanged on rejection, in which case the
    /// session is not modified. Returns a storage error if the new session
    /// cannot be persisted.
    pub async fn login(&self, username: &str, password: &str) -> Result<User, ApiError> {
        let data = self.api.login(username, password).await?;
        self.session.apply_login(data.access_token, data.user.clone())?;
        info!(user_id = %data.user.id, "login succeeded");
        Ok(data.user)
    }

    /// Create an account. The session is left as it was.
    ///
    /// # Errors
    ///
    /// Returns the backend error unchanged.
    pub async fn register(&self, request: &RegisterRequest) -> Result<Registered, ApiError> {
        self.api.register(request).await
    }

    /// End the session. The backend call is best-effort; local state is
    /// cleared whatever its outcome.
    ///
    /// # Errors
    ///
    /// Returns an error only if durable storage cannot be cleared.
    pub async fn logout(&self) -> Result<(), StorageError> {
        if let Err(e) = self.api.logout().await {
            warn!(error = %e, "logout request failed; clearing local session anyway");
        }
        self.session.clear()?;
        info!("session cleared after logout");
        Ok(())
    }

    /// Re-fetch the current account. On failure the session is cleared
    /// (without calling logout) and the error is returned.
    ///
    /// # Errors
    ///
    /// Returns the fetch error after clearing, or a storage error if the
    /// fetched user cannot be persisted.
    pub async fn fetch_user(&self) -> Result<User, ApiError> {
        match self.api.account().await {
            Ok(data) => {
                self.session.set_user(data.user.clone())?;
                Ok(data.user)
            }
            Err(e) => {
                warn!(error = %e, "account fetch failed; clearing session");
                if let Err(clear_err) = self.session.clear() {
                    warn!(error = %clear_err, "failed to clear session storage");
                }
                Err(e)
            }
        }
    }

    /// Erase every stored key and reset the in-memory session.
    ///
    /// # Errors
    ///
    /// Returns an error if storage cannot be cleared.
    pub fn clear_cache(&self) -> Result<(), StorageError> {
        self.session.wipe()?;
        info!("local storage cleared");
        Ok(())
    }
}
