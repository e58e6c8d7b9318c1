//! Session and authorization core for the job-board client.
//!
//! ARCHITECTURE
//! ============
//! - [`session`]: the process-wide session, its durable storage, and the
//!   login/logout/fetch-user/set-token operations
//! - [`net`]: the outbound request pipeline (bearer attach, 401 refresh and
//!   replay) and the backend wire types
//! - [`routes`]: the route table and the navigation guard
//! - [`services`]: typed callers for each backend resource
//!
//! [`Client`] wires these together from a [`ClientConfig`].

pub mod config;
pub mod error;
pub mod net;
pub mod routes;
pub mod services;
pub mod session;

use std::sync::Arc;

pub use config::ClientConfig;
pub use error::{ApiError, StorageError};

use net::Gateway;
use routes::{Navigation, TracingNavigator};
use services::auth::HttpAuthApi;
use session::{FileStore, KeyValueStore, PersistentCookieJar, SessionHandle, SessionStore};

/// A fully wired client: one session, one gateway, one store. The session
/// record and the cookie jar share the same durable storage.
#[derive(Clone)]
pub struct Client {
    pub session: SessionStore,
    pub gateway: Gateway,
    pub navigator: Arc<TracingNavigator>,
}

impl Client {
    /// Build a client persisting to the configured storage file.
    ///
    /// # Errors
    ///
    /// Returns an error if storage cannot be loaded or the HTTP client
    /// cannot be built.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ApiError> {
        Self::with_storage(config, Arc::new(FileStore::new(&config.storage_path)))
    }

    /// Build a client over caller-supplied storage.
    ///
    /// # Errors
    ///
    /// Returns an error if storage cannot be loaded or the HTTP client
    /// cannot be built.
    pub fn with_storage(config: &ClientConfig, storage: Arc<dyn KeyValueStore>) -> Result<Self, ApiError> {
        let cookies = Arc::new(PersistentCookieJar::load(storage.clone())?);
        let handle = SessionHandle::load(storage)?;
        let navigator = Arc::new(TracingNavigator::new());
        let gateway = Gateway::new(config, handle.clone(), cookies, navigator.clone())?;
        let session = SessionStore::new(handle, Arc::new(HttpAuthApi::new(gateway.clone())));
        Ok(Self { session, gateway, navigator })
    }

    /// Guard a navigation against the current session.
    #[must_use]
    pub fn navigate(&self, path: &str) -> Navigation {
        routes::navigate(path, &self.session.snapshot())
    }
}
