//! Pipeline layer that turns a 401 into one silent refresh and one replay.
//!
//! CONTRACT
//! ========
//! For each request passing through [`WithRefreshRetry`]:
//! - non-401 responses and network errors pass through untouched
//! - a 401 on a request already marked `retried` passes through untouched;
//!   this includes requests built with [`ApiRequest::without_refresh`]
//! - otherwise the request is marked `retried`, the refresher is called once,
//!   the new token is stored in the session, and the request is replayed
//!   with that token; the caller receives the replay's response
//! - if the refresher fails, the session is cleared, a hard redirect to the
//!   login page is issued, and the caller receives `RefreshFailed`
//!
//! TRADE-OFFS
//! ==========
//! The retry flag lives on the request, not on shared state. N requests that
//! expire together make N refresh calls; the last token written wins. There
//! is no shared in-flight refresh to wait on, so one failed refresh only fails
//! the request that made it.

#[cfg(test)]
#[path = "refresh_test.rs"]
mod tests;

use std::sync::Arc;

use tracing::{debug, warn};

use super::transport::{ApiRequest, ApiResponse, HttpCall};
use super::types::{Envelope, RefreshData};
use crate::error::ApiError;
use crate::routes::LOGIN_PATH;
use crate::routes::navigator::Navigator;
use crate::session::SessionHandle;

/// Path of the cookie-authenticated refresh endpoint.
pub const REFRESH_PATH: &str = "/auth/refresh";

/// Exchanges the long-lived refresh credential for a new access token.
#[async_trait::async_trait]
pub trait TokenRefresher: Send + Sync {
    async fn refresh(&self) -> Result<String, ApiError>;
}

/// Calls `GET /auth/refresh` on a bare transport.
///
/// The transport must not be wrapped in the auth or refresh layers: the
/// refresh call carries no bearer and must never recurse into itself. The
/// refresh credential travels as a cookie held by the transport's client.
pub struct HttpRefresher<C> {
    transport: C,
}

impl<C> HttpRefresher<C> {
    pub fn new(transport: C) -> Self {
        Self { transport }
    }
}

#[async_trait::async_trait]
impl<C: HttpCall> TokenRefresher for HttpRefresher<C> {
    async fn refresh(&self) -> Result<String, ApiError> {
        let response = self.transport.call(ApiRequest::get(REFRESH_PATH)).await?;
        let envelope: Envelope<RefreshData> = response.into_envelope()?;
        Ok(envelope.data.access_token)
    }
}

/// Outermost pipeline layer.
pub struct WithRefreshRetry<C> {
    inner: C,
    refresher: Arc<dyn TokenRefresher>,
    session: SessionHandle,
    navigator: Arc<dyn Navigator>,
}

impl<C> WithRefreshRetry<C> {
    pub fn new(
        inner: C,
        refresher: Arc<dyn TokenRefresher>,
        session: SessionHandle,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self { inner, refresher, session, navigator }
    }
}

#[async_trait::async_trait]
impl<C: HttpCall> HttpCall for WithRefreshRetry<C> {
    async fn call(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let mut replay = request.clone();
        let response = self.inner.call(request).await?;
        if !response.is_unauthorized() || replay.retried {
            return Ok(response);
        }

        replay.retried = true;
        debug!(method = %replay.method, path = %replay.path, "401 received; refreshing access token");

        match self.refresher.refresh().await {
            Ok(token) => {
                if let Err(e) = self.session.set_access_token(Some(token.clone())) {
                    warn!(error = %e, "failed to persist refreshed token");
                }
                replay.bearer = Some(token);
                self.inner.call(replay).await
            }
            Err(e) => {
                warn!(error = %e, path = %replay.path, "token refresh failed; ending session");
                if let Err(clear_err) = self.session.clear() {
                    warn!(error = %clear_err, "failed to clear session storage");
                }
                self.navigator.hard_redirect(LOGIN_PATH);
                Err(ApiError::RefreshFailed(Box::new(e)))
            }
        }
    }
}
