//! Pipeline layer that attaches the session's bearer token.

#[cfg(test)]
#[path = "auth_layer_test.rs"]
mod tests;

use super::transport::{ApiRequest, ApiResponse, HttpCall};
use crate::error::ApiError;
use crate::session::SessionHandle;

/// Adds `Authorization: Bearer <token>` from the in-memory session.
///
/// A request that already carries a bearer (a refresh replay) keeps it; with
/// no token in the session the request goes out unauthenticated.
pub struct WithAuth<C> {
    inner: C,
    session: SessionHandle,
}

impl<C> WithAuth<C> {
    pub fn new(inner: C, session: SessionHandle) -> Self {
        Self { inner, session }
    }
}

#[async_trait::async_trait]
impl<C: HttpCall> HttpCall for WithAuth<C> {
    async fn call(&self, mut request: ApiRequest) -> Result<ApiResponse, ApiError> {
        if request.bearer.is_none() {
            request.bearer = self.session.access_token();
        }
        self.inner.call(request).await
    }
}
