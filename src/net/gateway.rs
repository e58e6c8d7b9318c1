//! The single outbound request pipeline used by every API caller.
//!
//! ARCHITECTURE
//! ============
//! ```text
//! Gateway -> WithRefreshRetry -> WithAuth -> ReqwestTransport -> backend
//!                  |
//!                  +-> HttpRefresher -> ReqwestTransport (shared cookie jar)
//! ```
//! The refresher shares the base transport's client, and therefore its
//! cookie jar, but bypasses both decorator layers. The jar is persisted, so a
//! refresh cookie issued to one process is still presented by the next.

#[cfg(test)]
#[path = "gateway_test.rs"]
mod tests;

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::auth_layer::WithAuth;
use super::refresh::{HttpRefresher, WithRefreshRetry};
use super::transport::{ApiRequest, HttpCall, ReqwestTransport};
use super::types::Envelope;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::routes::navigator::Navigator;
use crate::session::{PersistentCookieJar, SessionHandle};

/// Typed front door over the composed pipeline.
#[derive(Clone)]
pub struct Gateway {
    pipeline: Arc<dyn HttpCall>,
}

impl Gateway {
    /// Compose the production pipeline over a fresh `reqwest` client that
    /// keeps its cookies in `cookies`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(
        config: &ClientConfig,
        session: SessionHandle,
        cookies: Arc<PersistentCookieJar>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, ApiError> {
        let transport = ReqwestTransport::with_cookie_jar(config, cookies)?;
        let refresher = Arc::new(HttpRefresher::new(transport.clone()));
        let pipeline = WithRefreshRetry::new(WithAuth::new(transport, session.clone()), refresher, session, navigator);
        Ok(Self::from_pipeline(Arc::new(pipeline)))
    }

    /// Wrap an already-composed pipeline.
    #[must_use]
    pub fn from_pipeline(pipeline: Arc<dyn HttpCall>) -> Self {
        Self { pipeline }
    }

    /// Send `request` and decode the envelope.
    ///
    /// # Errors
    ///
    /// Returns transport, status, refresh, or decode errors.
    pub async fn send<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<Envelope<T>, ApiError> {
        self.pipeline.call(request).await?.into_envelope()
    }

    /// Send `request` and only check the status; the body is discarded.
    ///
    /// # Errors
    ///
    /// Returns transport, status, or refresh errors.
    pub async fn execute(&self, request: ApiRequest) -> Result<(), ApiError> {
        let response = self.pipeline.call(request).await?;
        if response.is_success() { Ok(()) } else { Err(response.into_error()) }
    }

    /// `GET path` returning `data`.
    ///
    /// # Errors
    ///
    /// See [`Gateway::send`].
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        Ok(self.send::<T>(ApiRequest::get(path)).await?.data)
    }

    /// `GET path?query` returning `data`.
    ///
    /// # Errors
    ///
    /// See [`Gateway::send`].
    pub async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Vec<(String, String)>,
    ) -> Result<T, ApiError> {
        let mut request = ApiRequest::get(path);
        request.query = query;
        Ok(self.send::<T>(request).await?.data)
    }

    /// `POST path` with a JSON body, returning `data`.
    ///
    /// # Errors
    ///
    /// See [`Gateway::send`]; also `Encode` if `body` cannot be serialized.
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<T, ApiError> {
        Ok(self.send::<T>(ApiRequest::post(path).with_body(to_json(body)?)).await?.data)
    }

    /// `PATCH path` with a JSON body, returning `data`.
    ///
    /// # Errors
    ///
    /// See [`Gateway::post`].
    pub async fn patch<T: DeserializeOwned, B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<T, ApiError> {
        Ok(self.send::<T>(ApiRequest::patch(path).with_body(to_json(body)?)).await?.data)
    }

    /// `DELETE path`.
    ///
    /// # Errors
    ///
    /// See [`Gateway::execute`].
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.execute(ApiRequest::delete(path)).await
    }
}

fn to_json<B: Serialize + ?Sized>(body: &B) -> Result<serde_json::Value, ApiError> {
    serde_json::to_value(body).map_err(|e| ApiError::Encode(e.to_string()))
}
