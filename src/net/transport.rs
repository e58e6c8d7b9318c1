//! Base HTTP primitive: `call(request) -> response`.
//!
//! ARCHITECTURE
//! ============
//! The request pipeline is a stack of [`HttpCall`] decorators. This module
//! owns the innermost layer, a `reqwest` client that turns an [`ApiRequest`]
//! into bytes on the wire. It never inspects statuses: every answered request
//! comes back as `Ok(ApiResponse)`, and only requests that produced no
//! response at all become `Err(ApiError::Network)`. Status handling belongs
//! to the outer layers.

#[cfg(test)]
#[path = "transport_test.rs"]
mod tests;

use std::sync::Arc;

use reqwest::Method;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::types::{Envelope, message_text};
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::session::PersistentCookieJar;

// =============================================================================
// REQUEST / RESPONSE
// =============================================================================

/// A replayable outbound request. The body is kept as JSON so a refresh
/// layer can re-issue it unchanged.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path relative to the API base URL, e.g. `/jobs/42`.
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
    /// Bearer credential for the `Authorization` header.
    pub bearer: Option<String>,
    /// Set once the refresh layer has replayed this request.
    pub retried: bool,
}

impl ApiRequest {
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self { method, path: path.into(), query: Vec::new(), body: None, bearer: None, retried: false }
    }

    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    #[must_use]
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    #[must_use]
    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    #[must_use]
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    #[must_use]
    pub fn with_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Exempt this request from the 401 refresh. Used where a 401 is an
    /// answer in its own right, such as rejected credentials.
    #[must_use]
    pub fn without_refresh(mut self) -> Self {
        self.retried = true;
        self
    }

    #[must_use]
    pub fn with_bearer(mut self, token: impl Into<String>) -> Self {
        self.bearer = Some(token.into());
        self
    }
}

/// An answered request: status plus raw body text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self { status, body: body.into() }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.status == 401
    }

    /// Decode a success body as `Envelope<T>`, or turn a failure status into
    /// [`ApiError::Status`] carrying the envelope message verbatim.
    ///
    /// # Errors
    ///
    /// Returns `Status` for non-2xx responses and `Decode` for malformed bodies.
    pub fn into_envelope<T: DeserializeOwned>(self) -> Result<Envelope<T>, ApiError> {
        if !self.is_success() {
            return Err(self.into_error());
        }
        serde_json::from_str(&self.body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Convert this response into a status error.
    #[must_use]
    pub fn into_error(self) -> ApiError {
        let message = serde_json::from_str::<serde_json::Value>(&self.body)
            .ok()
            .and_then(|v| v.get("message").map(message_text))
            .unwrap_or_else(|| self.body.clone());
        ApiError::Status { status: self.status, message, body: self.body }
    }
}

// =============================================================================
// HTTP CALL SEAM
// =============================================================================

/// One layer of the request pipeline. Enables stubbing in tests.
#[async_trait::async_trait]
pub trait HttpCall: Send + Sync {
    /// Issue `request`. Answered requests are `Ok` whatever their status.
    async fn call(&self, request: ApiRequest) -> Result<ApiResponse, ApiError>;
}

#[async_trait::async_trait]
impl<T: HttpCall + ?Sized> HttpCall for Arc<T> {
    async fn call(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        (**self).call(request).await
    }
}

// =============================================================================
// REQWEST TRANSPORT
// =============================================================================

/// Innermost pipeline layer backed by a shared `reqwest::Client`.
///
/// The client carries a cookie jar so the refresh cookie set at login is sent
/// back on `/auth/refresh`.
#[derive(Clone)]
pub struct ReqwestTransport {
    http: reqwest::Client,
    config: ClientConfig,
}

impl ReqwestTransport {
    /// Build a transport whose cookies live only as long as the process.
    ///
    /// # Errors
    ///
    /// Returns an error if the `reqwest` client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        Self::with_cookie_jar(config, Arc::new(PersistentCookieJar::in_memory()))
    }

    /// Build a transport over a caller-owned cookie jar.
    ///
    /// # Errors
    ///
    /// Returns an error if the `reqwest` client cannot be built.
    pub fn with_cookie_jar(config: &ClientConfig, jar: Arc<PersistentCookieJar>) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder()
            .cookie_provider(jar)
            .user_agent(concat!("jobboard/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(timeout) = config.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        let http = builder.build().map_err(|e| ApiError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, config: config.clone() })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.config.api_base_url
    }
}

#[async_trait::async_trait]
impl HttpCall for ReqwestTransport {
    async fn call(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let url = self.config.endpoint(&request.path);
        debug!(method = %request.method, %url, retried = request.retried, "sending request");

        let mut builder = self.http.request(request.method.clone(), &url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(ApiResponse { status, body })
    }
}
