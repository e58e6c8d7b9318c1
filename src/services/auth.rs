//! Auth endpoints over the gateway.

use tracing::debug;

use crate::error::ApiError;
use crate::net::Gateway;
use crate::net::transport::ApiRequest;
use crate::net::types::{AccountData, LoginData, LoginRequest, RegisterRequest, Registered};
use crate::session::AuthApi;

/// Production [`AuthApi`] backed by the request pipeline.
#[derive(Clone)]
pub struct HttpAuthApi {
    gateway: Gateway,
}

impl HttpAuthApi {
    #[must_use]
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }
}

#[async_trait::async_trait]
impl AuthApi for HttpAuthApi {
    /// A 401 here means rejected credentials, so the request skips the
    /// refresh layer and the backend message reaches the caller as-is.
    async fn login(&self, username: &str, password: &str) -> Result<LoginData, ApiError> {
        debug!(username, "logging in");
        let body = serde_json::to_value(LoginRequest { username, password })
            .map_err(|e| ApiError::Encode(e.to_string()))?;
        let request = ApiRequest::post("/auth/login").with_body(body).without_refresh();
        Ok(self.gateway.send::<LoginData>(request).await?.data)
    }

    async fn account(&self) -> Result<AccountData, ApiError> {
        self.gateway.get("/auth/account").await
    }

    async fn logout(&self) -> Result<(), ApiError> {
        self.gateway.execute(ApiRequest::post("/auth/logout")).await
    }

    async fn register(&self, request: &RegisterRequest) -> Result<Registered, ApiError> {
        self.gateway.post("/auth/register", request).await
    }
}
