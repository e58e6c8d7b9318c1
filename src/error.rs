//! Error types for the session core and its HTTP pipeline.
//!
//! ERROR HANDLING
//! ==============
//! Foreign errors (reqwest, io) are flattened into `String` payloads at the
//! transport boundary so test doubles can construct every variant. The
//! backend's envelope `message` field is carried through untouched so callers
//! (login forms, CLI output) can show it verbatim.

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;

/// Errors produced by durable key-value storage.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The backing file could not be read or written.
    #[error("storage io failed: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file or a stored record is not valid JSON.
    #[error("storage json invalid: {0}")]
    Json(#[from] serde_json::Error),

    /// The cookie jar could not be serialized.
    #[error("cookie jar invalid: {0}")]
    Cookies(String),
}

/// Errors produced by API calls routed through the gateway.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response (DNS, connect, reset, timeout).
    #[error("network error: {0}")]
    Network(String),

    /// The backend answered with a non-success status.
    #[error("request failed with status {status}: {message}")]
    Status { status: u16, message: String, body: String },

    /// A request body could not be serialized.
    #[error("request encode failed: {0}")]
    Encode(String),

    /// The response body did not match the expected envelope shape.
    #[error("response decode failed: {0}")]
    Decode(String),

    /// The silent token refresh failed; the session has been torn down.
    #[error("token refresh failed: {0}")]
    RefreshFailed(Box<ApiError>),

    /// Durable session storage failed.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

impl ApiError {
    /// HTTP status carried by this error, looking through refresh failures.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::RefreshFailed(inner) => inner.status(),
            _ => None,
        }
    }

    /// True for a plain 401 response (not a wrapped refresh failure).
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Status { status: 401, .. })
    }

    /// The user-facing message: the envelope `message` for status errors,
    /// otherwise the display form.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Status { message, .. } => message.clone(),
            Self::RefreshFailed(inner) => inner.message(),
            other => other.to_string(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        Self::Network(e.to_string())
    }
}
