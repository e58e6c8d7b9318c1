//! Resume submissions.

use crate::error::ApiError;
use crate::net::Gateway;
use crate::net::transport::ApiRequest;
use crate::net::types::{Resume, ResumeInput};

/// `POST /resumes`: apply to a job with an already-uploaded CV URL.
///
/// # Errors
///
/// Returns any gateway error.
pub async fn create(gateway: &Gateway, input: &ResumeInput) -> Result<serde_json::Value, ApiError> {
    gateway.post("/resumes", input).await
}

/// `POST /resumes/by-user`: the caller's own submissions.
///
/// # Errors
///
/// Returns any gateway error.
pub async fn mine(gateway: &Gateway) -> Result<Vec<Resume>, ApiError> {
    Ok(gateway.send::<Vec<Resume>>(ApiRequest::post("/resumes/by-user")).await?.data)
}
