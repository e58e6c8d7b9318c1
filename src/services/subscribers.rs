//! Job-alert subscribers.

use super::PageRequest;
use crate::error::ApiError;
use crate::net::Gateway;
use crate::net::types::{Paged, Subscriber, SubscriberInput};

/// # Errors
///
/// Returns any gateway error.
pub async fn list(gateway: &Gateway, page: PageRequest) -> Result<Paged<Subscriber>, ApiError> {
    gateway.get_with_query("/subscribers", page.query()).await
}

/// # Errors
///
/// Returns any gateway error.
pub async fn get(gateway: &Gateway, id: &str) -> Result<Subscriber, ApiError> {
    gateway.get(&format!("/subscribers/{id}")).await
}

/// `POST /subscribers`: subscribe the current user to job alerts.
///
/// # Errors
///
/// Returns any gateway error.
pub async fn create(gateway: &Gateway, input: &SubscriberInput) -> Result<serde_json::Value, ApiError> {
    gateway.post("/subscribers", input).await
}

/// # Errors
///
/// Returns any gateway error.
pub async fn update(gateway: &Gateway, id: &str, input: &SubscriberInput) -> Result<serde_json::Value, ApiError> {
    gateway.patch(&format!("/subscribers/{id}"), input).await
}

/// # Errors
///
/// Returns any gateway error.
pub async fn delete(gateway: &Gateway, id: &str) -> Result<(), ApiError> {
    gateway.delete(&format!("/subscribers/{id}")).await
}
