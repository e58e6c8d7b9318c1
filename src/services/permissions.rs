//! Permission grants.

use super::PageRequest;
use crate::error::ApiError;
use crate::net::Gateway;
use crate::net::types::{Paged, Permission, PermissionInput};

/// # Errors
///
/// Returns any gateway error.
pub async fn list(gateway: &Gateway, page: PageRequest) -> Result<Paged<Permission>, ApiError> {
    gateway.get_with_query("/permissions", page.query()).await
}

/// # Errors
///
/// Returns any gateway error.
pub async fn get(gateway: &Gateway, id: &str) -> Result<Permission, ApiError> {
    gateway.get(&format!("/permissions/{id}")).await
}

/// # Errors
///
/// Returns any gateway error.
pub async fn create(gateway: &Gateway, input: &PermissionInput) -> Result<serde_json::Value, ApiError> {
    gateway.post("/permissions", input).await
}

/// # Errors
///
/// Returns any gateway error.
pub async fn update(gateway: &Gateway, id: &str, input: &PermissionInput) -> Result<serde_json::Value, ApiError> {
    gateway.patch(&format!("/permissions/{id}"), input).await
}

/// # Errors
///
/// Returns any gateway error.
pub async fn delete(gateway: &Gateway, id: &str) -> Result<(), ApiError> {
    gateway.delete(&format!("/permissions/{id}")).await
}
