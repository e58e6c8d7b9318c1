//! Roles.

use super::PageRequest;
use crate::error::ApiError;
use crate::net::Gateway;
use crate::net::types::{Paged, Role, RoleInput};

/// # Errors
///
/// Returns any gateway error.
pub async fn list(gateway: &Gateway, page: PageRequest) -> Result<Paged<Role>, ApiError> {
    gateway.get_with_query("/roles", page.query()).await
}

/// # Errors
///
/// Returns any gateway error.
pub async fn get(gateway: &Gateway, id: &str) -> Result<Role, ApiError> {
    gateway.get(&format!("/roles/{id}")).await
}

/// # Errors
///
/// Returns any gateway error.
pub async fn create(gateway: &Gateway, input: &RoleInput) -> Result<serde_json::Value, ApiError> {
    gateway.post("/roles", input).await
}

/// # Errors
///
/// Returns any gateway error.
pub async fn update(gateway: &Gateway, id: &str, input: &RoleInput) -> Result<serde_json::Value, ApiError> {
    gateway.patch(&format!("/roles/{id}"), input).await
}

/// # Errors
///
/// Returns any gateway error.
pub async fn delete(gateway: &Gateway, id: &str) -> Result<(), ApiError> {
    gateway.delete(&format!("/roles/{id}")).await
}
