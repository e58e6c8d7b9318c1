//! User administration.

use serde::Serialize;

use super::PageRequest;
use crate::error::ApiError;
use crate::net::Gateway;
use crate::net::types::{Paged, User};

#[derive(Serialize)]
struct RoleChange<'a> {
    #[serde(rename = "_id")]
    id: &'a str,
    role: &'a str,
}

/// `GET /users`.
///
/// # Errors
///
/// Returns any gateway error.
pub async fn list(gateway: &Gateway, page: PageRequest) -> Result<Paged<User>, ApiError> {
    gateway.get_with_query("/users", page.query()).await
}

/// `PATCH /users` with `{ _id, role }`; `role_id` is the role's id.
///
/// # Errors
///
/// Returns any gateway error.
pub async fn update_role(gateway: &Gateway, user_id: &str, role_id: &str) -> Result<serde_json::Value, ApiError> {
    gateway.patch("/users", &RoleChange { id: user_id, role: role_id }).await
}

/// `DELETE /users/:id`.
///
/// # Errors
///
/// Returns any gateway error.
pub async fn delete(gateway: &Gateway, id: &str) -> Result<(), ApiError> {
    gateway.delete(&format!("/users/{id}")).await
}
