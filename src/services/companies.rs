//! Companies. Updates go to the collection path with the id in the body.

use serde::Serialize;

use super::{PageRequest, push_filter};
use crate::error::ApiError;
use crate::net::Gateway;
use crate::net::types::{Company, CompanyInput, Paged};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CompanyFilters {
    pub search: Option<String>,
    pub name: Option<String>,
    pub address: Option<String>,
}

#[derive(Serialize)]
struct CompanyUpdate<'a> {
    #[serde(rename = "_id")]
    id: &'a str,
    #[serde(flatten)]
    input: &'a CompanyInput,
}

pub(crate) fn list_query(page: PageRequest, filters: &CompanyFilters) -> Vec<(String, String)> {
    let mut query = page.query();
    push_filter(&mut query, "search", filters.search.as_deref());
    push_filter(&mut query, "name", filters.name.as_deref());
    push_filter(&mut query, "address", filters.address.as_deref());
    query
}

/// `GET /companies`.
///
/// # Errors
///
/// Returns any gateway error.
pub async fn list(
    gateway: &Gateway,
    page: PageRequest,
    filters: &CompanyFilters,
) -> Result<Paged<Company>, ApiError> {
    gateway.get_with_query("/companies", list_query(page, filters)).await
}

/// `GET /companies/:id`.
///
/// # Errors
///
/// Returns any gateway error.
pub async fn get(gateway: &Gateway, id: &str) -> Result<Company, ApiError> {
    gateway.get(&format!("/companies/{id}")).await
}

/// `POST /companies`.
///
/// # Errors
///
/// Returns any gateway error.
pub async fn create(gateway: &Gateway, input: &CompanyInput) -> Result<serde_json::Value, ApiError> {
    gateway.post("/companies", input).await
}

/// `PATCH /companies` with `{ _id, ...input }`.
///
/// # Errors
///
/// Returns any gateway error.
pub async fn update(gateway: &Gateway, id: &str, input: &CompanyInput) -> Result<serde_json::Value, ApiError> {
    gateway.patch("/companies", &CompanyUpdate { id, input }).await
}

/// `DELETE /companies/:id`.
///
/// # Errors
///
/// Returns any gateway error.
pub async fn delete(gateway: &Gateway, id: &str) -> Result<(), ApiError> {
    gateway.delete(&format!("/companies/{id}")).await
}
