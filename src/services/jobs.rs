//! Job postings.

use super::{PageRequest, push_filter};
use crate::error::ApiError;
use crate::net::Gateway;
use crate::net::types::{Job, JobInput, Paged};

/// Optional list filters. `skills` repeats the query key once per skill.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct JobFilters {
    pub location: Option<String>,
    pub level: Option<String>,
    pub skills: Vec<String>,
}

pub(crate) fn list_query(page: PageRequest, filters: &JobFilters) -> Vec<(String, String)> {
    let mut query = page.query();
    push_filter(&mut query, "location", filters.location.as_deref());
    push_filter(&mut query, "level", filters.level.as_deref());
    for skill in &filters.skills {
        push_filter(&mut query, "skills", Some(skill));
    }
    query
}

/// `GET /jobs`.
///
/// # Errors
///
/// Returns any gateway error.
pub async fn list(gateway: &Gateway, page: PageRequest, filters: &JobFilters) -> Result<Paged<Job>, ApiError> {
    gateway.get_with_query("/jobs", list_query(page, filters)).await
}

/// `GET /jobs/:id`.
///
/// # Errors
///
/// Returns any gateway error.
pub async fn get(gateway: &Gateway, id: &str) -> Result<Job, ApiError> {
    gateway.get(&format!("/jobs/{id}")).await
}

/// `POST /jobs`. Returns the created record's raw payload.
///
/// # Errors
///
/// Returns any gateway error.
pub async fn create(gateway: &Gateway, input: &JobInput) -> Result<serde_json::Value, ApiError> {
    gateway.post("/jobs", input).await
}

/// `PATCH /jobs/:id` with only the fields set in `input`.
///
/// # Errors
///
/// Returns any gateway error.
pub async fn update(gateway: &Gateway, id: &str, input: &JobInput) -> Result<serde_json::Value, ApiError> {
    gateway.patch(&format!("/jobs/{id}"), input).await
}

/// `DELETE /jobs/:id`.
///
/// # Errors
///
/// Returns any gateway error.
pub async fn delete(gateway: &Gateway, id: &str) -> Result<(), ApiError> {
    gateway.delete(&format!("/jobs/{id}")).await
}
