//! Wire DTOs for the job-board REST API.
//!
//! DESIGN
//! ======
//! Every endpoint wraps its payload in `{ statusCode, message, data }`. List
//! endpoints add `{ result, meta }` inside `data`, and `meta` comes in two
//! shapes depending on the resource; [`PageMeta`] accepts both and normalises
//! them. Backend identifiers arrive as `_id` and are exposed as `id`.

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;

use serde::{Deserialize, Serialize};

// =============================================================================
// ENVELOPE
// =============================================================================

/// Standard response envelope wrapping every backend payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    #[serde(default)]
    pub status_code: u16,
    /// Human-readable message; a string or, for validation failures, a list.
    #[serde(default)]
    pub message: serde_json::Value,
    pub data: T,
}

/// Paginated list payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Paged<T> {
    #[serde(default = "Vec::new")]
    pub result: Vec<T>,
    pub meta: PageMeta,
}

/// Normalised pagination metadata.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawPageMeta")]
pub struct PageMeta {
    pub current: u32,
    pub page_size: u32,
    pub pages: u32,
    pub total: u64,
}

/// Both meta layouts seen on the wire, merged field-by-field.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPageMeta {
    current: Option<u32>,
    page: Option<u32>,
    page_size: Option<u32>,
    limit: Option<u32>,
    pages: Option<u32>,
    total_pages: Option<u32>,
    total: Option<u64>,
    total_items: Option<u64>,
}

impl From<RawPageMeta> for PageMeta {
    fn from(raw: RawPageMeta) -> Self {
        Self {
            current: raw.current.or(raw.page).unwrap_or(1),
            page_size: raw.page_size.or(raw.limit).unwrap_or(0),
            pages: raw.pages.or(raw.total_pages).unwrap_or(1),
            total: raw.total.or(raw.total_items).unwrap_or(0),
        }
    }
}

/// Render an envelope `message` the way a form would display it.
#[must_use]
pub fn message_text(message: &serde_json::Value) -> String {
    match message {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

// =============================================================================
// IDENTITY
// =============================================================================

/// A single (method, path-pattern) grant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Permission {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: String,
    pub name: String,
    pub api_path: String,
    /// One of `GET`, `POST`, `PUT`, `PATCH`, `DELETE`.
    pub method: String,
    /// Free-text grouping tag.
    #[serde(default)]
    pub module: String,
}

impl Permission {
    /// True when this grant covers `method` on `api_path`.
    ///
    /// Pattern segments starting with `:` match any single concrete segment.
    #[must_use]
    pub fn matches(&self, method: &str, api_path: &str) -> bool {
        if !self.method.eq_ignore_ascii_case(method) {
            return false;
        }
        let pattern: Vec<&str> = self.api_path.trim_matches('/').split('/').collect();
        let actual: Vec<&str> = api_path.trim_matches('/').split('/').collect();
        pattern.len() == actual.len()
            && pattern
                .iter()
                .zip(&actual)
                .all(|(p, a)| p.starts_with(':') || p == a)
    }
}

/// A role's permission entry: the expanded record or just its id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PermissionGrant {
    Granted(Permission),
    Id(String),
}

impl PermissionGrant {
    /// Bare ids carry no method or path and never match.
    #[must_use]
    pub fn matches(&self, method: &str, api_path: &str) -> bool {
        match self {
            Self::Granted(permission) => permission.matches(method, api_path),
            Self::Id(_) => false,
        }
    }
}

/// Role reference embedded in the current user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleRef {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: String,
    /// Opaque role name (`SUPER_ADMIN`, `ADMIN`, `HR`, `USER`, ...).
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<PermissionGrant>>,
}

/// The authenticated account as returned by login and `/auth/account`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<RoleRef>,
}

impl User {
    /// Role name, if the backend sent a role.
    #[must_use]
    pub fn role_name(&self) -> Option<&str> {
        self.role.as_ref().map(|r| r.name.as_str())
    }

    /// True when any granted permission covers `method` on `api_path`.
    #[must_use]
    pub fn has_permission(&self, method: &str, api_path: &str) -> bool {
        self.role
            .as_ref()
            .and_then(|r| r.permissions.as_deref())
            .is_some_and(|grants| grants.iter().any(|g| g.matches(method, api_path)))
    }
}

/// Full role record from the roles resource.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_active: bool,
    /// Either expanded permission records or bare ids, depending on endpoint.
    #[serde(default)]
    pub permissions: Vec<PermissionGrant>,
}

// =============================================================================
// AUTH PAYLOADS
// =============================================================================

#[derive(Clone, Debug, Serialize)]
pub struct LoginRequest<'a> {
    /// The account email.
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct LoginData {
    pub access_token: String,
    pub user: User,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct AccountData {
    pub user: User,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct RefreshData {
    pub access_token: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    /// The backend expects the age as a string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// Acknowledgement of a created account.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registered {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

// =============================================================================
// JOB BOARD RESOURCES
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyRef {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub skills: Vec<String>,
    pub company: CompanyRef,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub salary: f64,
    #[serde(default)]
    pub quantity: u32,
    /// `INTERN`, `FRESHER`, `JUNIOR`, `MIDDLE` or `SENIOR`.
    #[serde(default)]
    pub level: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub is_active: bool,
}

/// Body for job create; every field optional doubles as the update body.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<String>>,
    /// Company id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeInput {
    /// Public URL of the uploaded CV.
    pub url: String,
    pub company_id: String,
    pub job_id: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resume {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub company_id: serde_json::Value,
    #[serde(default)]
    pub job_id: serde_json::Value,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscriber {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub skills: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriberInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<String>>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    /// Permission ids.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<String>>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,
}
