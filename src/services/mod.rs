//! Typed API callers. Each is a thin function set over the [`Gateway`].
//!
//! [`Gateway`]: crate::net::Gateway

pub mod auth;
pub mod companies;
pub mod jobs;
pub mod permissions;
pub mod resumes;
pub mod roles;
pub mod subscribers;
pub mod users;

#[cfg(test)]
#[path = "services_test.rs"]
mod tests;

/// One page of a list endpoint, sent as `current` and `pageSize`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageRequest {
    pub current: u32,
    pub page_size: u32,
}

impl PageRequest {
    #[must_use]
    pub fn new(current: u32, page_size: u32) -> Self {
        Self { current: current.max(1), page_size: page_size.max(1) }
    }

    pub(crate) fn query(self) -> Vec<(String, String)> {
        vec![("current".to_owned(), self.current.to_string()), ("pageSize".to_owned(), self.page_size.to_string())]
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, 10)
    }
}

/// Append `key=value` when `value` is present and not blank.
pub(crate) fn push_filter(query: &mut Vec<(String, String)>, key: &str, value: Option<&str>) {
    if let Some(v) = value.map(str::trim).filter(|v| !v.is_empty()) {
        query.push((key.to_owned(), v.to_owned()));
    }
}
