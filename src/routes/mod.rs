//! Route table and navigation.
//!
//! Every view is declared once in [`ROUTES`] with its [`Access`] requirement.
//! [`navigate`] resolves a path and runs the guard against a session
//! snapshot, producing either the route to render or a redirect target.

pub mod guard;
pub mod navigator;

#[cfg(test)]
#[path = "routes_test.rs"]
mod tests;

use std::collections::BTreeMap;

use tracing::debug;

pub use guard::{Access, GuardDecision, evaluate};
pub use navigator::{Navigator, TracingNavigator};

use crate::session::SessionRecord;

pub const HOME_PATH: &str = "/";
pub const LOGIN_PATH: &str = "/login";

/// Roles allowed into the admin panel.
pub const STAFF_ROLES: &[&str] = &["SUPER_ADMIN", "ADMIN", "HR"];

const STAFF: Access = Access::Roles(STAFF_ROLES);

/// A declared view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Route {
    pub pattern: &'static str,
    pub name: &'static str,
    pub access: Access,
}

const fn route(pattern: &'static str, name: &'static str, access: Access) -> Route {
    Route { pattern, name, access }
}

pub const ROUTES: &[Route] = &[
    route("/", "home", Access::Public),
    route("/login", "login", Access::Public),
    route("/register", "register", Access::Public),
    route("/jobs", "jobs", Access::Public),
    route("/jobs/:id", "job-detail", Access::Public),
    route("/companies", "companies", Access::Public),
    route("/companies/:id", "company-detail", Access::Public),
    route("/subscribe", "subscribe", Access::Public),
    route("/clear-cache", "clear-cache", Access::Public),
    route("/profile", "profile", Access::Authenticated),
    route("/my-resumes", "my-resumes", Access::Authenticated),
    route("/admin", "admin-dashboard", STAFF),
    route("/admin/jobs", "admin-jobs", STAFF),
    route("/admin/jobs/create", "admin-job-create", STAFF),
    route("/admin/jobs/:id/edit", "admin-job-edit", STAFF),
    route("/admin/companies", "admin-companies", STAFF),
    route("/admin/companies/create", "admin-company-create", STAFF),
    route("/admin/companies/:id/edit", "admin-company-edit", STAFF),
    route("/admin/resumes", "admin-resumes", STAFF),
    route("/admin/users", "admin-users", STAFF),
    route("/admin/roles", "admin-roles", STAFF),
    route("/admin/permissions", "admin-permissions", STAFF),
    route("/admin/subscribers", "admin-subscribers", STAFF),
];

/// A route matched against a concrete path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedRoute {
    pub route: Route,
    /// Values captured by `:name` segments.
    pub params: BTreeMap<String, String>,
}

/// Result of a navigation attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Navigation {
    Render(ResolvedRoute),
    Redirect(&'static str),
    /// No declared route matches; rendered as a public not-found view.
    NotFound,
}

/// Match `path` against the route table. Query strings and trailing slashes
/// are ignored; literal segments take precedence over `:param` captures.
#[must_use]
pub fn resolve(path: &str) -> Option<ResolvedRoute> {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let segments = split(path);
    let mut best: Option<(usize, ResolvedRoute)> = None;

    for route in ROUTES {
        let Some(params) = match_pattern(route.pattern, &segments) else {
            continue;
        };
        let literal = segments.len() - params.len();
        if best.as_ref().is_none_or(|(score, _)| literal > *score) {
            best = Some((literal, ResolvedRoute { route: *route, params }));
        }
    }
    best.map(|(_, resolved)| resolved)
}

/// Resolve `path` and run the guard against `session`.
#[must_use]
pub fn navigate(path: &str, session: &SessionRecord) -> Navigation {
    let Some(resolved) = resolve(path) else {
        debug!(path, "no route matches");
        return Navigation::NotFound;
    };
    match evaluate(resolved.route.access, session) {
        GuardDecision::Allow => Navigation::Render(resolved),
        GuardDecision::RedirectToLogin => {
            debug!(path, "navigation requires login");
            Navigation::Redirect(LOGIN_PATH)
        }
        GuardDecision::RedirectToHome => {
            debug!(path, role = ?session.role_name(), "navigation denied for role");
            Navigation::Redirect(HOME_PATH)
        }
    }
}

fn split(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

fn match_pattern(pattern: &str, segments: &[&str]) -> Option<BTreeMap<String, String>> {
    let parts = split(pattern);
    if parts.len() != segments.len() {
        return None;
    }
    let mut params = BTreeMap::new();
    for (part, segment) in parts.iter().zip(segments) {
        if let Some(name) = part.strip_prefix(':') {
            params.insert(name.to_owned(), (*segment).to_owned());
        } else if part != segment {
            return None;
        }
    }
    Some(params)
}
