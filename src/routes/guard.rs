//! Navigation guard: decides from session state alone whether a view may
//! render. Performs no I/O; a stale token is caught later by the gateway's
//! refresh path.

#[cfg(test)]
#[path = "guard_test.rs"]
mod tests;

use crate::session::SessionRecord;

/// What a view requires of the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    Public,
    Authenticated,
    /// Authenticated and holding one of these role names.
    Roles(&'static [&'static str]),
}

/// Outcome of a guard check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    /// Not signed in: prove who you are.
    RedirectToLogin,
    /// Signed in but not permitted here.
    RedirectToHome,
}

/// Evaluate `access` against a session snapshot.
///
/// An authenticated session whose user has not been fetched yet has no role,
/// so role-gated views send it home rather than to login.
#[must_use]
pub fn evaluate(access: Access, session: &SessionRecord) -> GuardDecision {
    match access {
        Access::Public => GuardDecision::Allow,
        _ if !session.is_authenticated => GuardDecision::RedirectToLogin,
        Access::Authenticated => GuardDecision::Allow,
        Access::Roles(allowed) => match session.role_name() {
            Some(role) if allowed.iter().any(|r| *r == role) => GuardDecision::Allow,
            _ => GuardDecision::RedirectToHome,
        },
    }
}
