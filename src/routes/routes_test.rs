use super::*;
use crate::net::types::{RoleRef, User};

fn session_with_role(role: &str) -> SessionRecord {
    SessionRecord {
        user: Some(User {
            id: "1".into(),
            name: "A".into(),
            email: String::new(),
            age: None,
            gender: None,
            address: None,
            role: Some(RoleRef { id: "r".into(), name: role.into(), permissions: None }),
        }),
        access_token: Some("abc".into()),
        is_authenticated: true,
    }
}

// =============================================================================
// resolve
// =============================================================================

#[test]
fn resolves_root() {
    assert_eq!(resolve("/").unwrap().route.name, "home");
}

#[test]
fn captures_params() {
    let resolved = resolve("/jobs/42").unwrap();
    assert_eq!(resolved.route.name, "job-detail");
    assert_eq!(resolved.params.get("id").map(String::as_str), Some("42"));
}

#[test]
fn literal_segment_beats_param() {
    assert_eq!(resolve("/admin/jobs/create").unwrap().route.name, "admin-job-create");
    assert_eq!(resolve("/admin/jobs/7/edit").unwrap().route.name, "admin-job-edit");
}

#[test]
fn ignores_query_and_trailing_slash() {
    assert_eq!(resolve("/companies/?page=2").unwrap().route.name, "companies");
}

#[test]
fn unknown_path_is_none() {
    assert!(resolve("/nowhere").is_none());
    assert!(resolve("/jobs/1/extra").is_none());
}

#[test]
fn every_pattern_resolves_to_itself() {
    for route in ROUTES {
        let concrete = route.pattern.replace(":id", "x1");
        assert_eq!(resolve(&concrete).map(|r| r.route.name), Some(route.name), "{}", route.pattern);
    }
}

// =============================================================================
// navigate
// =============================================================================

#[test]
fn anonymous_profile_redirects_to_login() {
    assert_eq!(navigate("/profile", &SessionRecord::default()), Navigation::Redirect(LOGIN_PATH));
}

#[test]
fn user_role_on_admin_redirects_home() {
    assert_eq!(navigate("/admin/users", &session_with_role("USER")), Navigation::Redirect(HOME_PATH));
}

#[test]
fn staff_roles_reach_admin() {
    for role in STAFF_ROLES {
        assert!(matches!(navigate("/admin", &session_with_role(role)), Navigation::Render(_)), "{role}");
    }
}

#[test]
fn public_routes_render_for_anonymous() {
    match navigate("/companies/c1", &SessionRecord::default()) {
        Navigation::Render(resolved) => assert_eq!(resolved.params["id"], "c1"),
        other => panic!("expected render, got {other:?}"),
    }
}

#[test]
fn unknown_route_is_not_found() {
    assert_eq!(navigate("/missing", &SessionRecord::default()), Navigation::NotFound);
}
