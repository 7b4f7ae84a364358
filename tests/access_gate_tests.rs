//! Access gate tests: the static role table, prefix matching, and the
//! per-navigation decision including the end-to-end login scenarios.

use serde_json::json;
use tempfile::tempdir;

use siteboard::identity::{
    allowed_paths, can_access, decide_route, Role, RouteDecision, SessionStore, NAV_ROUTES,
};

fn login_payload(role: &str) -> serde_json::Value {
    json!({
        "token": "tok-test",
        "role": role,
        "user": { "id": "u-1", "name": "Test User", "email": "t@example.com" }
    })
}

#[test]
fn table_cases_from_the_role_matrix() {
    assert!(!can_access("/employees", Role::Staff));
    assert!(can_access("/employees", Role::Admin));
    assert!(!can_access("/employees", Role::Manager));
    assert!(can_access("/projects", Role::Manager));
    assert!(!can_access("/projects", Role::Staff));
    assert!(can_access("/tasks", Role::Staff));
    assert!(can_access("/about", Role::Staff));
}

#[test]
fn nested_subroutes_ride_on_the_section_prefix() {
    assert!(can_access("/tasks/99", Role::Staff));
    assert!(can_access("/projects/12/edit", Role::Manager));
    assert!(!can_access("/employees/3", Role::Staff));
}

#[test]
fn partial_string_prefixes_do_not_match() {
    // "/task" must not ride on an allowed "/tasks"
    assert!(!can_access("/task", Role::Staff));
    assert!(!can_access("/tasksX", Role::Staff));
    assert!(!can_access("/dashboards", Role::Admin));
}

#[test]
fn decisions_are_deterministic() {
    for _ in 0..3 {
        assert!(can_access("/inventory", Role::Manager));
        assert!(!can_access("/inventory", Role::Staff));
    }
}

#[test]
fn every_nav_route_has_an_audience() {
    for route in NAV_ROUTES {
        let reachable = [Role::Admin, Role::Manager, Role::Staff]
            .iter()
            .any(|r| can_access(route, *r));
        assert!(reachable, "orphaned route: {}", route);
    }
}

#[test]
fn admin_table_covers_every_nav_route() {
    for route in NAV_ROUTES {
        assert!(allowed_paths(Role::Admin).contains(route));
    }
}

#[test]
fn unauthenticated_navigation_redirects_to_login() {
    let tmp = tempdir().unwrap();
    let store = SessionStore::open(tmp.path());
    assert_eq!(decide_route(&store, "/dashboard"), RouteDecision::Login);
    assert_eq!(decide_route(&store, "/employees"), RouteDecision::Login);
}

#[test]
fn manager_is_redirected_away_from_employees() {
    let tmp = tempdir().unwrap();
    let store = SessionStore::open(tmp.path());
    store.login(&login_payload("MANAGER")).unwrap();

    assert_eq!(store.current_role(), Some(Role::Manager));
    assert!(!can_access("/employees", Role::Manager));
    assert_eq!(decide_route(&store, "/employees"), RouteDecision::Dashboard);
}

#[test]
fn admin_reaches_inventory() {
    let tmp = tempdir().unwrap();
    let store = SessionStore::open(tmp.path());
    store.login(&login_payload("ADMIN")).unwrap();

    assert!(can_access("/inventory", Role::Admin));
    assert_eq!(
        decide_route(&store, "/inventory"),
        RouteDecision::Render("/inventory".to_string())
    );
}

#[test]
fn logout_drops_back_to_login_redirects() {
    let tmp = tempdir().unwrap();
    let store = SessionStore::open(tmp.path());
    store.login(&login_payload("staff")).unwrap();
    assert_eq!(
        decide_route(&store, "/tasks/99"),
        RouteDecision::Render("/tasks/99".to_string())
    );

    store.logout();
    assert_eq!(decide_route(&store, "/tasks/99"), RouteDecision::Login);
}
