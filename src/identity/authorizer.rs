//! Route access gate: a static role → allowed-path table and the per-attempt
//! navigation decision. Decisions are pure lookups over resident state; no
//! network round-trip is ever required to decide access.

use super::principal::Role;
use super::session::SessionStore;

/// Routes exposed in the navigation surface. Every entry must be reachable by
/// at least one role (the no-orphaned-routes test keeps this honest).
pub const NAV_ROUTES: &[&str] = &[
    "/dashboard",
    "/projects",
    "/employees",
    "/inventory",
    "/tasks",
    "/about",
];

/// Allowed route prefixes per role. Immutable, defined once.
pub fn allowed_paths(role: Role) -> &'static [&'static str] {
    match role {
        Role::Admin => &[
            "/dashboard",
            "/projects",
            "/employees",
            "/inventory",
            "/tasks",
            "/about",
        ],
        Role::Manager => &["/dashboard", "/projects", "/inventory", "/tasks", "/about"],
        Role::Staff => &["/dashboard", "/tasks", "/about"],
    }
}

/// True iff `path` equals an allowed prefix, or is a nested sub-route under
/// one. Exact equality first; the separator check keeps `/task` from riding
/// on an allowed `/tasks`.
pub fn can_access(path: &str, role: Role) -> bool {
    allowed_paths(role).iter().any(|allowed| {
        path.strip_prefix(allowed)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
    })
}

/// Outcome of a single navigation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// No usable session: send the user to the login prompt.
    Login,
    /// Authenticated but not permitted: silent redirect to the landing view.
    Dashboard,
    /// Permitted: render the requested path.
    Render(String),
}

/// Evaluate one navigation attempt against the current session. Fail-closed:
/// a missing session or missing role redirects to login, a denied path
/// redirects to the dashboard.
pub fn decide_route(store: &SessionStore, path: &str) -> RouteDecision {
    if !store.is_authenticated() {
        return RouteDecision::Login;
    }
    let Some(role) = store.current_role() else {
        return RouteDecision::Login;
    };
    if can_access(path, role) {
        RouteDecision::Render(path.to_string())
    } else {
        RouteDecision::Dashboard
    }
}
