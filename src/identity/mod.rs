//! Identity core: session lifecycle and the route access gate.
//! Keep the public surface thin and split implementation across sub-modules.

mod authorizer;
mod principal;
mod provider;
mod session;

pub use authorizer::{allowed_paths, can_access, decide_route, RouteDecision, NAV_ROUTES};
pub use principal::{Role, Session};
pub use provider::{normalize_identity, Identity};
pub use session::SessionStore;
