//! Boundary conversion of raw identity payloads from the auth endpoint.
//! Deployments vary in shape: the role and bearer token sit at the top level
//! while user attributes may be flat or nested under `user`, and ids arrive
//! as `id` or `userId`. Everything is validated here, once, into a strict
//! `Session`; nothing downstream sees the raw payload.

use serde_json::Value;

use crate::error::{AppError, AppResult};

use super::principal::{Role, Session};

/// Normalized output of a login reply: the canonical session plus the bearer
/// token that accompanies it.
#[derive(Debug, Clone)]
pub struct Identity {
    pub session: Session,
    pub token: String,
}

pub fn normalize_identity(raw: &Value) -> AppResult<Identity> {
    let user = raw.get("user").unwrap_or(raw);

    let role_str = raw
        .get("role")
        .or_else(|| user.get("role"))
        .and_then(Value::as_str)
        .ok_or_else(|| AppError::auth("missing_role", "login reply carried no role"))?;
    let role = Role::parse(role_str).ok_or_else(|| {
        AppError::auth("unknown_role", format!("unrecognized role '{}'", role_str))
    })?;

    let session = Session {
        user_id: pick_id(user).or_else(|| pick_id(raw)).unwrap_or_default(),
        name: pick_str(user, "name").unwrap_or_default(),
        email: pick_str(user, "email")
            .or_else(|| pick_str(raw, "email"))
            .unwrap_or_default(),
        role,
        avatar: pick_str(user, "avatar"),
    };
    let token = pick_str(raw, "token").unwrap_or_default();

    Ok(Identity { session, token })
}

// ids arrive as strings or numbers depending on the endpoint
fn pick_id(v: &Value) -> Option<String> {
    let id = v.get("id").or_else(|| v.get("userId"))?;
    match id {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn pick_str(v: &Value, key: &str) -> Option<String> {
    v.get(key).and_then(Value::as_str).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn normalizes_nested_login_reply() {
        let raw = json!({
            "token": "tok-1",
            "role": "MANAGER",
            "user": { "id": 42, "name": "Priya", "email": "priya@example.com" }
        });
        let ident = normalize_identity(&raw).unwrap();
        assert_eq!(ident.session.user_id, "42");
        assert_eq!(ident.session.role, Role::Manager);
        assert_eq!(ident.token, "tok-1");
    }

    #[test]
    fn normalizes_flat_payload_with_user_id_alias() {
        let raw = json!({
            "userId": "u-7", "name": "Sam", "email": "sam@example.com",
            "role": "employee", "token": "tok-2", "avatar": "a.png"
        });
        let ident = normalize_identity(&raw).unwrap();
        assert_eq!(ident.session.user_id, "u-7");
        assert_eq!(ident.session.role, Role::Staff);
        assert_eq!(ident.session.avatar.as_deref(), Some("a.png"));
    }

    #[test]
    fn missing_role_is_an_auth_error() {
        let err = normalize_identity(&json!({"user": {"id": 1, "name": "x"}})).unwrap_err();
        assert!(err.is_auth_failure());
    }

    #[test]
    fn unknown_role_is_rejected_not_stored() {
        let raw = json!({"role": "SUPERVISOR", "user": {"id": 1, "name": "x"}});
        let err = normalize_identity(&raw).unwrap_err();
        assert!(err.is_auth_failure());
        assert_eq!(err.code_str(), "unknown_role");
    }
}
