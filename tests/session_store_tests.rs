//! Session store tests: restore round-trips across a simulated restart,
//! logout idempotence, and fail-safe handling of corrupt persisted data.

use std::fs;

use serde_json::json;
use tempfile::tempdir;

use siteboard::identity::{Role, SessionStore};
use siteboard::profile_paths;

fn payload(role: &str) -> serde_json::Value {
    json!({
        "token": "tok-abc",
        "role": role,
        "user": { "id": 7, "name": "Dana", "email": "dana@example.com" }
    })
}

#[test]
fn login_then_restore_round_trips() {
    for role in ["ADMIN", "Manager", "EMPLOYEE", "staff"] {
        let tmp = tempdir().unwrap();
        let store = SessionStore::open(tmp.path());
        let session = store.login(&payload(role)).unwrap();
        assert!(store.is_authenticated());

        // simulate a restart: a fresh store over the same profile dir
        let reopened = SessionStore::open(tmp.path());
        assert!(!reopened.is_authenticated());
        assert!(reopened.restore());
        assert_eq!(reopened.current(), Some(session));
        assert_eq!(reopened.token().as_deref(), Some("tok-abc"));
    }
}

#[test]
fn employee_alias_normalizes_to_staff() {
    let tmp = tempdir().unwrap();
    let store = SessionStore::open(tmp.path());
    let session = store.login(&payload("EMPLOYEE")).unwrap();
    assert_eq!(session.role, Role::Staff);
    assert_eq!(store.current_role(), Some(Role::Staff));
}

#[test]
fn manager_case_folds() {
    let tmp = tempdir().unwrap();
    let store = SessionStore::open(tmp.path());
    store.login(&payload("MANAGER")).unwrap();
    assert_eq!(store.current_role(), Some(Role::Manager));
}

#[test]
fn logout_twice_is_a_noop() {
    let tmp = tempdir().unwrap();
    let store = SessionStore::open(tmp.path());
    store.login(&payload("admin")).unwrap();

    store.logout();
    assert!(!store.is_authenticated());
    assert!(store.current().is_none());

    // second logout with no session: still fine, same empty state
    store.logout();
    assert!(!store.is_authenticated());
    assert!(store.token().is_none());
}

#[test]
fn logout_removes_the_persisted_profile() {
    let tmp = tempdir().unwrap();
    let store = SessionStore::open(tmp.path());
    store.login(&payload("admin")).unwrap();
    let file = profile_paths::session_file(tmp.path());
    assert!(file.exists());

    store.logout();
    assert!(!file.exists());

    let reopened = SessionStore::open(tmp.path());
    assert!(!reopened.restore());
}

#[test]
fn restore_with_corrupt_profile_is_logged_out() {
    let tmp = tempdir().unwrap();
    let file = profile_paths::session_file(tmp.path());
    fs::write(&file, b"{not json at all").unwrap();

    let store = SessionStore::open(tmp.path());
    assert!(!store.restore());
    assert!(!store.is_authenticated());
    assert!(store.current_role().is_none());
}

#[test]
fn restore_with_valid_json_but_bad_role_is_logged_out() {
    let tmp = tempdir().unwrap();
    let file = profile_paths::session_file(tmp.path());
    // hand-edited profile with a role outside the enumeration
    fs::write(
        &file,
        br#"{"session":{"user_id":"1","name":"x","email":"x@y","role":"supervisor"},"token":"t"}"#,
    )
    .unwrap();

    let store = SessionStore::open(tmp.path());
    assert!(!store.restore());
    assert!(!store.is_authenticated());
}

#[test]
fn restore_with_no_profile_is_logged_out() {
    let tmp = tempdir().unwrap();
    let store = SessionStore::open(tmp.path());
    assert!(!store.restore());
    assert!(!store.is_authenticated());
}

#[test]
fn login_without_a_role_is_rejected() {
    let tmp = tempdir().unwrap();
    let store = SessionStore::open(tmp.path());
    let raw = json!({ "token": "t", "user": { "id": 1, "name": "x" } });
    let err = store.login(&raw).unwrap_err();
    assert!(err.is_auth_failure());
    assert!(!store.is_authenticated());
    // nothing was persisted
    assert!(!profile_paths::session_file(tmp.path()).exists());
}

#[test]
fn login_with_unknown_role_is_rejected() {
    let tmp = tempdir().unwrap();
    let store = SessionStore::open(tmp.path());
    let err = store.login(&payload("SUPERVISOR")).unwrap_err();
    assert_eq!(err.code_str(), "unknown_role");
    assert!(!store.is_authenticated());
}

#[test]
fn profile_is_a_single_record_with_projected_role() {
    let tmp = tempdir().unwrap();
    let store = SessionStore::open(tmp.path());
    store.login(&payload("manager")).unwrap();

    let raw = fs::read(profile_paths::session_file(tmp.path())).unwrap();
    let val: serde_json::Value = serde_json::from_slice(&raw).unwrap();
    let obj = val.as_object().unwrap();
    // session record plus token, nothing else: no separate role copy to diverge
    assert_eq!(obj.len(), 2);
    assert!(obj.contains_key("session"));
    assert!(obj.contains_key("token"));
    assert_eq!(val["session"]["role"], "manager");
}
