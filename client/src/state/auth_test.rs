use futures::executor::block_on;

use super::*;
use crate::net::backend::Method;
use crate::net::fake::FakeBackend;
use crate::net::transport::TransportError;
use crate::state::session::MemoryTokenStore;

const BASE: &str = "https://api.example.com";
const ALICE: &str = r#"{"id":1,"username":"alice","email":"alice@example.com"}"#;

fn controller(store: &MemoryTokenStore) -> (AuthController<FakeBackend, MemoryTokenStore>, FakeBackend) {
    let backend = FakeBackend::default();
    let transport = Transport::new(BASE, backend.clone(), store.clone());
    (AuthController::new(transport), backend)
}

fn creds() -> Credentials {
    Credentials { username: "alice".to_owned(), password: "correct horse".to_owned() }
}

fn alice() -> UserProfile {
    serde_json::from_str(ALICE).unwrap()
}

// =============================================================
// check_status
// =============================================================

#[test]
fn check_status_without_token_is_anonymous_and_offline() {
    let store = MemoryTokenStore::default();
    let (ctrl, backend) = controller(&store);
    assert_eq!(block_on(ctrl.check_status()), AuthStatus::Anonymous);
    assert!(backend.sent().is_empty());
}

#[test]
fn check_status_with_valid_token_is_authenticated_with_profile() {
    let store = MemoryTokenStore::with_token("abc");
    let (ctrl, backend) = controller(&store);
    backend.respond(Method::Get, ME_PATH, 200, ALICE);
    assert_eq!(block_on(ctrl.check_status()), AuthStatus::Authenticated { profile: Some(alice()) });
    assert_eq!(backend.sent()[0].header("Authorization"), Some("Bearer abc"));
}

#[test]
fn check_status_is_idempotent() {
    let store = MemoryTokenStore::with_token("abc");
    let (ctrl, backend) = controller(&store);
    backend.respond(Method::Get, ME_PATH, 200, ALICE);
    let first = block_on(ctrl.check_status());
    let second = block_on(ctrl.check_status());
    assert_eq!(first, second);
    assert!(second.is_authenticated());
}

#[test]
fn check_status_rejected_token_is_anonymous_and_keeps_stale_token() {
    let store = MemoryTokenStore::with_token("expired");
    let (ctrl, backend) = controller(&store);
    backend.respond(Method::Get, ME_PATH, 401, r#"{"detail":"Token verification failed."}"#);
    assert_eq!(block_on(ctrl.check_status()), AuthStatus::Anonymous);
    assert_eq!(store.get_token().as_deref(), Some("expired"));
    assert_eq!(backend.sent().len(), 1);
}

#[test]
fn check_status_network_failure_is_anonymous() {
    let store = MemoryTokenStore::with_token("abc");
    let (ctrl, backend) = controller(&store);
    backend.fail(Method::Get, ME_PATH, TransportError::Network("refused".to_owned()));
    assert_eq!(block_on(ctrl.check_status()), AuthStatus::Anonymous);
}

#[test]
fn check_status_success_without_profile_body_is_still_authenticated() {
    let store = MemoryTokenStore::with_token("abc");
    let (ctrl, backend) = controller(&store);
    backend.respond(Method::Get, ME_PATH, 200, "ok");
    assert_eq!(block_on(ctrl.check_status()), AuthStatus::Authenticated { profile: None });
}

// =============================================================
// login
// =============================================================

#[test]
fn login_stores_token_and_authenticates() {
    let store = MemoryTokenStore::default();
    let (ctrl, backend) = controller(&store);
    backend
        .respond(Method::Post, LOGIN_PATH, 200, r#"{"access_token":"abc","token_type":"bearer"}"#)
        .respond(Method::Get, ME_PATH, 200, ALICE);

    let status = block_on(ctrl.login(&creds())).unwrap();
    assert_eq!(status, AuthStatus::Authenticated { profile: Some(alice()) });
    assert_eq!(store.get_token().as_deref(), Some("abc"));
    assert_eq!(backend.sent_routes(), vec!["POST /login", "GET /user/me"]);
    assert_eq!(backend.sent()[1].header("Authorization"), Some("Bearer abc"));
}

#[test]
fn login_posts_credentials_as_json() {
    let store = MemoryTokenStore::default();
    let (ctrl, backend) = controller(&store);
    backend.respond(Method::Post, LOGIN_PATH, 401, r#"{"detail":"Invalid username or password."}"#);
    let _ = block_on(ctrl.login(&creds()));
    let body: serde_json::Value = serde_json::from_str(backend.sent()[0].body.as_deref().unwrap()).unwrap();
    assert_eq!(body, serde_json::json!({ "username": "alice", "password": "correct horse" }));
}

#[test]
fn login_success_without_token_is_not_authenticated() {
    let store = MemoryTokenStore::default();
    let (ctrl, backend) = controller(&store);
    backend.respond(Method::Post, LOGIN_PATH, 200, r#"{"message":"welcome"}"#);
    assert_eq!(block_on(ctrl.login(&creds())), Err(AuthError::MissingToken));
    assert_eq!(store.get_token(), None);
    assert_eq!(backend.sent_routes(), vec!["POST /login"]);
}

#[test]
fn login_success_with_empty_or_non_string_token_is_not_authenticated() {
    for body in [r#"{"access_token":""}"#, r#"{"access_token":42}"#, "token=abc"] {
        let store = MemoryTokenStore::default();
        let (ctrl, backend) = controller(&store);
        backend.respond(Method::Post, LOGIN_PATH, 200, body);
        assert_eq!(block_on(ctrl.login(&creds())), Err(AuthError::MissingToken), "body: {body}");
        assert_eq!(store.get_token(), None);
    }
}

#[test]
fn login_rejection_surfaces_server_detail() {
    let store = MemoryTokenStore::default();
    let (ctrl, backend) = controller(&store);
    backend.respond(Method::Post, LOGIN_PATH, 401, r#"{"detail":"Invalid username or password."}"#);
    assert_eq!(
        block_on(ctrl.login(&creds())),
        Err(AuthError::Rejected("Invalid username or password.".to_owned()))
    );
    assert_eq!(store.get_token(), None);
}

#[test]
fn login_rejection_without_detail_uses_generic_message() {
    let store = MemoryTokenStore::default();
    let (ctrl, backend) = controller(&store);
    backend.respond(Method::Post, LOGIN_PATH, 500, "{}");
    assert_eq!(block_on(ctrl.login(&creds())), Err(AuthError::Rejected("Login failed".to_owned())));
}

#[test]
fn login_network_failure_reports_network_error() {
    let store = MemoryTokenStore::default();
    let (ctrl, backend) = controller(&store);
    backend.fail(Method::Post, LOGIN_PATH, TransportError::Network("dns".to_owned()));
    assert_eq!(
        block_on(ctrl.login(&creds())),
        Err(AuthError::Rejected("Network error occurred".to_owned()))
    );
}

#[test]
fn login_failed_profile_lookup_still_authenticates_without_profile() {
    let store = MemoryTokenStore::default();
    let (ctrl, backend) = controller(&store);
    backend
        .respond(Method::Post, LOGIN_PATH, 200, r#"{"access_token":"abc"}"#)
        .respond(Method::Get, ME_PATH, 500, "Internal Server Error");
    assert_eq!(block_on(ctrl.login(&creds())), Ok(AuthStatus::Authenticated { profile: None }));
    assert_eq!(store.get_token().as_deref(), Some("abc"));
}

#[test]
fn login_replaces_stale_token() {
    let store = MemoryTokenStore::with_token("stale");
    let (ctrl, backend) = controller(&store);
    backend
        .respond(Method::Post, LOGIN_PATH, 200, r#"{"access_token":"fresh"}"#)
        .respond(Method::Get, ME_PATH, 200, ALICE);
    block_on(ctrl.login(&creds())).unwrap();
    assert_eq!(store.get_token().as_deref(), Some("fresh"));
}

// =============================================================
// signup
// =============================================================

#[test]
fn signup_is_pass_through_and_keeps_state() {
    let store = MemoryTokenStore::default();
    let (ctrl, backend) = controller(&store);
    backend.respond(Method::Post, SIGNUP_PATH, 200, r#"{"message":"User created successfully."}"#);
    let request = SignupRequest {
        username: "alice".to_owned(),
        email: "alice@example.com".to_owned(),
        password: "longenough".to_owned(),
    };
    assert_eq!(block_on(ctrl.signup(&request)), Ok("User created successfully.".to_owned()));
    assert_eq!(store.get_token(), None);
    assert_eq!(backend.sent_routes(), vec!["POST /signup"]);
}

#[test]
fn signup_success_without_message_uses_default() {
    let store = MemoryTokenStore::default();
    let (ctrl, backend) = controller(&store);
    backend.respond(Method::Post, SIGNUP_PATH, 201, "");
    let request = SignupRequest {
        username: "bob".to_owned(),
        email: "bob@example.com".to_owned(),
        password: "longenough".to_owned(),
    };
    assert_eq!(block_on(ctrl.signup(&request)), Ok(SIGNUP_SUCCEEDED.to_owned()));
}

#[test]
fn signup_conflict_surfaces_detail() {
    let store = MemoryTokenStore::default();
    let (ctrl, backend) = controller(&store);
    backend.respond(Method::Post, SIGNUP_PATH, 400, r#"{"detail":"Username or email already exists."}"#);
    let request = SignupRequest {
        username: "alice".to_owned(),
        email: "alice@example.com".to_owned(),
        password: "longenough".to_owned(),
    };
    assert_eq!(
        block_on(ctrl.signup(&request)),
        Err(AuthError::Rejected("Username or email already exists.".to_owned()))
    );
}

// =============================================================
// logout
// =============================================================

#[test]
fn logout_clears_token_and_notifies_server_with_previous_token() {
    let store = MemoryTokenStore::with_token("abc");
    let (ctrl, backend) = controller(&store);
    backend.respond(Method::Post, LOGOUT_PATH, 200, "{}");
    assert_eq!(block_on(ctrl.logout()), AuthStatus::Anonymous);
    assert_eq!(store.get_token(), None);
    assert_eq!(backend.sent()[0].header("Authorization"), Some("Bearer abc"));
}

#[test]
fn logout_is_anonymous_even_when_server_call_fails() {
    let store = MemoryTokenStore::with_token("abc");
    let (ctrl, backend) = controller(&store);
    backend.fail(Method::Post, LOGOUT_PATH, TransportError::Network("timeout".to_owned()));
    assert_eq!(block_on(ctrl.logout()), AuthStatus::Anonymous);
    assert_eq!(store.get_token(), None);
}

#[test]
fn logout_is_anonymous_when_endpoint_missing() {
    let store = MemoryTokenStore::with_token("abc");
    let (ctrl, _backend) = controller(&store);
    assert_eq!(block_on(ctrl.logout()), AuthStatus::Anonymous);
    assert!(!ctrl.has_token());
}

#[test]
fn sign_out_clears_before_any_network_call() {
    let store = MemoryTokenStore::with_token("abc");
    let (ctrl, backend) = controller(&store);
    assert_eq!(ctrl.sign_out().as_deref(), Some("abc"));
    assert_eq!(store.get_token(), None);
    assert!(backend.sent().is_empty());
}

#[test]
fn check_after_logout_is_anonymous() {
    let store = MemoryTokenStore::with_token("abc");
    let (ctrl, backend) = controller(&store);
    backend.respond(Method::Get, ME_PATH, 200, ALICE);
    block_on(ctrl.logout());
    assert_eq!(block_on(ctrl.check_status()), AuthStatus::Anonymous);
}

// =============================================================
// protected views
// =============================================================

#[test]
fn access_protected_returns_server_message() {
    let store = MemoryTokenStore::with_token("abc");
    let (ctrl, backend) = controller(&store);
    backend.respond(Method::Get, PROTECTED_PATH, 200, r#"{"message":"Welcome, alice!"}"#);
    assert_eq!(block_on(ctrl.access_protected()), Ok("Welcome, alice!".to_owned()));
}

#[test]
fn access_protected_denied_uses_detail_or_fallback() {
    let store = MemoryTokenStore::default();
    let (ctrl, backend) = controller(&store);
    backend.respond(Method::Get, PROTECTED_PATH, 403, r#"{"detail":"Not authenticated"}"#);
    assert_eq!(block_on(ctrl.access_protected()), Err("Not authenticated".to_owned()));

    backend.respond(Method::Get, PROTECTED_PATH, 403, "{}");
    assert_eq!(block_on(ctrl.access_protected()), Err(PROTECTED_DENIED.to_owned()));
}

#[test]
fn fetch_profile_decodes_user() {
    let store = MemoryTokenStore::with_token("abc");
    let (ctrl, backend) = controller(&store);
    backend.respond(Method::Get, ME_PATH, 200, ALICE);
    assert_eq!(block_on(ctrl.fetch_profile()), Ok(alice()));
}

#[test]
fn fetch_profile_rejects_non_profile_body() {
    let store = MemoryTokenStore::with_token("abc");
    let (ctrl, backend) = controller(&store);
    backend.respond(Method::Get, ME_PATH, 200, r#"{"unexpected":true}"#);
    assert_eq!(block_on(ctrl.fetch_profile()), Err(PROFILE_FAILED.to_owned()));
}

// =============================================================
// AuthView
// =============================================================

#[test]
fn view_while_checking() {
    let view = AuthView::from_state(&AuthState::default());
    assert_eq!(view.status_text, "Checking session...");
    assert!(view.show_auth_forms);
    assert!(!view.protected_enabled);
}

#[test]
fn view_anonymous_disables_authenticated_affordances() {
    let view = AuthView::from_state(&AuthState::settled(AuthStatus::Anonymous));
    assert_eq!(view.status_text, "Not logged in");
    assert_eq!(view.badge_class, "status-badge");
    assert!(view.show_auth_forms);
    assert!(!view.show_dashboard);
    assert!(!view.logout_visible);
    assert!(!view.protected_enabled);
    assert!(!view.profile_enabled);
}

#[test]
fn view_authenticated_greets_user() {
    let state = AuthState::settled(AuthStatus::Authenticated { profile: Some(alice()) });
    let view = AuthView::from_state(&state);
    assert_eq!(view.status_text, "Welcome, alice!");
    assert_eq!(view.badge_class, "status-badge success");
    assert!(!view.show_auth_forms);
    assert!(view.show_dashboard);
    assert!(view.logout_visible);
    assert!(view.protected_enabled);
    assert!(view.profile_enabled);
}

#[test]
fn view_authenticated_without_profile_uses_generic_name() {
    let state = AuthState::settled(AuthStatus::Authenticated { profile: None });
    assert_eq!(AuthView::from_state(&state).status_text, "Welcome, User!");
}
