use super::*;

#[test]
fn credentials_serialize_to_login_body() {
    let creds = Credentials { username: "alice".to_owned(), password: "hunter22".to_owned() };
    let json = serde_json::to_value(&creds).unwrap();
    assert_eq!(json, serde_json::json!({ "username": "alice", "password": "hunter22" }));
}

#[test]
fn signup_request_serializes_all_three_fields() {
    let req = SignupRequest {
        username: "alice".to_owned(),
        email: "a@example.com".to_owned(),
        password: "longenough".to_owned(),
    };
    let json = serde_json::to_value(&req).unwrap();
    assert_eq!(
        json,
        serde_json::json!({ "username": "alice", "email": "a@example.com", "password": "longenough" })
    );
}

#[test]
fn debug_output_redacts_passwords() {
    let creds = Credentials { username: "alice".to_owned(), password: "hunter22".to_owned() };
    let signup = SignupRequest {
        username: "bob".to_owned(),
        email: "b@example.com".to_owned(),
        password: "s3cretpass".to_owned(),
    };
    assert!(!format!("{creds:?}").contains("hunter22"));
    assert!(!format!("{signup:?}").contains("s3cretpass"));
    assert!(format!("{creds:?}").contains("alice"));
}

#[test]
fn user_profile_keeps_extra_fields() {
    let profile: UserProfile = serde_json::from_value(serde_json::json!({
        "id": 7,
        "username": "alice",
        "email": "a@example.com",
    }))
    .unwrap();
    assert_eq!(profile.username, "alice");
    assert_eq!(profile.email.as_deref(), Some("a@example.com"));
    assert_eq!(profile.extra.get("id"), Some(&serde_json::json!(7)));
}

#[test]
fn user_profile_email_is_optional() {
    let profile: UserProfile = serde_json::from_value(serde_json::json!({ "username": "alice" })).unwrap();
    assert_eq!(profile.email, None);
    assert_eq!(profile.summary(), "alice");
}

#[test]
fn user_profile_summary_includes_email() {
    let profile: UserProfile =
        serde_json::from_value(serde_json::json!({ "username": "alice", "email": "a@example.com" })).unwrap();
    assert_eq!(profile.summary(), "alice (a@example.com)");
}

#[test]
fn login_response_tolerates_missing_token() {
    let body: LoginResponse = serde_json::from_value(serde_json::json!({ "message": "ok" })).unwrap();
    assert_eq!(body.access_token, None);

    let body: LoginResponse =
        serde_json::from_value(serde_json::json!({ "access_token": "abc", "token_type": "bearer" })).unwrap();
    assert_eq!(body.access_token.as_deref(), Some("abc"));
    assert_eq!(body.token_type.as_deref(), Some("bearer"));
}
