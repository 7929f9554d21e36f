use futures::executor::block_on;
use serde_json::json;

use super::*;
use crate::net::transport::Method;
use crate::session::{TOKEN_KEY, USER_KEY};
use crate::test_support::{FailingStore, FakeTransport, TEST_BASE_URL, client};

#[test]
fn endpoints_join_base_url() {
    assert_eq!(login_endpoint("/api"), "/api/auth/login");
    assert_eq!(register_endpoint("/api"), "/api/auth/register");
    assert_eq!(profile_endpoint("/api"), "/api/auth/profile");
}

#[test]
fn new_trims_trailing_slash_from_base() {
    let c = AuthClient::new("http://h/api/", crate::session::store::MemoryStore::new(), FakeTransport::default());
    assert_eq!(c.base_url, "http://h/api");
}

#[test]
fn login_posts_credentials_and_persists_session() {
    let c = client(FakeTransport::default().respond(200, r#"{"token":"t1","user":{"id":1}}"#));
    let resp = block_on(c.login("user@test.com", "secret1")).unwrap();

    assert_eq!(resp.token(), Some("t1"));
    assert_eq!(c.store().get(TOKEN_KEY).as_deref(), Some("t1"));
    assert_eq!(c.store().get(USER_KEY).as_deref(), Some(r#"{"id":1}"#));

    let req = c.transport().last_request().unwrap();
    assert_eq!(req.method, Method::Post);
    assert_eq!(req.url, format!("{TEST_BASE_URL}/auth/login"));
    assert_eq!(req.body, Some(json!({ "email": "user@test.com", "password": "secret1" })));
    assert_eq!(req.header("Content-Type"), Some("application/json"));
    assert_eq!(req.header("Authorization"), None);
}

#[test]
fn login_without_token_does_not_persist() {
    let c = client(FakeTransport::default().respond(200, r#"{"user":{"id":1}}"#));
    let resp = block_on(c.login("user@test.com", "secret1")).unwrap();
    assert_eq!(resp.user, json!({ "id": 1 }));
    assert!(c.store().is_empty());
    assert!(!c.is_authenticated());
}

#[test]
fn rejected_login_carries_server_message_and_leaves_storage() {
    let c = client(FakeTransport::default().respond(401, r#"{"message":"Invalid credentials"}"#));
    let err = block_on(c.login("user@test.com", "wrong12")).unwrap_err();
    assert_eq!(err, AuthError::Rejected { status: 401, message: Some("Invalid credentials".to_owned()) });
    assert!(c.store().is_empty());
}

#[test]
fn rejected_login_without_message_carries_none() {
    let c = client(FakeTransport::default().respond(500, "<html>oops</html>"));
    let err = block_on(c.login("user@test.com", "secret1")).unwrap_err();
    assert_eq!(err, AuthError::Rejected { status: 500, message: None });
    assert_eq!(err.user_message(), None);
}

#[test]
fn rejected_login_with_blank_message_carries_none() {
    let c = client(FakeTransport::default().respond(401, r#"{"message":"   "}"#));
    let err = block_on(c.login("user@test.com", "secret1")).unwrap_err();
    assert_eq!(err.user_message(), None);
}

#[test]
fn transport_failure_maps_to_fallback() {
    let c = client(FakeTransport::default().fail("NetworkError when attempting to fetch resource."));
    let err = block_on(c.login("user@test.com", "secret1")).unwrap_err();
    assert!(matches!(err, AuthError::Transport { .. }));
    assert_eq!(err.user_message(), Some(LOGIN_FALLBACK));
}

#[test]
fn malformed_success_body_is_decode_error() {
    let c = client(FakeTransport::default().respond(200, "not json"));
    let err = block_on(c.login("user@test.com", "secret1")).unwrap_err();
    assert!(matches!(err, AuthError::Decode { .. }));
    assert!(c.store().is_empty());
}

#[test]
fn login_storage_failure_leaves_no_session() {
    let c = AuthClient::new(
        TEST_BASE_URL,
        FailingStore::rejecting(USER_KEY),
        FakeTransport::default().respond(200, r#"{"token":"t1","user":{"id":1}}"#),
    );
    let err = block_on(c.login("user@test.com", "secret1")).unwrap_err();

    assert!(matches!(err, AuthError::Storage { .. }));
    assert_eq!(err.user_message(), Some(LOGIN_FALLBACK));
    assert!(!c.is_authenticated());
    assert_eq!(c.current_user(), None);
}

#[test]
fn register_posts_to_register_and_persists() {
    let c = client(FakeTransport::default().respond(201, r#"{"token":"t2","user":{"id":2,"name":"Awa"}}"#));
    let req = RegisterRequest {
        email: "awa@test.com".to_owned(),
        password: "secret1".to_owned(),
        name: Some("Awa".to_owned()),
        ..RegisterRequest::default()
    };
    block_on(c.register(&req)).unwrap();

    assert_eq!(c.transport().last_request().unwrap().url, format!("{TEST_BASE_URL}/auth/register"));
    assert_eq!(c.store().get(TOKEN_KEY).as_deref(), Some("t2"));
    assert_eq!(c.current_user(), Some(json!({ "id": 2, "name": "Awa" })));
}

#[test]
fn register_transport_failure_uses_register_fallback() {
    let c = client(FakeTransport::default().fail("offline"));
    let err = block_on(c.register(&RegisterRequest::default())).unwrap_err();
    assert_eq!(err.user_message(), Some(REGISTER_FALLBACK));
}

#[test]
fn get_profile_sends_bearer_token_when_signed_in() {
    let c = client(
        FakeTransport::default()
            .respond(200, r#"{"token":"t1","user":{"id":1}}"#)
            .respond(200, r#"{"user":{"id":1,"email":"user@test.com"}}"#),
    );
    block_on(c.login("user@test.com", "secret1")).unwrap();
    let user = block_on(c.get_profile()).unwrap();

    assert_eq!(user, json!({ "id": 1, "email": "user@test.com" }));
    let req = c.transport().last_request().unwrap();
    assert_eq!(req.method, Method::Get);
    assert_eq!(req.header("Authorization"), Some("Bearer t1"));
}

#[test]
fn get_profile_without_token_is_sent_unauthenticated() {
    let c = client(FakeTransport::default().respond(401, r#"{"message":"Token manquant"}"#));
    let err = block_on(c.get_profile()).unwrap_err();
    assert_eq!(c.transport().calls(), 1);
    assert_eq!(c.transport().last_request().unwrap().header("Authorization"), None);
    assert_eq!(err.user_message(), Some("Token manquant"));
}

#[test]
fn get_profile_failure_without_message_uses_profile_fallback() {
    let c = client(FakeTransport::default().fail("offline"));
    let err = block_on(c.get_profile()).unwrap_err();
    assert_eq!(err.user_message(), Some(PROFILE_FALLBACK));
}

#[test]
fn logout_clears_session_regardless_of_prior_state() {
    let c = client(FakeTransport::default().respond(200, r#"{"token":"t1","user":{"id":1}}"#));
    c.logout();
    assert!(!c.is_authenticated());
    assert_eq!(c.current_user(), None);

    block_on(c.login("user@test.com", "secret1")).unwrap();
    assert!(c.is_authenticated());
    c.logout();
    assert!(!c.is_authenticated());
    assert_eq!(c.current_user(), None);
}

#[test]
fn user_without_token_is_not_authenticated() {
    let c = client(FakeTransport::default());
    c.store().set(USER_KEY, r#"{"id":1}"#).unwrap();
    assert!(!c.is_authenticated());
    assert_eq!(c.current_user(), Some(json!({ "id": 1 })));
}
