// Integration tests for the session lifecycle: login, signup, restoration,
// and logout, driven through a scripted transport.
use std::sync::Arc;

use serde_json::json;

use redbridge_client::api::ApiClient;
use redbridge_client::models::{SignupRequest, UserRole};
use redbridge_client::session::{
    Identity, Landing, SessionError, SessionManager, SessionState,
};
use redbridge_client::store::{MemoryTokenStore, PersistedAuth, TokenStore};
use redbridge_client::testing::fixtures;
use redbridge_client::testing::mock::{MockTransport, RecordingNavigator};

struct Harness {
    manager: SessionManager,
    transport: Arc<MockTransport>,
    store: Arc<MemoryTokenStore>,
    navigator: Arc<RecordingNavigator>,
}

fn harness() -> Harness {
    let transport = Arc::new(MockTransport::new());
    let store = Arc::new(MemoryTokenStore::new());
    let navigator = Arc::new(RecordingNavigator::new());
    let client = ApiClient::with_transport(
        "http://localhost:5000/api",
        transport.clone(),
        store.clone(),
    );
    let manager = SessionManager::new(client, store.clone(), navigator.clone());
    Harness {
        manager,
        transport,
        store,
        navigator,
    }
}

fn signup_request(role: UserRole) -> SignupRequest {
    SignupRequest {
        name: "Jane".to_string(),
        email: "jane@x.com".to_string(),
        password: "secret1".to_string(),
        role,
        phone_number: "1234567890".to_string(),
    }
}

#[tokio::test]
async fn login_redirects_exactly_per_role() {
    for (role, expected) in [
        (UserRole::Admin, Landing::Admin),
        (UserRole::Hospital, Landing::Hospital),
        (UserRole::User, Landing::User),
    ] {
        let h = harness();
        h.transport
            .push_json(fixtures::auth_success_body(role, "tok-1"));

        let landing = h.manager.login("jane@x.com", "secret1").await.unwrap();

        assert_eq!(landing, expected);
        assert_eq!(h.navigator.last_visit(), Some(expected));
        assert_eq!(h.manager.current_user().map(|u| u.role), Some(role));
        assert_eq!(h.manager.confirmed_role(), Some(role));
        assert_eq!(h.store.load().map(|a| a.token), Some("tok-1".to_string()));
        assert!(!h.manager.is_loading());
    }
}

#[tokio::test]
async fn failed_login_leaves_session_unchanged() {
    let h = harness();
    h.transport
        .push_status(401, json!({"message": "Invalid email or password"}));

    let err = h.manager.login("jane@x.com", "wrong-pass").await.unwrap_err();

    assert_eq!(
        err,
        SessionError::Rejected("Invalid email or password".to_string())
    );
    assert_eq!(h.manager.current_user(), None);
    assert_eq!(h.manager.state(), SessionState::Unauthenticated);
    assert!(!h.manager.is_loading());
    assert!(h.store.load().is_none());
    assert!(h.navigator.visits().is_empty());
}

#[tokio::test]
async fn restore_round_trips_a_persisted_session() {
    // first manager logs in and persists the token
    let first = harness();
    first
        .transport
        .push_json(fixtures::auth_success_body(
            UserRole::Hospital,
            &fixtures::bearer_token(UserRole::Hospital),
        ));
    first.manager.login("jane@x.com", "secret1").await.unwrap();
    let before = first.manager.current_user().unwrap();

    // a fresh manager sharing the store restores the same principal
    let transport = Arc::new(MockTransport::new());
    transport.push_json(fixtures::user_json(UserRole::Hospital));
    let navigator = Arc::new(RecordingNavigator::new());
    let client = ApiClient::with_transport(
        "http://localhost:5000/api",
        transport.clone(),
        first.store.clone(),
    );
    let manager = SessionManager::new(client, first.store.clone(), navigator);

    manager.restore().await;

    let after = manager.current_user().unwrap();
    assert_eq!(after.id, before.id);
    assert_eq!(after.role, before.role);
    assert_eq!(manager.confirmed_role(), Some(UserRole::Hospital));
    assert!(!manager.is_loading());
}

#[tokio::test]
async fn restore_without_token_is_logged_out() {
    let h = harness();

    h.manager.restore().await;

    assert_eq!(h.manager.state(), SessionState::Unauthenticated);
    assert!(!h.manager.is_loading());
    assert!(h.transport.requests().is_empty());
}

#[tokio::test]
async fn restore_with_corrupt_token_degrades_silently() {
    let h = harness();
    h.store
        .save(&PersistedAuth::new("not-even-a-jwt".to_string()));

    h.manager.restore().await;

    assert_eq!(h.manager.state(), SessionState::Unauthenticated);
    assert!(h.store.load().is_none(), "corrupt token must be cleared");
    assert!(!h.manager.is_loading());
}

#[tokio::test]
async fn restore_with_rejected_token_clears_credential() {
    let h = harness();
    h.store
        .save(&PersistedAuth::new(fixtures::bearer_token(UserRole::User)));
    h.transport
        .push_status(401, json!({"message": "Token expired"}));

    h.manager.restore().await;

    assert_eq!(h.manager.state(), SessionState::Unauthenticated);
    assert!(h.store.load().is_none());
}

#[tokio::test]
async fn restore_keeps_provisional_identity_when_backend_is_down() {
    let h = harness();
    h.store
        .save(&PersistedAuth::new(fixtures::bearer_token(UserRole::User)));
    h.transport.push_unreachable();

    h.manager.restore().await;

    match h.manager.state() {
        SessionState::Authenticated(Identity::Provisional(user)) => {
            assert_eq!(user.role, UserRole::User);
        }
        state => panic!("expected provisional identity, got {state:?}"),
    }
    // credential kept: invalidity was not confirmed
    assert!(h.store.load().is_some());
    assert_eq!(h.manager.confirmed_role(), None);
}

#[tokio::test]
async fn logout_tears_down_even_when_backend_fails() {
    let h = harness();
    h.transport
        .push_json(fixtures::auth_success_body(UserRole::User, "tok-9"));
    h.manager.login("jane@x.com", "secret1").await.unwrap();
    assert!(h.store.load().is_some());

    h.transport
        .push_status(500, json!({"error": "internal server error"}));
    h.manager.logout().await;

    assert_eq!(h.manager.current_user(), None);
    assert_eq!(h.manager.state(), SessionState::Unauthenticated);
    assert!(h.store.load().is_none());
    assert_eq!(h.navigator.last_visit(), Some(Landing::Public));
}

#[tokio::test]
async fn signup_as_hospital_end_to_end() {
    let h = harness();
    h.transport.push_json(json!({
        "success": true,
        "data": fixtures::auth_success_body(UserRole::Hospital, "abc"),
    }));

    let landing = h
        .manager
        .signup(&signup_request(UserRole::Hospital))
        .await
        .unwrap();

    assert_eq!(landing, Landing::Hospital);
    assert_eq!(
        h.manager.current_user().map(|u| u.role),
        Some(UserRole::Hospital)
    );
    assert_eq!(h.store.load().map(|a| a.token), Some("abc".to_string()));
    assert_eq!(h.navigator.last_visit(), Some(Landing::Hospital));
}

#[tokio::test]
async fn signup_as_user_lands_on_user_area() {
    let h = harness();
    h.transport
        .push_json(fixtures::auth_success_body(UserRole::User, "tok-2"));

    let landing = h
        .manager
        .signup(&signup_request(UserRole::User))
        .await
        .unwrap();

    assert_eq!(landing, Landing::User);
}

#[tokio::test]
async fn signup_rejects_admin_role_before_the_network() {
    let h = harness();

    let err = h
        .manager
        .signup(&signup_request(UserRole::Admin))
        .await
        .unwrap_err();

    assert!(matches!(err, SessionError::Invalid(_)));
    assert!(h.transport.requests().is_empty());
}

#[tokio::test]
async fn forgot_password_surfaces_server_message() {
    let h = harness();
    h.transport
        .push_status(404, json!({"message": "No account with that email"}));

    let err = h.manager.forgot_password("jane@x.com").await.unwrap_err();

    assert_eq!(
        err,
        SessionError::Rejected("No account with that email".to_string())
    );
    assert_eq!(h.manager.state(), SessionState::Unauthenticated);
    assert!(!h.manager.is_loading());
}

#[tokio::test]
async fn forgot_password_success_mutates_nothing() {
    let h = harness();
    h.transport.push_json(json!({"success": true}));

    h.manager.forgot_password("jane@x.com").await.unwrap();

    assert_eq!(h.manager.state(), SessionState::Unauthenticated);
    assert!(h.store.load().is_none());
    assert!(h.navigator.visits().is_empty());
}
