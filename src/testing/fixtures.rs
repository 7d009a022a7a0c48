//! Canonical test data shared across unit and integration tests.

use base64::{engine::general_purpose, Engine as _};
use chrono::Utc;
use serde_json::{json, Value};

use crate::models::{UserIdentity, UserRole};

/// A stable identity for the given role.
#[must_use]
pub fn identity(role: UserRole) -> UserIdentity {
    UserIdentity {
        id: format!("{}-1", role.as_str()),
        name: "Jane Doe".to_string(),
        email: format!("jane@{}.redbridge.example", role.as_str()),
        role,
        phone_number: Some("1234567890".to_string()),
    }
}

/// The same identity in the backend's wire shape (`_id`, camelCase).
#[must_use]
pub fn user_json(role: UserRole) -> Value {
    let user = identity(role);
    json!({
        "_id": user.id,
        "name": user.name,
        "email": user.email,
        "role": role.as_str(),
        "phoneNumber": user.phone_number,
    })
}

/// Login/signup success body: `{user, token}`.
#[must_use]
pub fn auth_success_body(role: UserRole, token: &str) -> Value {
    json!({
        "user": user_json(role),
        "token": token,
    })
}

/// An unsigned JWT-shaped bearer token whose claims match
/// [`identity`], expiring one hour from now.
#[must_use]
pub fn bearer_token(role: UserRole) -> String {
    bearer_token_with_exp(role, Utc::now().timestamp() + 3600)
}

/// Like [`bearer_token`] with an explicit `exp` claim.
#[must_use]
pub fn bearer_token_with_exp(role: UserRole, exp: i64) -> String {
    let user = identity(role);
    let claims = json!({
        "sub": user.id,
        "name": user.name,
        "email": user.email,
        "role": role.as_str(),
        "phoneNumber": user.phone_number,
        "exp": exp,
    });
    unsigned_jwt(&claims)
}

/// Assemble `header.payload.signature` from arbitrary claims. The signature
/// segment is a placeholder; nothing client-side verifies it.
#[must_use]
pub fn unsigned_jwt(claims: &Value) -> String {
    let header = general_purpose::URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = general_purpose::URL_SAFE_NO_PAD
        .encode(serde_json::to_vec(claims).expect("claims serialize"));
    format!("{header}.{payload}.fixture-signature")
}

/// A raw blood-request record in the backend's wire shape.
#[must_use]
pub fn blood_request_record(id: &str, urgency: &str) -> Value {
    json!({
        "_id": id,
        "title": "O- needed for surgery",
        "description": "Two units before Friday",
        "requestedBy": {"_id": "user-1", "name": "Sam Poster", "email": "sam@x.com"},
        "bloodGroup": "O-",
        "quantity": 2,
        "urgency": urgency,
        "status": "open",
        "dateNeeded": "2026-08-07T00:00:00Z",
        "responses": [],
        "createdAt": "2026-08-01T10:30:00.000Z",
        "updatedAt": "2026-08-02T08:00:00.000Z"
    })
}

/// The double-wrapped listing envelope the blood-request endpoint returns.
#[must_use]
pub fn nested_listing(records: Vec<Value>) -> Value {
    json!({"success": true, "data": {"data": records}})
}
