//! Local bearer-token decoding.
//!
//! The backend issues JWT-shaped tokens. Decoding the payload segment
//! locally (without signature verification) is enough to rebuild a
//! *provisional* identity for optimistic UI at startup; it is never
//! trusted for access decisions, which wait for a verified profile fetch.

use base64::{engine::general_purpose, Engine as _};
use chrono::{DateTime, Utc};
use serde_json::Value;
use thiserror::Error;

use crate::models::{UserIdentity, UserRole};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenDecodeError {
    #[error("token is not a three-segment JWT")]
    Shape,
    #[error("token payload is not valid base64")]
    Encoding,
    #[error("token payload is not valid JSON")]
    Payload,
    #[error("token is missing the {0} claim")]
    MissingClaim(&'static str),
    #[error("token carries unrecognized role {0:?}")]
    UnknownRole(String),
    #[error("token is expired")]
    Expired,
}

/// Rebuild a provisional identity from the token's claims.
///
/// The subject may arrive as `sub`, `id`, or `_id` depending on the
/// backend version. An `exp` claim at or before `now` invalidates the
/// token; a token without `exp` is accepted (the persistence layer's
/// max age still bounds it).
///
/// # Errors
///
/// Returns a [`TokenDecodeError`] describing the first defect found; the
/// caller treats any of them as confirmed invalidity of the stored token.
pub fn decode_identity(
    token: &str,
    now: DateTime<Utc>,
) -> Result<UserIdentity, TokenDecodeError> {
    let claims = decode_claims(token)?;

    if let Some(exp) = claims.get("exp").and_then(Value::as_i64) {
        if exp <= now.timestamp() {
            return Err(TokenDecodeError::Expired);
        }
    }

    let id = string_claim(&claims, &["sub", "id", "_id"])
        .ok_or(TokenDecodeError::MissingClaim("sub"))?;
    let name =
        string_claim(&claims, &["name"]).ok_or(TokenDecodeError::MissingClaim("name"))?;
    let email =
        string_claim(&claims, &["email"]).ok_or(TokenDecodeError::MissingClaim("email"))?;
    let raw_role =
        string_claim(&claims, &["role"]).ok_or(TokenDecodeError::MissingClaim("role"))?;
    let role = UserRole::parse(&raw_role)
        .ok_or_else(|| TokenDecodeError::UnknownRole(raw_role.clone()))?;
    let phone_number = string_claim(&claims, &["phoneNumber", "phone"]);

    Ok(UserIdentity {
        id,
        name,
        email,
        role,
        phone_number,
    })
}

fn decode_claims(token: &str) -> Result<Value, TokenDecodeError> {
    let mut segments = token.split('.');
    let (Some(_header), Some(payload), Some(_signature), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(TokenDecodeError::Shape);
    };

    let bytes = general_purpose::URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|_| TokenDecodeError::Encoding)?;

    serde_json::from_slice(&bytes).map_err(|_| TokenDecodeError::Payload)
}

fn string_claim(claims: &Value, names: &[&str]) -> Option<String> {
    names
        .iter()
        .find_map(|name| claims.get(*name).and_then(Value::as_str))
        .map(ToString::to_string)
}
