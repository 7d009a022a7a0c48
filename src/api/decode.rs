//! Response-body decoding.
//!
//! The backend's envelope discipline has drifted across versions: some
//! endpoints return the payload bare, some wrap it once in `{data: ...}`,
//! and the blood-request listing wraps it twice (`{data: {data: [...]}}`).
//! [`decode_payload`] normalizes all of these at the boundary. A body that
//! matches none of the candidate shapes fails closed as
//! [`DecodeError::Malformed`], carrying the raw payload for logging; it is
//! never handed to callers as a partially populated value.

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

/// Deepest `data` nesting that is unwrapped before giving up.
const MAX_ENVELOPE_DEPTH: usize = 2;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("response payload did not match the expected shape")]
    Malformed { raw: Value },
}

/// Decode a 2xx response body into `T`, unwrapping ad-hoc `data` envelopes
/// as needed.
///
/// # Errors
///
/// Returns [`DecodeError::Malformed`] when neither the body nor any of its
/// nested `data` payloads decode into `T`.
pub fn decode_payload<T: DeserializeOwned>(body: &Value) -> Result<T, DecodeError> {
    let mut candidate = body;

    for _ in 0..=MAX_ENVELOPE_DEPTH {
        match serde_json::from_value::<T>(candidate.clone()) {
            Ok(decoded) => return Ok(decoded),
            Err(err) => {
                log::debug!("payload candidate did not decode: {err}");
                match candidate.get("data") {
                    Some(inner) => candidate = inner,
                    None => break,
                }
            }
        }
    }

    Err(DecodeError::Malformed { raw: body.clone() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BloodRequest, Urgency, UserIdentity};
    use serde_json::json;

    fn request_record() -> Value {
        json!({
            "_id": "req1",
            "title": "O- needed",
            "description": "Two units",
            "requestedBy": {"_id": "u9", "name": "Sam", "email": "sam@x.com"},
            "bloodGroup": "O-",
            "quantity": 2,
            "urgency": "critical",
            "status": "open",
            "dateNeeded": "2026-08-07T00:00:00Z",
            "createdAt": "2026-08-01T10:30:00Z",
            "updatedAt": "2026-08-02T08:00:00Z"
        })
    }

    #[test]
    fn bare_payload_decodes_directly() {
        let body = json!({
            "_id": "u1",
            "name": "Jane",
            "email": "jane@x.com",
            "role": "user"
        });

        let identity: UserIdentity = decode_payload(&body).unwrap();
        assert_eq!(identity.id, "u1");
    }

    #[test]
    fn single_wrapped_payload_is_unwrapped() {
        let body = json!({
            "success": true,
            "data": {
                "_id": "u1",
                "name": "Jane",
                "email": "jane@x.com",
                "role": "admin"
            }
        });

        let identity: UserIdentity = decode_payload(&body).unwrap();
        assert_eq!(identity.email, "jane@x.com");
    }

    #[test]
    fn double_wrapped_listing_is_flattened_and_normalized() {
        let body = json!({"data": {"data": [request_record()]}});

        let requests: Vec<BloodRequest> = decode_payload(&body).unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].urgency, Urgency::High);
    }

    #[test]
    fn unrecognized_shape_fails_closed() {
        let body = json!({"data": {"entries": [1, 2, 3]}});
        let result: Result<Vec<BloodRequest>, _> = decode_payload(&body);
        assert!(result.is_err());
    }

    #[test]
    fn record_with_unknown_urgency_fails_closed() {
        let mut record = request_record();
        record["urgency"] = json!("someday");
        let body = json!({"data": {"data": [record]}});

        let result: Result<Vec<BloodRequest>, _> = decode_payload(&body);
        assert!(result.is_err());
    }
}
