//! Typed access to the RedBridge REST backend.
//!
//! Every backend capability is one method on [`ApiClient`], and every method
//! resolves to the same [`ApiResponse`] envelope: transport failures, non-2xx
//! statuses, and malformed bodies are all folded into `success: false` with a
//! display-ready message. Nothing in this module panics or propagates a raw
//! transport error to calling UI code.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod client;
pub mod decode;
pub mod transport;

pub use client::ApiClient;
pub use transport::{ApiRequest, HttpMethod, HttpTransport, RawResponse, ReqwestTransport};

/// Fallback message when the backend rejects a call without explaining why.
pub const GENERIC_REJECTION: &str = "Something went wrong";

/// Fallback message for transport-level failures.
pub const NETWORK_FAILURE: &str = "Network error";

/// Classification of a failed call, kept alongside the envelope so callers
/// that need to distinguish "the backend said no" from "the backend was
/// unreachable" (session restoration does) can do so without parsing the
/// display message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request never completed: unreachable host, timeout, or a body
    /// that was not valid JSON.
    Transport,
    /// The backend answered with a non-2xx status.
    Status(u16),
    /// The backend answered 2xx but the payload did not match the expected
    /// shape.
    Malformed,
}

/// Typed view of a failed envelope, produced by [`ApiResponse::into_result`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Application-level rejection; the message is the backend's, verbatim.
    #[error("{message}")]
    Rejected { status: u16, message: String },
    /// Transport-class failure; the caller should offer a retry, the
    /// message is generic.
    #[error("{0}")]
    Network(String),
    /// 2xx response whose body did not decode into the expected shape.
    #[error("Malformed response from server")]
    Malformed,
}

/// Uniform envelope returned by every backend call.
///
/// Exactly one of `data` and `error` is populated, matching `success`; no
/// call site ever needs to inspect both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip)]
    kind: Option<ErrorKind>,
}

impl<T> ApiResponse<T> {
    /// Successful envelope carrying a payload.
    #[must_use]
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            kind: None,
        }
    }

    /// Failed envelope for an application-level rejection.
    #[must_use]
    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
            kind: Some(ErrorKind::Status(status)),
        }
    }

    /// Failed envelope for a transport-class failure.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
            kind: Some(ErrorKind::Transport),
        }
    }

    /// Failed envelope for a 2xx body that did not match the expected shape.
    #[must_use]
    pub fn malformed() -> Self {
        Self {
            success: false,
            data: None,
            error: Some("Malformed response from server".to_string()),
            kind: Some(ErrorKind::Malformed),
        }
    }

    /// Classification of the failure, `None` on success.
    #[must_use]
    pub fn error_kind(&self) -> Option<ErrorKind> {
        self.kind
    }

    /// Collapse the envelope into a `Result`, enforcing its invariant.
    ///
    /// # Errors
    ///
    /// Returns the typed failure corresponding to the envelope's error
    /// branch. A `success: true` envelope with no payload is reported as
    /// [`ApiError::Malformed`] rather than being let through.
    pub fn into_result(self) -> Result<T, ApiError> {
        if self.success {
            return self.data.ok_or(ApiError::Malformed);
        }

        let message = self
            .error
            .unwrap_or_else(|| GENERIC_REJECTION.to_string());
        match self.kind {
            Some(ErrorKind::Status(status)) => Err(ApiError::Rejected { status, message }),
            Some(ErrorKind::Malformed) => Err(ApiError::Malformed),
            _ => Err(ApiError::Network(message)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok_envelope_resolves_to_data() {
        let response = ApiResponse::ok(7_u32);
        assert!(response.success);
        assert_eq!(response.error_kind(), None);
        assert_eq!(response.into_result().unwrap(), 7);
    }

    #[test]
    fn rejected_envelope_keeps_server_message() {
        let response: ApiResponse<u32> = ApiResponse::rejected(401, "Invalid credentials");
        assert!(!response.success);
        assert_eq!(response.error_kind(), Some(ErrorKind::Status(401)));
        assert_eq!(
            response.into_result(),
            Err(ApiError::Rejected {
                status: 401,
                message: "Invalid credentials".to_string()
            })
        );
    }

    #[test]
    fn network_envelope_is_transport_class() {
        let response: ApiResponse<u32> = ApiResponse::network("Network error");
        assert_eq!(response.error_kind(), Some(ErrorKind::Transport));
        assert!(matches!(response.into_result(), Err(ApiError::Network(_))));
    }

    #[test]
    fn successful_envelope_without_payload_is_malformed() {
        let response: ApiResponse<u32> = ApiResponse {
            success: true,
            data: None,
            error: None,
            kind: None,
        };
        assert_eq!(response.into_result(), Err(ApiError::Malformed));
    }

    #[test]
    fn envelope_serializes_one_branch_only() {
        let ok = serde_json::to_value(ApiResponse::ok("x")).unwrap();
        assert_eq!(ok["success"], true);
        assert!(ok.get("error").is_none());

        let failed = serde_json::to_value(ApiResponse::<String>::rejected(400, "nope")).unwrap();
        assert_eq!(failed["success"], false);
        assert!(failed.get("data").is_none());
        assert_eq!(failed["error"], "nope");
    }
}
