//! The transport seam between the typed client and the network.
//!
//! [`ApiClient`](super::ApiClient) speaks to the backend exclusively through
//! the [`HttpTransport`] trait so that tests can script responses without a
//! socket. The production implementation wraps `reqwest` with a bounded
//! per-request timeout so a hung call fails instead of leaving the UI
//! spinner up forever.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// HTTP methods the backend surface uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

/// A fully prepared request: absolute URL, optional bearer credential, and
/// an optional JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    pub url: String,
    pub bearer: Option<String>,
    pub body: Option<Value>,
}

/// Status and parsed JSON body of a completed exchange.
///
/// Non-2xx responses still arrive here; mapping status to failure is the
/// client's job, not the transport's.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Value,
}

impl RawResponse {
    /// Whether the status is in the 2xx range.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Failures the transport itself can produce.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The exchange never completed: DNS, connect, TLS, or timeout.
    #[error("request failed: {0}")]
    Unreachable(String),
    /// The exchange completed but the body was not valid JSON.
    #[error("invalid response body: {0}")]
    Body(String),
}

/// One-shot request execution. Implementations do not retry.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn execute(&self, request: ApiRequest) -> Result<RawResponse, TransportError>;
}

/// Production transport backed by a pooled `reqwest` client.
pub struct ReqwestTransport {
    http: reqwest::Client,
}

impl ReqwestTransport {
    /// Build a transport whose requests all time out after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying TLS backend cannot be initialized.
    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(&self, request: ApiRequest) -> Result<RawResponse, TransportError> {
        let mut builder = match request.method {
            HttpMethod::Get => self.http.get(&request.url),
            HttpMethod::Post => self.http.post(&request.url),
            HttpMethod::Put => self.http.put(&request.url),
            HttpMethod::Delete => self.http.delete(&request.url),
        };

        builder = builder.header("Content-Type", "application/json");

        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }

        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|err| TransportError::Unreachable(err.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .json::<Value>()
            .await
            .map_err(|err| TransportError::Body(err.to_string()))?;

        Ok(RawResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn method_names_match_wire_format() {
        assert_eq!(HttpMethod::Get.as_str(), "GET");
        assert_eq!(HttpMethod::Delete.as_str(), "DELETE");
    }

    #[test]
    fn raw_response_success_range() {
        let ok = RawResponse {
            status: 201,
            body: json!({}),
        };
        assert!(ok.is_success());

        let unauthorized = RawResponse {
            status: 401,
            body: json!({}),
        };
        assert!(!unauthorized.is_success());
    }
}
