//! Mock implementations of the client's collaborator seams.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use serde_json::Value;

use crate::api::transport::TransportError;
use crate::api::{ApiRequest, HttpTransport, RawResponse};
use crate::session::{Landing, Navigator};

/// Transport that replays a scripted sequence of outcomes and records every
/// request it sees. Outcomes are consumed in FIFO order; running past the
/// script behaves like an unreachable backend.
#[derive(Default)]
pub struct MockTransport {
    script: Mutex<VecDeque<Result<RawResponse, TransportError>>>,
    seen: Mutex<Vec<ApiRequest>>,
}

impl MockTransport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a raw outcome.
    pub fn push(&self, outcome: Result<RawResponse, TransportError>) {
        self.script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(outcome);
    }

    /// Queue a 200 response with the given JSON body.
    pub fn push_json(&self, body: Value) {
        self.push(Ok(RawResponse { status: 200, body }));
    }

    /// Queue a response with an explicit status.
    pub fn push_status(&self, status: u16, body: Value) {
        self.push(Ok(RawResponse { status, body }));
    }

    /// Queue a connection-level failure.
    pub fn push_unreachable(&self) {
        self.push(Err(TransportError::Unreachable(
            "connection refused".to_string(),
        )));
    }

    /// Queue a completed exchange whose body was not JSON.
    pub fn push_garbled(&self) {
        self.push(Err(TransportError::Body(
            "expected value at line 1".to_string(),
        )));
    }

    /// Every request executed so far, in order.
    #[must_use]
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The most recent request, if any.
    #[must_use]
    pub fn last_request(&self) -> Option<ApiRequest> {
        self.requests().pop()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn execute(&self, request: ApiRequest) -> Result<RawResponse, TransportError> {
        self.seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request);

        self.script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or_else(|| {
                Err(TransportError::Unreachable(
                    "no scripted response".to_string(),
                ))
            })
    }
}

/// Navigator that records every landing it is asked to visit.
#[derive(Default)]
pub struct RecordingNavigator {
    visits: Mutex<Vec<Landing>>,
}

impl RecordingNavigator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn visits(&self) -> Vec<Landing> {
        self.visits
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn last_visit(&self) -> Option<Landing> {
        self.visits().pop()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, landing: Landing) {
        self.visits
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(landing);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn script_is_consumed_in_order() {
        let transport = MockTransport::new();
        transport.push_json(json!({"first": true}));
        transport.push_status(404, json!({"message": "gone"}));

        let request = ApiRequest {
            method: crate::api::HttpMethod::Get,
            url: "http://x/api/a".to_string(),
            bearer: None,
            body: None,
        };

        let first = transport.execute(request.clone()).await.unwrap();
        assert_eq!(first.status, 200);

        let second = transport.execute(request.clone()).await.unwrap();
        assert_eq!(second.status, 404);

        // past the script: unreachable
        assert!(transport.execute(request).await.is_err());
        assert_eq!(transport.requests().len(), 3);
    }

    #[test]
    fn navigator_records_visits() {
        let navigator = RecordingNavigator::new();
        navigator.navigate(Landing::Hospital);
        navigator.navigate(Landing::Public);
        assert_eq!(navigator.visits(), vec![Landing::Hospital, Landing::Public]);
        assert_eq!(navigator.last_visit(), Some(Landing::Public));
    }
}
