//! The typed backend client.
//!
//! One method per backend capability. Every method funnels through
//! [`ApiClient::request`], which builds the URL, attaches headers and the
//! bearer credential, executes the exchange, and folds every failure mode
//! into the uniform envelope. Calls are one-shot: no retries, no caching.

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};

use super::decode::decode_payload;
use super::transport::{ApiRequest, HttpMethod, HttpTransport, ReqwestTransport, TransportError};
use super::{ApiResponse, GENERIC_REJECTION, NETWORK_FAILURE};
use crate::models::{
    AuthSuccess, BloodRequest, BloodRequestDraft, Hospital, InventoryItem, ManagedUser,
    SignupRequest, TokenRefresh, UserIdentity,
};
use crate::settings::ClientSettings;
use crate::store::TokenStore;

/// Single choke point for all backend calls.
///
/// The client reads the token store to attach `Authorization` headers but
/// never writes it; credential lifecycle belongs to the session manager.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    transport: Arc<dyn HttpTransport>,
    store: Arc<dyn TokenStore>,
}

impl ApiClient {
    /// Build a client with the production transport.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured base URL is not a valid URL or
    /// the HTTP transport cannot be initialized.
    pub fn from_settings(
        settings: &ClientSettings,
        store: Arc<dyn TokenStore>,
    ) -> anyhow::Result<Self> {
        url::Url::parse(&settings.api.base_url)
            .map_err(|err| anyhow::anyhow!("invalid api base_url {:?}: {err}", settings.api.base_url))?;
        let transport = ReqwestTransport::new(Duration::from_secs(settings.api.timeout_seconds))?;
        Ok(Self::with_transport(
            settings.api.base_url.clone(),
            Arc::new(transport),
            store,
        ))
    }

    /// Build a client around an injected transport (tests, instrumentation).
    #[must_use]
    pub fn with_transport(
        base_url: impl Into<String>,
        transport: Arc<dyn HttpTransport>,
        store: Arc<dyn TokenStore>,
    ) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            transport,
            store,
        }
    }

    /// Base URL all endpoint paths are appended to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ------------------------------------------------------------------
    // Auth endpoints
    // ------------------------------------------------------------------

    pub async fn login(&self, email: &str, password: &str) -> ApiResponse<AuthSuccess> {
        self.request(
            HttpMethod::Post,
            "/auth/login",
            Some(json!({"email": email, "password": password})),
        )
        .await
    }

    pub async fn signup(&self, request: &SignupRequest) -> ApiResponse<AuthSuccess> {
        self.send_json(HttpMethod::Post, "/auth/signup", request).await
    }

    pub async fn forgot_password(&self, email: &str) -> ApiResponse<()> {
        self.request_unit(
            HttpMethod::Post,
            "/auth/forgot-password",
            Some(json!({"email": email})),
        )
        .await
    }

    pub async fn refresh_token(&self) -> ApiResponse<TokenRefresh> {
        self.request(HttpMethod::Post, "/auth/refresh", None).await
    }

    /// Best-effort server-side sign-out. Callers proceed with local session
    /// teardown whatever this returns.
    pub async fn logout(&self) -> ApiResponse<()> {
        self.request_unit(HttpMethod::Post, "/auth/logout", None).await
    }

    pub async fn get_profile(&self) -> ApiResponse<UserIdentity> {
        self.request(HttpMethod::Get, "/auth/profile", None).await
    }

    // ------------------------------------------------------------------
    // Blood request endpoints
    // ------------------------------------------------------------------

    /// Fetch all blood requests, flattening the endpoint's nested envelope
    /// and normalizing record fields into [`BloodRequest`].
    pub async fn get_blood_requests(&self) -> ApiResponse<Vec<BloodRequest>> {
        self.request(HttpMethod::Get, "/blood-requests/get-blood-requests", None)
            .await
    }

    pub async fn create_blood_request(
        &self,
        draft: &BloodRequestDraft,
    ) -> ApiResponse<BloodRequest> {
        self.send_json(HttpMethod::Post, "/blood-requests", draft).await
    }

    pub async fn update_blood_request(
        &self,
        id: &str,
        draft: &BloodRequestDraft,
    ) -> ApiResponse<BloodRequest> {
        let path = format!("/blood-requests/{}", urlencoding::encode(id));
        self.send_json(HttpMethod::Put, &path, draft).await
    }

    pub async fn delete_blood_request(&self, id: &str) -> ApiResponse<()> {
        let path = format!("/blood-requests/{}", urlencoding::encode(id));
        self.request_unit(HttpMethod::Delete, &path, None).await
    }

    // ------------------------------------------------------------------
    // Hospital endpoints
    // ------------------------------------------------------------------

    pub async fn get_hospital_inventory(&self) -> ApiResponse<Vec<InventoryItem>> {
        self.request(HttpMethod::Get, "/hospital/inventory", None).await
    }

    pub async fn update_inventory(&self, item: &InventoryItem) -> ApiResponse<InventoryItem> {
        self.send_json(HttpMethod::Post, "/hospital/inventory", item).await
    }

    // ------------------------------------------------------------------
    // Admin endpoints
    // ------------------------------------------------------------------

    pub async fn get_users(&self) -> ApiResponse<Vec<ManagedUser>> {
        self.request(HttpMethod::Get, "/admin/users", None).await
    }

    pub async fn get_hospitals(&self) -> ApiResponse<Vec<Hospital>> {
        self.request(HttpMethod::Get, "/admin/hospitals", None).await
    }

    pub async fn approve_hospital(&self, id: &str) -> ApiResponse<()> {
        let path = format!("/admin/hospitals/{}/approve", urlencoding::encode(id));
        self.request_unit(HttpMethod::Put, &path, None).await
    }

    // ------------------------------------------------------------------
    // Request plumbing
    // ------------------------------------------------------------------

    fn prepare(&self, method: HttpMethod, path: &str, body: Option<Value>) -> ApiRequest {
        ApiRequest {
            method,
            url: format!("{}{path}", self.base_url),
            bearer: self.store.load().map(|auth| auth.token),
            body,
        }
    }

    /// Serialize `body` and issue the request, degrading serialization
    /// failures to a failed envelope like any other local fault.
    async fn send_json<T, B>(&self, method: HttpMethod, path: &str, body: &B) -> ApiResponse<T>
    where
        T: DeserializeOwned,
        B: Serialize,
    {
        match serde_json::to_value(body) {
            Ok(value) => self.request(method, path, Some(value)).await,
            Err(err) => {
                log::error!("could not serialize request body for {path}: {err}");
                ApiResponse::network(NETWORK_FAILURE)
            }
        }
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<Value>,
    ) -> ApiResponse<T> {
        let request = self.prepare(method, path, body);
        log::debug!("{} {}", method.as_str(), request.url);

        let raw = match self.transport.execute(request).await {
            Ok(raw) => raw,
            Err(err) => return Self::transport_failure(path, &err),
        };

        if !raw.is_success() {
            let message = Self::server_message(&raw.body);
            log::debug!("{path} rejected with status {}: {message}", raw.status);
            return ApiResponse::rejected(raw.status, message);
        }

        match decode_payload::<T>(&raw.body) {
            Ok(data) => ApiResponse::ok(data),
            Err(err) => {
                log::warn!("{path} returned an unusable payload: {err}");
                ApiResponse::malformed()
            }
        }
    }

    /// Like [`Self::request`] but for endpoints whose success payload is
    /// empty or irrelevant; the body is not decoded.
    async fn request_unit(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<Value>,
    ) -> ApiResponse<()> {
        let request = self.prepare(method, path, body);
        log::debug!("{} {}", method.as_str(), request.url);

        let raw = match self.transport.execute(request).await {
            Ok(raw) => raw,
            Err(err) => return Self::transport_failure(path, &err),
        };

        if raw.is_success() {
            ApiResponse::ok(())
        } else {
            let message = Self::server_message(&raw.body);
            log::debug!("{path} rejected with status {}: {message}", raw.status);
            ApiResponse::rejected(raw.status, message)
        }
    }

    fn transport_failure<T>(path: &str, err: &TransportError) -> ApiResponse<T> {
        log::warn!("{path} did not complete: {err}");
        ApiResponse::network(NETWORK_FAILURE)
    }

    /// The backend reports rejection reasons under `message` or `error`
    /// depending on the endpoint's vintage.
    fn server_message(body: &Value) -> String {
        body.get("message")
            .and_then(Value::as_str)
            .or_else(|| body.get("error").and_then(Value::as_str))
            .unwrap_or(GENERIC_REJECTION)
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn server_message_prefers_message_field() {
        let body = json!({"message": "Invalid credentials", "error": "ignored"});
        assert_eq!(ApiClient::server_message(&body), "Invalid credentials");
    }

    #[test]
    fn server_message_falls_back_to_error_then_generic() {
        assert_eq!(
            ApiClient::server_message(&json!({"error": "Duplicate account"})),
            "Duplicate account"
        );
        assert_eq!(ApiClient::server_message(&json!({})), GENERIC_REJECTION);
        assert_eq!(
            ApiClient::server_message(&json!({"message": 42})),
            GENERIC_REJECTION
        );
    }
}
