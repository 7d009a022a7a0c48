//! Session Manager - owner of session state and identity transitions.
//!
//! All mutation of the session and of the persisted credential happens
//! here, serialized behind one lock, so state transitions are linearized:
//! each operation fully resolves before the next mutation lands. The
//! mutating operations report failures as [`SessionError`] values whose
//! messages are suitable for direct display; they never leave the loading
//! flag stuck and never surface a raw transport error.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use thiserror::Error;

use super::navigate::{Landing, Navigator};
use super::token;
use super::{Identity, SessionState};
use crate::api::{ApiClient, ApiError, ErrorKind};
use crate::models::{SignupRequest, UserIdentity, UserRole};
use crate::store::{PersistedAuth, TokenStore};
use crate::validation::{self, ValidationError};

/// Failure of a user-initiated session operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The backend rejected the operation; the message is the backend's,
    /// verbatim.
    #[error("{0}")]
    Rejected(String),
    /// The input violated its contract before any network call was made.
    #[error("{0}")]
    Invalid(String),
    /// The backend could not be reached; worth retrying.
    #[error("Could not reach the server. Please try again.")]
    Unavailable,
}

impl From<ValidationError> for SessionError {
    fn from(err: ValidationError) -> Self {
        Self::Invalid(err.to_string())
    }
}

impl From<ApiError> for SessionError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Rejected { message, .. } => Self::Rejected(message),
            ApiError::Network(_) | ApiError::Malformed => Self::Unavailable,
        }
    }
}

struct Inner {
    state: SessionState,
    loading: bool,
}

fn lock(inner: &Mutex<Inner>) -> MutexGuard<'_, Inner> {
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Clears the loading flag on every exit path, early returns included.
struct LoadingGuard<'a> {
    inner: &'a Mutex<Inner>,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        lock(self.inner).loading = false;
    }
}

/// Owner of the client session.
///
/// Constructed once at application boot from its collaborators; tests
/// instantiate isolated managers with in-memory stores and scripted
/// transports.
pub struct SessionManager {
    client: ApiClient,
    store: Arc<dyn TokenStore>,
    navigator: Arc<dyn Navigator>,
    inner: Mutex<Inner>,
}

impl SessionManager {
    #[must_use]
    pub fn new(
        client: ApiClient,
        store: Arc<dyn TokenStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            client,
            store,
            navigator,
            inner: Mutex::new(Inner {
                state: SessionState::Unauthenticated,
                loading: false,
            }),
        }
    }

    // ------------------------------------------------------------------
    // State access
    // ------------------------------------------------------------------

    #[must_use]
    pub fn state(&self) -> SessionState {
        lock(&self.inner).state.clone()
    }

    /// The current principal, if any phase of identity is present.
    #[must_use]
    pub fn current_user(&self) -> Option<UserIdentity> {
        lock(&self.inner).state.current_user().cloned()
    }

    /// Role of the *confirmed* identity. Provisional identities return
    /// `None`; access gating must use this, not [`Self::current_user`].
    #[must_use]
    pub fn confirmed_role(&self) -> Option<UserRole> {
        match &lock(&self.inner).state {
            SessionState::Authenticated(Identity::Confirmed(user)) => Some(user.role),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        lock(&self.inner).loading
    }

    fn set_state(&self, state: SessionState) {
        lock(&self.inner).state = state;
    }

    fn begin_loading(&self) -> LoadingGuard<'_> {
        lock(&self.inner).loading = true;
        LoadingGuard { inner: &self.inner }
    }

    // ------------------------------------------------------------------
    // Identity transitions
    // ------------------------------------------------------------------

    /// Rebuild the session from the persisted token at startup.
    ///
    /// Never fails: an absent, corrupt, expired, or rejected token
    /// degrades to the logged-out state, clearing the stored credential on
    /// confirmed invalidity. A token that decodes but cannot be confirmed
    /// because the backend is unreachable leaves a provisional identity in
    /// place with the credential kept.
    pub async fn restore(&self) {
        let Some(persisted) = self.store.load() else {
            self.set_state(SessionState::Unauthenticated);
            return;
        };

        let _loading = self.begin_loading();
        self.set_state(SessionState::Restoring);

        let identity = match token::decode_identity(&persisted.token, Utc::now()) {
            Ok(identity) => identity,
            Err(err) => {
                log::warn!("discarding stored token: {err}");
                self.store.clear();
                self.set_state(SessionState::Unauthenticated);
                return;
            }
        };

        log::debug!("restored provisional identity for {}", identity.email);
        self.set_state(SessionState::Authenticated(Identity::Provisional(identity)));

        let profile = self.client.get_profile().await;
        if profile.success {
            if let Some(user) = profile.data {
                log::info!("session confirmed for {}", user.email);
                self.set_state(SessionState::Authenticated(Identity::Confirmed(user)));
            }
            return;
        }

        match profile.error_kind() {
            Some(ErrorKind::Status(401 | 403)) => {
                log::info!("stored token no longer accepted, signing out");
                self.store.clear();
                self.set_state(SessionState::Unauthenticated);
            }
            _ => {
                log::warn!("could not confirm restored session; keeping provisional identity");
            }
        }
    }

    /// Authenticate with credentials and land on the role's area.
    ///
    /// # Errors
    ///
    /// Returns a [`SessionError`] carrying a display-ready message; the
    /// session state is left unchanged on failure.
    pub async fn login(&self, email: &str, password: &str) -> Result<Landing, SessionError> {
        validation::check_login(email, password)?;

        let _loading = self.begin_loading();
        let auth = self.client.login(email, password).await.into_result()?;

        self.store.save(&PersistedAuth::new(auth.token.clone()));
        let landing = Landing::for_login(auth.user.role);
        log::info!("logged in as {} ({})", auth.user.email, auth.user.role);
        self.set_state(SessionState::Authenticated(Identity::Confirmed(auth.user)));
        self.navigator.navigate(landing);
        Ok(landing)
    }

    /// Register a new account and land on the role's area.
    ///
    /// # Errors
    ///
    /// Same contract as [`Self::login`].
    pub async fn signup(&self, request: &SignupRequest) -> Result<Landing, SessionError> {
        validation::check_signup(request)?;

        let _loading = self.begin_loading();
        let auth = self.client.signup(request).await.into_result()?;

        self.store.save(&PersistedAuth::new(auth.token.clone()));
        let landing = Landing::for_signup(auth.user.role);
        log::info!("registered {} ({})", auth.user.email, auth.user.role);
        self.set_state(SessionState::Authenticated(Identity::Confirmed(auth.user)));
        self.navigator.navigate(landing);
        Ok(landing)
    }

    /// Sign out. The backend call is best-effort; local teardown is
    /// unconditional and this never fails.
    pub async fn logout(&self) {
        let response = self.client.logout().await;
        if !response.success {
            log::debug!("server-side logout failed; proceeding with local teardown");
        }

        self.store.clear();
        self.set_state(SessionState::Unauthenticated);
        self.navigator.navigate(Landing::Public);
        log::info!("signed out");
    }

    /// Request a password-reset email. Mutates no session state.
    ///
    /// # Errors
    ///
    /// Returns a [`SessionError`] carrying a display-ready message.
    pub async fn forgot_password(&self, email: &str) -> Result<(), SessionError> {
        validation::check_email(email)?;

        let _loading = self.begin_loading();
        self.client.forgot_password(email).await.into_result()?;
        Ok(())
    }
}
