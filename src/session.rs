//! Session ownership and identity transitions.
//!
//! The [`SessionManager`] is the only writer of session state and of the
//! persisted credential. Identity is two-phase: a token decoded locally
//! yields a *provisional* identity good enough for optimistic UI, and only
//! a server-verified profile fetch promotes it to *confirmed*. Anything
//! gating access to sensitive areas must key off the confirmed phase.

use crate::models::UserIdentity;

pub mod manager;
pub mod navigate;
pub mod token;

pub use manager::{SessionError, SessionManager};
pub use navigate::{Landing, Navigator, NullNavigator};

/// The authenticated principal, tagged with how much we trust it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    /// Derived from a locally decoded token; not yet checked with the
    /// backend. Suitable for optimistic rendering only.
    Provisional(UserIdentity),
    /// Verified against the backend (login, signup, or profile fetch).
    Confirmed(UserIdentity),
}

impl Identity {
    /// The identity payload regardless of phase.
    #[must_use]
    pub fn user(&self) -> &UserIdentity {
        match self {
            Self::Provisional(user) | Self::Confirmed(user) => user,
        }
    }

    #[must_use]
    pub fn is_confirmed(&self) -> bool {
        matches!(self, Self::Confirmed(_))
    }
}

/// Lifecycle of the session.
///
/// `Restoring` exists only while startup restoration is in flight; every
/// other transition moves directly between `Unauthenticated` and
/// `Authenticated`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Unauthenticated,
    Restoring,
    Authenticated(Identity),
}

impl SessionState {
    /// The current principal, if any.
    #[must_use]
    pub fn current_user(&self) -> Option<&UserIdentity> {
        match self {
            Self::Authenticated(identity) => Some(identity.user()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserRole;

    fn jane() -> UserIdentity {
        UserIdentity {
            id: "u1".to_string(),
            name: "Jane".to_string(),
            email: "jane@x.com".to_string(),
            role: UserRole::User,
            phone_number: None,
        }
    }

    #[test]
    fn identity_exposes_user_in_both_phases() {
        assert_eq!(Identity::Provisional(jane()).user().id, "u1");
        assert_eq!(Identity::Confirmed(jane()).user().id, "u1");
        assert!(!Identity::Provisional(jane()).is_confirmed());
        assert!(Identity::Confirmed(jane()).is_confirmed());
    }

    #[test]
    fn only_authenticated_state_has_a_user() {
        assert!(SessionState::Unauthenticated.current_user().is_none());
        assert!(SessionState::Restoring.current_user().is_none());
        assert!(SessionState::Authenticated(Identity::Confirmed(jane()))
            .current_user()
            .is_some());
    }
}
