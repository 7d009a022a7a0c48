//! Post-authentication navigation targets.
//!
//! The session manager decides *where* the client should land after each
//! identity transition; *how* to get there belongs to the embedding UI,
//! which supplies a [`Navigator`].

use crate::models::UserRole;

/// Application areas a session transition can land on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Landing {
    Public,
    User,
    Hospital,
    Admin,
}

impl Landing {
    /// Landing area after login, exact per role.
    #[must_use]
    pub fn for_login(role: UserRole) -> Self {
        match role {
            UserRole::Admin => Self::Admin,
            UserRole::Hospital => Self::Hospital,
            UserRole::User => Self::User,
        }
    }

    /// Landing area after signup. Signup cannot create an admin, so only
    /// two destinations exist.
    #[must_use]
    pub fn for_signup(role: UserRole) -> Self {
        match role {
            UserRole::Hospital => Self::Hospital,
            _ => Self::User,
        }
    }

    /// Route path of the area.
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Public => "/",
            Self::User => "/user",
            Self::Hospital => "/hospital",
            Self::Admin => "/admin",
        }
    }
}

/// Receiver of navigation requests, implemented by the embedding UI router.
pub trait Navigator: Send + Sync {
    fn navigate(&self, landing: Landing);
}

/// Navigator that only logs; for embeddings without routing.
pub struct NullNavigator;

impl Navigator for NullNavigator {
    fn navigate(&self, landing: Landing) {
        log::debug!("navigation requested to {}", landing.path());
    }
}
