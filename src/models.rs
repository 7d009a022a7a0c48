use serde::{Deserialize, Serialize};

pub mod blood_request;
pub mod directory;

pub use blood_request::{
    BloodGroup, BloodRequest, BloodRequestDraft, RequestStatus, Requester, ResponseRef, Urgency,
};
pub use directory::{
    AccountStatus, Hospital, HospitalStatus, InventoryItem, InventoryStatus, ManagedUser,
};

/// Role of the authenticated principal.
///
/// The role decides which application areas are reachable and where the
/// client lands after authentication. Unknown role strings are a decode
/// error, never silently mapped to a default role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    User,
    Hospital,
    Admin,
}

impl UserRole {
    /// Parse a wire-format role string, rejecting anything unrecognized.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "user" => Some(Self::User),
            "hospital" => Some(Self::Hospital),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }

    /// Wire-format name of the role
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Hospital => "hospital",
            Self::Admin => "admin",
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The authenticated principal as the backend reports it.
///
/// Reconstructed either from the bearer token's claims or from a profile
/// fetch. The backend serializes the identifier as `_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    #[serde(
        rename = "phoneNumber",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub phone_number: Option<String>,
}

/// Payload of a successful login or signup: the principal plus the bearer
/// token to persist for subsequent requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSuccess {
    pub user: UserIdentity,
    pub token: String,
}

/// Payload of a token refresh call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRefresh {
    pub token: String,
}

/// Registration fields submitted on signup.
///
/// Signup can only create `user` and `hospital` accounts; the input
/// contract in [`crate::validation`] rejects an `admin` role before the
/// request is issued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: UserRole,
    pub phone_number: String,
}
