//! Blood request records and the shapes used to submit them.
//!
//! The backend stores requests in MongoDB and reports them with `_id`
//! identifiers and camelCase field names; the structs here are the internal
//! shapes those records are coerced into at the API boundary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// One of the eight ABO/Rh blood groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BloodGroup {
    #[serde(rename = "A+")]
    APositive,
    #[serde(rename = "A-")]
    ANegative,
    #[serde(rename = "B+")]
    BPositive,
    #[serde(rename = "B-")]
    BNegative,
    #[serde(rename = "AB+")]
    AbPositive,
    #[serde(rename = "AB-")]
    AbNegative,
    #[serde(rename = "O+")]
    OPositive,
    #[serde(rename = "O-")]
    ONegative,
}

/// Internal three-level urgency scale.
///
/// Backend records have drifted across deployments and may carry synonyms
/// for the three levels; [`Urgency::from_wire`] folds those onto the scale
/// and anything unrecognized is a decode error rather than a default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    Medium,
    High,
}

impl Urgency {
    /// Normalize a wire-format urgency value onto the three-level scale.
    #[must_use]
    pub fn from_wire(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "low" | "minor" => Some(Self::Low),
            "medium" | "moderate" | "normal" => Some(Self::Medium),
            "high" | "urgent" | "critical" => Some(Self::High),
            _ => None,
        }
    }
}

impl<'de> Deserialize<'de> for Urgency {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::from_wire(&raw).ok_or_else(|| {
            serde::de::Error::unknown_variant(&raw, &["low", "medium", "high"])
        })
    }
}

/// Lifecycle state of a blood request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Open,
    Fulfilled,
    Rejected,
}

/// The user who posted a request, as embedded in the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requester {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
}

/// Reference to a donor response attached to a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseRef {
    #[serde(alias = "_id")]
    pub id: String,
}

/// A blood request as the rest of the client consumes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BloodRequest {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "requestedBy")]
    pub requested_by: Requester,
    #[serde(rename = "bloodGroup")]
    pub blood_group: BloodGroup,
    pub quantity: u32,
    pub urgency: Urgency,
    pub status: RequestStatus,
    #[serde(rename = "dateNeeded")]
    pub date_needed: DateTime<Utc>,
    #[serde(default)]
    pub responses: Vec<ResponseRef>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// Fields a caller supplies when creating or updating a request.
///
/// Ownership, status, and timestamps are assigned server-side, so the draft
/// carries only the user-editable fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BloodRequestDraft {
    pub title: String,
    pub description: String,
    #[serde(rename = "bloodGroup")]
    pub blood_group: BloodGroup,
    pub quantity: u32,
    pub urgency: Urgency,
    #[serde(rename = "dateNeeded")]
    pub date_needed: DateTime<Utc>,
}
