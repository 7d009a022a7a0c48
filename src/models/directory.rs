//! Records served by the hospital and admin areas: stock inventory, the
//! managed user directory, and hospital registrations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::blood_request::BloodGroup;
use super::UserRole;

/// Availability state of a stocked inventory unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InventoryStatus {
    Available,
    Reserved,
    Expired,
}

/// One blood unit batch in a hospital's inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(rename = "bloodGroup")]
    pub blood_group: BloodGroup,
    pub quantity: u32,
    #[serde(rename = "expiryDate")]
    pub expiry_date: DateTime<Utc>,
    pub status: InventoryStatus,
}

/// Account standing of a registered user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    Active,
    Inactive,
    Pending,
}

/// A user as listed in the admin directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagedUser {
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
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    pub status: AccountStatus,
}

/// Approval state of a hospital registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HospitalStatus {
    Pending,
    Approved,
    Rejected,
}

/// A hospital registration as listed in the admin area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hospital {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    #[serde(rename = "licenseNumber")]
    pub license_number: String,
    pub status: HospitalStatus,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn inventory_item_decodes_backend_shape() {
        let raw = json!({
            "id": "inv1",
            "bloodGroup": "AB+",
            "quantity": 12,
            "expiryDate": "2026-09-01T00:00:00Z",
            "status": "available"
        });

        let item: InventoryItem = serde_json::from_value(raw).unwrap();
        assert_eq!(item.blood_group, BloodGroup::AbPositive);
        assert_eq!(item.status, InventoryStatus::Available);
    }

    #[test]
    fn hospital_status_rejects_unknown_values() {
        assert!(serde_json::from_value::<HospitalStatus>(json!("suspended")).is_err());
    }

    #[test]
    fn managed_user_decodes_directory_record() {
        let raw = json!({
            "_id": "u3",
            "name": "Kim",
            "email": "kim@x.com",
            "role": "user",
            "createdAt": "2026-01-15T09:00:00Z",
            "status": "active"
        });

        let user: ManagedUser = serde_json::from_value(raw).unwrap();
        assert_eq!(user.role, UserRole::User);
        assert_eq!(user.status, AccountStatus::Active);
        assert!(user.phone_number.is_none());
    }
}
