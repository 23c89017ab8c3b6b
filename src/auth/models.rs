//! Auth data models.

use serde::{Deserialize, Serialize};

/// The signed-in shopper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// User id, `user-<unix millis>`
    pub id: String,

    /// Display name
    pub name: String,

    /// Email address
    pub email: String,

    /// Contact phone, empty if unknown
    #[serde(default)]
    pub phone: String,

    /// Default address, empty if unknown
    #[serde(default)]
    pub address: String,
}

/// Partial profile update. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProfileUpdate {
    /// New display name
    pub name: Option<String>,

    /// New email address
    pub email: Option<String>,

    /// New phone number
    pub phone: Option<String>,

    /// New address
    pub address: Option<String>,
}

impl ProfileUpdate {
    /// Apply the update to a profile. The user id never changes.
    pub fn apply_to(self, profile: &mut UserProfile) {
        if let Some(name) = self.name {
            profile.name = name;
        }

        if let Some(email) = self.email {
            profile.email = email;
        }

        if let Some(phone) = self.phone {
            profile.phone = phone;
        }

        if let Some(address) = self.address {
            profile.address = address;
        }
    }
}
