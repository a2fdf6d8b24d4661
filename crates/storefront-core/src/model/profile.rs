use serde::{Deserialize, Serialize};

use super::ids::UserId;

/// The signed-in user's profile row. Every field but the owner is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: UserId,
    pub photo: Option<String>,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
}

/// Fields to change on a profile. `None` leaves a field as it is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
}

impl ProfileUpdate {
    /// Build an update, dropping fields that are blank after trimming.
    pub fn new(
        firstname: Option<String>,
        lastname: Option<String>,
        address: Option<String>,
        phone: Option<String>,
    ) -> Self {
        Self {
            firstname: non_blank(firstname),
            lastname: non_blank(lastname),
            address: non_blank(address),
            phone: non_blank(phone),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.firstname.is_none()
            && self.lastname.is_none()
            && self.address.is_none()
            && self.phone.is_none()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}
