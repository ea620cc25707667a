use std::fmt;

use serde::{Deserialize, Serialize};

use super::email::Email;
use super::password::Password;
use super::username::Username;

/// Database identity of a user row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Public view of a user. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    pub id: UserId,
    pub username: Username,
    pub full_name: String,
    pub email: Email,
    pub is_active: bool,
}

/// Input for user registration. The password is still raw here; stores hash
/// it before anything is persisted.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: Username,
    pub full_name: String,
    pub email: Email,
    pub password: Password,
}

/// Partial profile update: only supplied fields are applied.
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    pub full_name: Option<String>,
    pub email: Option<Email>,
    pub is_active: Option<bool>,
}

impl UserUpdate {
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none() && self.email.is_none() && self.is_active.is_none()
    }
}
