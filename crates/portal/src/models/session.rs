//! Session-related types.

use serde::{Deserialize, Serialize};

use arpk_core::{Email, Role, UserId};

/// Session-stored user identity.
///
/// The role is a cached copy. Role gates refresh it from the database on every
/// gated request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    /// User's database ID.
    pub id: UserId,
    /// User's email address.
    pub email: Email,
    /// User's role at the time it was last read.
    pub role: Role,
}

impl From<&super::User> for CurrentUser {
    fn from(user: &super::User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            role: user.role,
        }
    }
}

/// Session keys for authentication data.
pub mod keys {
    /// Key for storing the current logged-in user.
    pub const CURRENT_USER: &str = "current_user";
}
