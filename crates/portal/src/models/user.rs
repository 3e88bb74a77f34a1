//! User domain types.

use chrono::{DateTime, Utc};

use arpk_core::{Email, Role, UserId};

/// A portal user (domain type).
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// User's email address.
    pub email: Email,
    /// What the user may do.
    pub role: Role,
    /// Optional name shown in the sidebar.
    pub display_name: Option<String>,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}
