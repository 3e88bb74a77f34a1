//! Portal user roles.

use serde::{Deserialize, Serialize};

/// What a signed-in user is allowed to do.
///
/// Stored as text on the user row. Anything unrecognized is treated as
/// [`Role::Client`], the least-privileged role (see [`Role::parse_lossy`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Submits website and payment requests, sees their own projects.
    #[default]
    Client,
    /// Reviews requests, assigns projects, manages discounts.
    Admin,
}

impl Role {
    /// Database/text form of the role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::Admin => "admin",
        }
    }

    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Client => "Client",
            Self::Admin => "Admin",
        }
    }

    /// Parse a stored role, falling back to `Client` when the value is unknown.
    ///
    /// Returns the role and whether the fallback was taken, so callers can log it.
    #[must_use]
    pub fn parse_lossy(s: &str) -> (Self, bool) {
        s.parse().map_or((Self::Client, true), |role| (role, false))
    }

    /// Whether this is the admin role.
    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "client" => Ok(Self::Client),
            "admin" => Ok(Self::Admin),
            _ => Err(format!("invalid role: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!("client".parse::<Role>(), Ok(Role::Client));
        assert_eq!(" Admin ".parse::<Role>(), Ok(Role::Admin));
        assert!("superuser".parse::<Role>().is_err());
    }

    #[test]
    fn test_parse_lossy_falls_back_to_client() {
        assert_eq!(Role::parse_lossy("admin"), (Role::Admin, false));
        assert_eq!(Role::parse_lossy("client"), (Role::Client, false));
        assert_eq!(Role::parse_lossy(""), (Role::Client, true));
        assert_eq!(Role::parse_lossy("owner"), (Role::Client, true));
    }

    #[test]
    fn test_display_matches_as_str() {
        assert_eq!(Role::Admin.to_string(), "admin");
        assert_eq!(Role::Client.to_string(), "client");
    }
}
