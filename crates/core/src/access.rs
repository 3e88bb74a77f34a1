//! Role-gated route decisions.
//!
//! The portal has two dashboards, one per role. Every gated page asks
//! [`route_decision`] whether the current visitor may see it; the answer is
//! either to render, to send them to the login page, or to bounce them to
//! their own dashboard.

use crate::types::Role;

/// Login page path.
pub const LOGIN_PATH: &str = "/login";

/// Outcome of a role check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Render the page.
    Allow,
    /// Nobody is signed in.
    Login,
    /// Signed in, but this page is not theirs.
    Redirect(&'static str),
}

impl Access {
    /// Where a rejected visitor should go, if anywhere.
    #[must_use]
    pub const fn location(self) -> Option<&'static str> {
        match self {
            Self::Allow => None,
            Self::Login => Some(LOGIN_PATH),
            Self::Redirect(path) => Some(path),
        }
    }
}

/// The dashboard a role lands on.
#[must_use]
pub const fn dashboard_path(role: Role) -> &'static str {
    match role {
        Role::Admin => "/dashboard/admin",
        Role::Client => "/dashboard/client",
    }
}

/// Decide whether a visitor with `user_role` may view a page that requires
/// `required`.
///
/// `required = None` describes the bare `/dashboard` entry point, which always
/// forwards a signed-in user to their role's dashboard.
#[must_use]
pub const fn route_decision(user_role: Option<Role>, required: Option<Role>) -> Access {
    let Some(role) = user_role else {
        return Access::Login;
    };
    match required {
        None => Access::Redirect(dashboard_path(role)),
        Some(Role::Admin) if role.is_admin() => Access::Allow,
        Some(Role::Client) if !role.is_admin() => Access::Allow,
        Some(_) => Access::Redirect(dashboard_path(role)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymous_goes_to_login() {
        assert_eq!(route_decision(None, None), Access::Login);
        assert_eq!(route_decision(None, Some(Role::Client)), Access::Login);
        assert_eq!(route_decision(None, Some(Role::Admin)), Access::Login);
    }

    #[test]
    fn test_bare_dashboard_redirects_by_role() {
        assert_eq!(
            route_decision(Some(Role::Admin), None),
            Access::Redirect("/dashboard/admin")
        );
        assert_eq!(
            route_decision(Some(Role::Client), None),
            Access::Redirect("/dashboard/client")
        );
    }

    #[test]
    fn test_matching_role_is_allowed() {
        assert_eq!(
            route_decision(Some(Role::Admin), Some(Role::Admin)),
            Access::Allow
        );
        assert_eq!(
            route_decision(Some(Role::Client), Some(Role::Client)),
            Access::Allow
        );
    }

    #[test]
    fn test_wrong_role_goes_to_own_dashboard() {
        assert_eq!(
            route_decision(Some(Role::Client), Some(Role::Admin)),
            Access::Redirect("/dashboard/client")
        );
        assert_eq!(
            route_decision(Some(Role::Admin), Some(Role::Client)),
            Access::Redirect("/dashboard/admin")
        );
    }

    #[test]
    fn test_location() {
        assert_eq!(Access::Allow.location(), None);
        assert_eq!(Access::Login.location(), Some("/login"));
        assert_eq!(
            Access::Redirect("/dashboard/admin").location(),
            Some("/dashboard/admin")
        );
    }
}
