//! Authentication extractors and role gates.
//!
//! The session only remembers who signed in. Every gated request re-reads the
//! user's role from the database, so a promotion or demotion made with the CLI
//! takes effect on the next page load instead of at the next login.

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use arpk_core::{Access, LOGIN_PATH, Role, route_decision};

use crate::db::UserRepository;
use crate::error::set_sentry_user;
use crate::models::{CurrentUser, session_keys};
use crate::state::AppState;

/// Extractor that requires a signed-in user of any role.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(RequireAuth(user): RequireAuth) -> impl IntoResponse {
///     format!("Hello, {}!", user.email)
/// }
/// ```
pub struct RequireAuth(pub CurrentUser);

/// Extractor that requires a signed-in client.
///
/// Admins are sent to the admin dashboard.
pub struct RequireClient(pub CurrentUser);

/// Extractor that requires a signed-in admin.
///
/// Clients are sent to the client dashboard.
pub struct RequireAdmin(pub CurrentUser);

/// Error returned when a request fails a role gate: a redirect to the login
/// page or to the visitor's own dashboard.
#[derive(Debug, PartialEq, Eq)]
pub struct AuthRejection(pub &'static str);

impl AuthRejection {
    const LOGIN: Self = Self(LOGIN_PATH);

    /// Turn a gate decision into a rejection, or `None` when access is allowed.
    #[must_use]
    pub const fn from_access(access: Access) -> Option<Self> {
        match access.location() {
            Some(path) => Some(Self(path)),
            None => None,
        }
    }
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        Redirect::to(self.0).into_response()
    }
}

/// Read the signed-in user from the session and refresh their role.
async fn signed_in_user(parts: &Parts, state: &AppState) -> Result<CurrentUser, AuthRejection> {
    let session = parts
        .extensions
        .get::<Session>()
        .ok_or(AuthRejection::LOGIN)?;

    let mut user: CurrentUser = session
        .get(session_keys::CURRENT_USER)
        .await
        .ok()
        .flatten()
        .ok_or(AuthRejection::LOGIN)?;

    let Some(role) = current_role(state, &user).await else {
        forget_deleted_user(session, &user).await;
        return Err(AuthRejection::LOGIN);
    };

    if role != user.role {
        tracing::info!(user_id = %user.id, from = %user.role, to = %role, "Session role refreshed");
        user.role = role;
        if let Err(e) = set_current_user(session, &user).await {
            tracing::warn!(error = %e, "Failed to store refreshed role in session");
        }
    }

    set_sentry_user(&user.id, Some(user.email.as_str()));
    Ok(user)
}

/// Drop a session whose account no longer exists.
async fn forget_deleted_user(session: &Session, user: &CurrentUser) {
    tracing::info!(user_id = %user.id, "Session user no longer exists, signing out");
    if let Err(e) = clear_current_user(session).await {
        tracing::warn!(user_id = %user.id, error = %e, "Failed to clear session for deleted user");
    }
}

/// Look up the user's role. A failed lookup falls back to `Client`.
async fn current_role(state: &AppState, user: &CurrentUser) -> Option<Role> {
    match UserRepository::new(state.pool()).get_by_id(user.id).await {
        Ok(found) => found.map(|u| u.role),
        Err(e) => {
            tracing::warn!(user_id = %user.id, error = %e, "Role lookup failed, treating user as client");
            Some(Role::Client)
        }
    }
}

async fn gated_user(
    parts: &Parts,
    state: &AppState,
    required: Role,
) -> Result<CurrentUser, AuthRejection> {
    let user = signed_in_user(parts, state).await?;
    match AuthRejection::from_access(route_decision(Some(user.role), Some(required))) {
        None => Ok(user),
        Some(rejection) => {
            tracing::debug!(
                user_id = %user.id,
                role = %user.role,
                required = %required,
                path = %parts.uri.path(),
                "Role gate rejected request"
            );
            Err(rejection)
        }
    }
}

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        signed_in_user(parts, state).await.map(Self)
    }
}

impl FromRequestParts<AppState> for RequireClient {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        gated_user(parts, state, Role::Client).await.map(Self)
    }
}

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        gated_user(parts, state, Role::Admin).await.map(Self)
    }
}

/// Extractor that optionally gets the current user.
///
/// Unlike the gates, this trusts the session as-is and never touches the
/// database. Used by public pages to adjust navigation.
pub struct OptionalAuth(pub Option<CurrentUser>);

impl<S> FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = match parts.extensions.get::<Session>() {
            Some(session) => session
                .get::<CurrentUser>(session_keys::CURRENT_USER)
                .await
                .ok()
                .flatten(),
            None => None,
        };

        Ok(Self(user))
    }
}

/// Helper to set the current user in the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_user(
    session: &Session,
    user: &CurrentUser,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CURRENT_USER, user).await
}

/// Helper to clear the current user from the session (logout).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_user(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session
        .remove::<CurrentUser>(session_keys::CURRENT_USER)
        .await?;
    Ok(())
}
