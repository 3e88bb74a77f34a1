//! Authentication route handlers.
//!
//! Email and password sign-in, self-service registration (always as a
//! client), and logout. Failures redirect back with an `?error=` code.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use arpk_core::dashboard_path;

use super::flash::{Flash, FlashQuery, redirect_error};
use crate::error::{add_breadcrumb, clear_sentry_user};
use crate::filters;
use crate::middleware::{OptionalAuth, clear_current_user, set_current_user};
use crate::models::{CurrentUser, User};
use crate::services::auth::{AuthError, AuthService};
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Registration form data.
#[derive(Deserialize)]
pub struct RegisterForm {
    pub email: String,
    pub password: String,
    pub password_confirm: String,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub flash: Option<Flash>,
}

/// Register page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate {
    pub flash: Option<Flash>,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the login page. Signed-in users go straight to their dashboard.
pub async fn login_page(
    OptionalAuth(user): OptionalAuth,
    Query(query): Query<FlashQuery>,
) -> Response {
    if let Some(user) = user {
        return Redirect::to(dashboard_path(user.role)).into_response();
    }
    LoginTemplate {
        flash: Flash::from_query(&query),
    }
    .into_response()
}

/// Handle login form submission.
#[instrument(skip(state, session, form))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Response {
    let auth = AuthService::new(state.pool());

    match auth.login_with_password(&form.email, &form.password).await {
        Ok(user) => start_session(&session, &user, "/login").await,
        Err(e) => {
            log_auth_failure(&e, "Login failed");
            redirect_error("/login", e.code()).into_response()
        }
    }
}

/// Display the registration page.
pub async fn register_page(
    OptionalAuth(user): OptionalAuth,
    Query(query): Query<FlashQuery>,
) -> Response {
    if let Some(user) = user {
        return Redirect::to(dashboard_path(user.role)).into_response();
    }
    RegisterTemplate {
        flash: Flash::from_query(&query),
    }
    .into_response()
}

/// Handle registration form submission.
///
/// New accounts are clients and are signed in immediately.
#[instrument(skip(state, session, form))]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RegisterForm>,
) -> Response {
    let auth = AuthService::new(state.pool());

    match auth
        .register_with_password(&form.email, &form.password, &form.password_confirm)
        .await
    {
        Ok(user) => {
            add_breadcrumb("auth", "Account registered", &[("user_id", &user.id.to_string())]);
            start_session(&session, &user, "/register").await
        }
        Err(e) => {
            log_auth_failure(&e, "Registration failed");
            redirect_error("/register", e.code()).into_response()
        }
    }
}

/// Handle logout.
pub async fn logout(session: Session) -> Response {
    if let Err(e) = clear_current_user(&session).await {
        tracing::error!(error = %e, "Failed to clear session user");
    }

    if let Err(e) = session.flush().await {
        tracing::error!(error = %e, "Failed to flush session");
    }

    clear_sentry_user();
    Redirect::to("/").into_response()
}

/// Store the user in a fresh session and send them to their dashboard.
async fn start_session(session: &Session, user: &User, failure_path: &str) -> Response {
    if let Err(e) = session.cycle_id().await {
        tracing::error!(error = %e, "Failed to cycle session id");
        return redirect_error(failure_path, "session").into_response();
    }

    if let Err(e) = set_current_user(session, &CurrentUser::from(user)).await {
        tracing::error!(error = %e, "Failed to set session user");
        return redirect_error(failure_path, "session").into_response();
    }

    tracing::info!(user_id = %user.id, role = %user.role, "User signed in");
    Redirect::to(dashboard_path(user.role)).into_response()
}

fn log_auth_failure(error: &AuthError, message: &str) {
    match error {
        AuthError::Repository(_) | AuthError::PasswordHash => {
            tracing::error!(error = %error, "{message}");
        }
        _ => tracing::warn!(error = %error, "{message}"),
    }
}
