//! HTTP route handlers for the portal.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                                    - Landing page
//! GET  /health, /health/ready               - Health checks (main.rs)
//!
//! # Auth
//! GET  /login                               - Login page
//! POST /login                               - Login action (rate limited)
//! GET  /register                            - Register page
//! POST /register                            - Register action (rate limited)
//! POST /logout                              - Logout action
//!
//! # Client (requires client role)
//! GET  /dashboard                           - Redirect to the role's dashboard
//! GET  /dashboard/client                    - Website requests + new request form
//! POST /dashboard/client/requests           - Submit website request
//! GET  /projects                            - Assigned projects
//! GET  /billing                             - Payment requests + form
//! POST /billing                             - Create payment request
//!
//! # Admin (requires admin role)
//! GET  /dashboard/admin                     - All website requests
//! POST /dashboard/admin/requests/{id}/status - Decide on a website request
//! GET  /admin/projects                      - All projects + create form
//! POST /admin/projects                      - Create project
//! POST /admin/projects/{id}/status          - Change project status
//! GET  /admin/payments                      - All payment requests
//! POST /admin/payments/{id}/status          - Decide on a payment request
//! GET  /admin/discounts                     - All discounts + create form
//! POST /admin/discounts                     - Create discount
//! POST /admin/discounts/{id}/toggle         - Activate/deactivate discount
//! ```

pub mod admin;
pub mod auth;
pub mod billing;
pub mod dashboard;
pub mod decision;
pub mod flash;
pub mod home;
pub mod projects;
pub mod views;

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Router,
    http::StatusCode,
    response::IntoResponse,
    routing::{MethodRouter, get, post},
};

use crate::filters;
use crate::middleware::{OptionalAuth, auth_rate_limiter};
use crate::state::AppState;

/// Create the auth routes router.
///
/// Form posts share one per-IP rate limiter.
pub fn auth_routes() -> Router<AppState> {
    let mut login_post: MethodRouter<AppState> = post(auth::login);
    let mut register_post: MethodRouter<AppState> = post(auth::register);

    if let Some(limiter) = auth_rate_limiter() {
        login_post = login_post.layer(limiter.clone());
        register_post = register_post.layer(limiter);
    } else {
        tracing::warn!("Auth rate limiter misconfigured, login and register are unthrottled");
    }

    Router::new()
        .route("/login", get(auth::login_page).merge(login_post))
        .route("/register", get(auth::register_page).merge(register_post))
        .route("/logout", post(auth::logout))
}

/// Create the dashboard routes router.
pub fn dashboard_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard::index))
        .route("/client", get(dashboard::client))
        .route("/client/requests", post(dashboard::submit_request))
        .route("/admin", get(dashboard::admin))
        .route(
            "/admin/requests/{id}/status",
            post(dashboard::update_request_status),
        )
}

/// Create the admin routes router.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/projects",
            get(admin::projects::index).post(admin::projects::create),
        )
        .route("/projects/{id}/status", post(admin::projects::update_status))
        .route("/payments", get(admin::payments::index))
        .route("/payments/{id}/status", post(admin::payments::update_status))
        .route(
            "/discounts",
            get(admin::discounts::index).post(admin::discounts::create),
        )
        .route("/discounts/{id}/toggle", post(admin::discounts::toggle))
}

/// Create all routes for the portal.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .merge(auth_routes())
        .nest("/dashboard", dashboard_routes())
        .route("/projects", get(projects::index))
        .route("/billing", get(billing::index).post(billing::create))
        .nest("/admin", admin_routes())
        .fallback(not_found)
}

/// 404 page template.
#[derive(Template, WebTemplate)]
#[template(path = "not_found.html")]
pub struct NotFoundTemplate {
    pub signed_in: bool,
}

/// Fallback for unknown paths.
pub async fn not_found(OptionalAuth(user): OptionalAuth) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        NotFoundTemplate {
            signed_in: user.is_some(),
        },
    )
}
