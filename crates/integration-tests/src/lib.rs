//! Integration tests for the ARPK portal.
//!
//! These drive a running portal over HTTP with a cookie-keeping client.
//!
//! # Running Tests
//!
//! ```bash
//! # Migrate, then start the portal
//! cargo run -p arpk-cli -- migrate
//! cargo run -p arpk-portal
//!
//! # Run the ignored tests against it
//! cargo test -p arpk-integration-tests -- --ignored
//! ```
//!
//! # Environment Variables
//!
//! - `PORTAL_TEST_URL` - Portal base URL (default: `http://localhost:3000`)
//! - `PORTAL_DATABASE_URL` - Used to promote a test user to admin

#![allow(clippy::expect_used, clippy::missing_panics_doc)]

use reqwest::{Client, Response, StatusCode, header::LOCATION, redirect::Policy};

/// Password used for every test account.
pub const TEST_PASSWORD: &str = "integration-pass-123";

/// Base URL of the portal under test.
#[must_use]
pub fn base_url() -> String {
    std::env::var("PORTAL_TEST_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Full URL for a portal path.
#[must_use]
pub fn url(path: &str) -> String {
    format!("{}{path}", base_url())
}

/// A client that keeps cookies and does not follow redirects, so tests can
/// assert on `Location`.
#[must_use]
pub fn client() -> Client {
    Client::builder()
        .cookie_store(true)
        .redirect(Policy::none())
        .build()
        .expect("Failed to create HTTP client")
}

/// A fresh email so reruns never collide.
#[must_use]
pub fn unique_email(prefix: &str) -> String {
    format!("{prefix}-{}@example.com", uuid::Uuid::new_v4().simple())
}

/// The `Location` header of a redirect response.
#[must_use]
pub fn location(resp: &Response) -> &str {
    assert_eq!(resp.status(), StatusCode::SEE_OTHER, "expected a redirect");
    resp.headers()
        .get(LOCATION)
        .and_then(|v| v.to_str().ok())
        .expect("redirect without Location")
}

/// Register a new client account; the client is signed in afterwards.
pub async fn register(client: &Client, email: &str) -> Response {
    client
        .post(url("/register"))
        .form(&[
            ("email", email),
            ("password", TEST_PASSWORD),
            ("password_confirm", TEST_PASSWORD),
        ])
        .send()
        .await
        .expect("register request failed")
}

/// Submit the login form.
pub async fn login(client: &Client, email: &str, password: &str) -> Response {
    client
        .post(url("/login"))
        .form(&[("email", email), ("password", password)])
        .send()
        .await
        .expect("login request failed")
}

/// GET a path and return the response.
pub async fn get(client: &Client, path: &str) -> Response {
    client
        .get(url(path))
        .send()
        .await
        .expect("GET request failed")
}

/// POST a form to a path and return the response.
pub async fn post_form(client: &Client, path: &str, form: &[(&str, &str)]) -> Response {
    client
        .post(url(path))
        .form(form)
        .send()
        .await
        .expect("POST request failed")
}

/// Connect to the portal database.
pub async fn pool() -> sqlx::PgPool {
    let database_url = std::env::var("PORTAL_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .expect("PORTAL_DATABASE_URL must be set");
    sqlx::PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to portal database")
}

/// Give a user the admin role directly in the database.
pub async fn promote(pool: &sqlx::PgPool, email: &str) {
    sqlx::query("UPDATE portal.user SET role = $1 WHERE email = $2")
        .bind(arpk_core::Role::Admin.as_str())
        .bind(email)
        .execute(pool)
        .await
        .expect("Failed to promote user");
}
