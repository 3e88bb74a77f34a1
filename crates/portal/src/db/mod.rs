//! Database operations for the portal `PostgreSQL` database.
//!
//! ## Tables (schema `portal`)
//!
//! - `user` - Accounts and their role
//! - `user_password` - Argon2 password hashes
//! - `website_request` - Website-build requests from clients
//! - `project` - Projects assigned to clients by admins
//! - `payment_request` - Payment requests from clients
//! - `discount` - Discount codes
//!
//! Sessions live in `tower_sessions.session`.
//!
//! # Migrations
//!
//! Migrations are stored in `crates/portal/migrations/` and run via:
//! ```bash
//! cargo run -p arpk-cli -- migrate
//! ```
//!
//! Queries are built at runtime with `sqlx::query_as` and bound parameters, so
//! the crate builds without a live database or offline query cache.

pub mod discounts;
pub mod payment_requests;
pub mod projects;
pub mod users;
pub mod website_requests;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use discounts::DiscountRepository;
pub use payment_requests::PaymentRequestRepository;
pub use projects::ProjectRepository;
pub use users::UserRepository;
pub use website_requests::WebsiteRequestRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Map a unique-constraint violation to [`RepositoryError::Conflict`].
pub(crate) fn conflict_on_unique(e: sqlx::Error, what: &str) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e
        && db_err.is_unique_violation()
    {
        return RepositoryError::Conflict(format!("{what} already exists"));
    }
    RepositoryError::Database(e)
}

/// Parse an email read back from the database.
pub(crate) fn stored_email(raw: &str) -> Result<arpk_core::Email, RepositoryError> {
    arpk_core::Email::parse(raw)
        .map_err(|e| RepositoryError::DataCorruption(format!("invalid email in database: {e}")))
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stored_email() {
        assert!(stored_email("client@example.com").is_ok());
        assert!(matches!(
            stored_email("garbage"),
            Err(RepositoryError::DataCorruption(_))
        ));
    }

    #[test]
    fn test_conflict_passes_through_other_errors() {
        assert!(matches!(
            conflict_on_unique(sqlx::Error::RowNotFound, "email"),
            RepositoryError::Database(sqlx::Error::RowNotFound)
        ));
    }
}
