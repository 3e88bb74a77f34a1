//! CLI subcommands.

pub mod migrate;
pub mod user;

use arpk_portal::db::RepositoryError;
use arpk_portal::services::auth::AuthError;
use secrecy::SecretString;
use sqlx::PgPool;
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database connection error.
    #[error("Database connection error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration error.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Invalid email.
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] arpk_core::EmailError),

    /// No user has this email.
    #[error("No user found with email: {0}")]
    UserNotFound(String),

    /// Repository error.
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// Account creation failed.
    #[error(transparent)]
    Auth(#[from] AuthError),
}

/// Connect to the portal database named by the environment.
pub async fn connect() -> Result<PgPool, CommandError> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("PORTAL_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map_err(|_| CommandError::MissingEnvVar("PORTAL_DATABASE_URL"))?;

    tracing::info!("Connecting to portal database...");
    Ok(arpk_portal::db::create_pool(&SecretString::from(database_url)).await?)
}
