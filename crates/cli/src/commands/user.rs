//! User management commands.
//!
//! Role changes take effect on the user's next request: the portal re-reads
//! the role from the database instead of trusting the session.

use arpk_core::{Email, Role};
use arpk_portal::db::{RepositoryError, UserRepository};
use arpk_portal::services::auth::AuthService;

use super::{CommandError, connect};

/// Set the role of an existing user.
pub async fn set_role(email: &str, role: Role) -> Result<(), CommandError> {
    let email = Email::parse(email)?;
    let pool = connect().await?;

    let user = UserRepository::new(&pool)
        .set_role(&email, role)
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => CommandError::UserNotFound(email.to_string()),
            other => CommandError::Repository(other),
        })?;

    tracing::info!("User {} now has role: {}", user.email, user.role);
    Ok(())
}

/// Create a user with a password and role.
pub async fn create(email: &str, password: &str, role: Role) -> Result<(), CommandError> {
    let email = Email::parse(email)?;
    let pool = connect().await?;

    let user = AuthService::new(&pool)
        .create_user(&email, password, role)
        .await?;

    tracing::info!(
        "User created successfully! ID: {}, Email: {}, Role: {}",
        user.id,
        user.email,
        user.role
    );
    Ok(())
}
