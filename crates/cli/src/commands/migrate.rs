//! Database migration command.
//!
//! Applies `crates/portal/migrations/`. The portal never migrates on startup,
//! so run this before the first deploy and after each schema change.

use super::{CommandError, connect};

/// Run portal database migrations.
pub async fn run() -> Result<(), CommandError> {
    let pool = connect().await?;

    tracing::info!("Running portal migrations...");
    sqlx::migrate!("../portal/migrations").run(&pool).await?;

    tracing::info!("Portal migrations complete!");
    Ok(())
}
