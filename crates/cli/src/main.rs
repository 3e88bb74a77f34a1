//! ARPK CLI - Database migrations and user management.
//!
//! # Usage
//!
//! ```bash
//! # Run portal database migrations
//! arpk-cli migrate
//!
//! # Give an existing user the admin role
//! arpk-cli user promote -e admin@example.com
//!
//! # Put an admin back to the client role
//! arpk-cli user demote -e admin@example.com
//!
//! # Create an account with a password
//! arpk-cli user create -e ops@example.com -p 'correct horse battery' -r admin
//! ```
//!
//! # Environment Variables
//!
//! - `PORTAL_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use arpk_core::Role;
use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "arpk-cli")]
#[command(author, version, about = "ARPK portal CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run portal database migrations
    Migrate,
    /// Manage portal users
    User {
        #[command(subcommand)]
        action: UserAction,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// Grant the admin role
    Promote {
        /// User email address
        #[arg(short, long)]
        email: String,
    },
    /// Revoke the admin role
    Demote {
        /// User email address
        #[arg(short, long)]
        email: String,
    },
    /// Create a user with a password
    Create {
        /// User email address
        #[arg(short, long)]
        email: String,

        /// Initial password (8 to 128 characters)
        #[arg(short, long)]
        password: String,

        /// Role (`client` or `admin`)
        #[arg(short, long, default_value = "client")]
        role: Role,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CommandError> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::User { action } => match action {
            UserAction::Promote { email } => {
                commands::user::set_role(&email, Role::Admin).await?;
            }
            UserAction::Demote { email } => {
                commands::user::set_role(&email, Role::Client).await?;
            }
            UserAction::Create {
                email,
                password,
                role,
            } => {
                commands::user::create(&email, &password, role).await?;
            }
        },
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_create_defaults_to_client() {
        let cli = Cli::try_parse_from([
            "arpk-cli", "user", "create", "-e", "a@example.com", "-p", "password123",
        ]);
        assert!(matches!(
            cli.map(|c| c.command),
            Ok(Commands::User {
                action: UserAction::Create {
                    role: Role::Client,
                    ..
                }
            })
        ));
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        let cli = Cli::try_parse_from([
            "arpk-cli", "user", "create", "-e", "a@example.com", "-p", "password123", "-r", "root",
        ]);
        assert!(cli.is_err());
    }
}
