//! Administrative command-line interface for a postbox database.
//!
//! Usage:
//!
//! ```text
//! postbox migrate
//! postbox create-user <username> <email> <first-name> <last-name>
//! postbox summary <username>
//! postbox history <message-id>
//! postbox delete-user <username> --confirm delete
//! ```
//!
//! Settings come from the environment (a `.env` file is honoured); see
//! [`postbox::config`].

use clap::{Parser, Subcommand};
use mockable::DefaultClock;
use postbox::config::{Config, ConfigError};
use postbox::messaging::domain::MessageId;
use postbox::messaging::services::{MessagingError, MessagingService};
use postbox::store::StoreError;
use postbox::store::postgres::{PostgresStore, build_pool};
use postbox::telemetry;
use postbox::user::services::{RegisterUserRequest, UserService, UserServiceError};
use serde::Serialize;
use std::io::{self, Write};
use std::sync::Arc;
use thiserror::Error;
use tokio::runtime::Builder;
use uuid::Uuid;

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Parser)]
#[command(name = "postbox", version, about = "Manage a postbox messaging database")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create or upgrade the database schema.
    Migrate,
    /// Register a new user account.
    CreateUser {
        /// Unique login name.
        username: String,
        /// Email address.
        email: String,
        /// Given name.
        first_name: String,
        /// Family name.
        last_name: String,
    },
    /// Print the data summary of an account as JSON.
    Summary {
        /// Account to summarise.
        username: String,
    },
    /// Print the edit history of a message as JSON.
    History {
        /// Message identifier.
        message_id: String,
    },
    /// Delete an account and everything it owns.
    DeleteUser {
        /// Account to delete.
        username: String,
        /// Must be `delete`.
        #[arg(long)]
        confirm: String,
    },
}

#[derive(Debug, Error)]
enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    User(#[from] UserServiceError),
    #[error(transparent)]
    Messaging(#[from] MessagingError),
    #[error("invalid message id '{0}'")]
    InvalidMessageId(String),
    #[error("runtime init failed: {0}")]
    RuntimeInit(#[source] io::Error),
    #[error("failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("failed to write output: {0}")]
    Write(#[from] io::Error),
}

fn main() -> Result<(), BoxError> {
    let cli = Cli::parse();
    // A missing .env file is fine; the process environment still applies.
    let _env_file = dotenvy::dotenv();
    let config = Config::from_env().map_err(CliError::from)?;
    telemetry::init(config.log_filter());

    let runtime = Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(CliError::RuntimeInit)?;
    runtime.block_on(run(cli.command, &config)).map_err(Into::into)
}

async fn run(command: Command, config: &Config) -> Result<(), CliError> {
    let store = Arc::new(PostgresStore::new(build_pool(config.database())?));
    let clock = Arc::new(DefaultClock);
    let users = UserService::new(Arc::clone(&store), Arc::clone(&clock));
    let messaging = MessagingService::new(Arc::clone(&store), clock);

    match command {
        Command::Migrate => {
            store.migrate().await?;
            tracing::info!("database schema is up to date");
        }
        Command::CreateUser {
            username,
            email,
            first_name,
            last_name,
        } => {
            let user = users
                .register(RegisterUserRequest::new(
                    username, email, first_name, last_name,
                ))
                .await?;
            print_json(&user)?;
        }
        Command::Summary { username } => {
            let user = users.find_by_username(&username).await?;
            print_json(&messaging.user_data_summary(user.id()).await?)?;
        }
        Command::History { message_id } => {
            let id = Uuid::parse_str(message_id.trim())
                .map(MessageId::from_uuid)
                .map_err(|_| CliError::InvalidMessageId(message_id.clone()))?;
            print_json(&messaging.history_view(id).await?)?;
        }
        Command::DeleteUser { username, confirm } => {
            let user = users.find_by_username(&username).await?;
            print_json(&messaging.delete_user(user.id(), &confirm).await?)?;
        }
    }
    Ok(())
}

fn print_json(value: &impl Serialize) -> Result<(), CliError> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}
