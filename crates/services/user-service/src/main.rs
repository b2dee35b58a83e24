//! User Service - operator CLI for the users database.

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use common::{AppError, AppResult};
use domain::{CreateUser, UserId, DEFAULT_PER_PAGE, FIRST_PAGE};
use user_service_lib::config::UserServiceConfig;
use user_service_lib::{MigrateAction, UserCommand};

#[derive(Parser)]
#[command(name = "user-service")]
#[command(about = "User records store")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Database migration commands
    Migrate {
        #[command(subcommand)]
        action: MigrateCommands,
    },
    /// Query and manage user records
    Users {
        #[command(subcommand)]
        command: UserCommands,
    },
}

#[derive(Subcommand)]
enum MigrateCommands {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Reset database and run all migrations
    Fresh,
}

#[derive(Subcommand)]
enum UserCommands {
    /// List all users, newest first
    List,
    /// Show one page of users, newest first
    Page {
        #[arg(long, default_value_t = DEFAULT_PER_PAGE)]
        per_page: u64,
        #[arg(long, default_value_t = FIRST_PAGE)]
        page: u64,
    },
    /// Show a user by ID
    Show { id: UserId },
    /// Show the user owning an auth token
    Token { token: String },
    /// Create a user
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        auth_token: String,
    },
    /// Delete a user by ID
    Delete { id: UserId },
}

impl From<MigrateCommands> for MigrateAction {
    fn from(action: MigrateCommands) -> Self {
        match action {
            MigrateCommands::Up => MigrateAction::Up,
            MigrateCommands::Down => MigrateAction::Down,
            MigrateCommands::Status => MigrateAction::Status,
            MigrateCommands::Fresh => MigrateAction::Fresh,
        }
    }
}

impl From<UserCommands> for UserCommand {
    fn from(command: UserCommands) -> Self {
        match command {
            UserCommands::List => UserCommand::List,
            UserCommands::Page { per_page, page } => UserCommand::Page { per_page, page },
            UserCommands::Show { id } => UserCommand::Show { id },
            UserCommands::Token { token } => UserCommand::Token { token },
            UserCommands::Create { name, auth_token } => {
                UserCommand::Create(CreateUser::new(name, auth_token))
            }
            UserCommands::Delete { id } => UserCommand::Delete { id },
        }
    }
}

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = run(cli.command).await;

    // Handle errors
    if let Err(e) = result {
        tracing::debug!(error = %e, "Command failed");
        eprintln!("Error: {}", user_service_lib::failure_message(&e));
        std::process::exit(1);
    }
}

/// Load configuration and dispatch the command
async fn run(command: Commands) -> AppResult<()> {
    let config = UserServiceConfig::from_env()?;
    tracing::debug!(?config, "Configuration loaded");

    match command {
        Commands::Migrate { action } => {
            user_service_lib::run_migrations(&config, action.into()).await
        }
        Commands::Users { command } => {
            let output = user_service_lib::run_user_command(&config, command.into()).await?;
            let text = serde_json::to_string_pretty(&output)
                .map_err(|e| AppError::internal(format!("Failed to render output: {}", e)))?;
            println!("{}", text);
            Ok(())
        }
    }
}

/// Initialize tracing subscriber (logs go to stderr, output to stdout)
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        tracing_subscriber::EnvFilter::new("debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into())
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
