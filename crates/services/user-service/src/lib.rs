//! User Service Library
//!
//! Data access for the `users` relation: listing, look-ahead pagination,
//! lookups by id and auth token, creation with read-back, and deletion.
//! Every operation is async and runs against an embedded SQLite database
//! through SeaORM.
//!
//! # Example
//!
//! ```rust,no_run
//! use common::DatabaseConfig;
//! use domain::CreateUser;
//! use user_service_lib::infra::Database;
//! use user_service_lib::repository::{UserRepository, UserStore};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = Database::connect(&DatabaseConfig::default()).await?;
//! let store = UserStore::new(db.get_connection());
//!
//! let alice = store.create(CreateUser::new("Alice", "tok-1")).await?;
//! let page = store.paginate(15, 1).await?;
//! assert!(page.users.iter().any(|u| u.id == alice.id));
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod infra;
pub mod repository;

use serde_json::Value as JsonValue;
use tracing::info;

use common::{AppError, AppResult, OptionExt};
use domain::{CreateUser, UserId};

use crate::config::UserServiceConfig;
use crate::infra::Database;
use crate::repository::{UserRepository, UserStore};

/// Migration action type.
#[derive(Debug, Clone, Copy)]
pub enum MigrateAction {
    Up,
    Down,
    Status,
    Fresh,
}

/// Operator command against the users relation.
#[derive(Debug, Clone)]
pub enum UserCommand {
    List,
    Page { per_page: u64, page: u64 },
    Show { id: UserId },
    Token { token: String },
    Create(CreateUser),
    Delete { id: UserId },
}

/// Run migrations (for CLI commands).
pub async fn run_migrations(config: &UserServiceConfig, action: MigrateAction) -> AppResult<()> {
    let db = Database::connect_without_migrations(&config.database).await?;

    match action {
        MigrateAction::Up => {
            db.run_migrations().await?;
            info!("Migrations applied successfully");
        }
        MigrateAction::Down => {
            db.rollback_migration().await?;
            info!("Rolled back last migration");
        }
        MigrateAction::Status => {
            let status = db.migration_status().await?;
            for (name, applied) in status {
                let marker = if applied { "[x]" } else { "[ ]" };
                println!("{} {}", marker, name);
            }
        }
        MigrateAction::Fresh => {
            db.fresh_migrations().await?;
            info!("Database reset and migrations applied");
        }
    }

    Ok(())
}

/// Connect, apply pending migrations, and run a user command.
pub async fn run_user_command(
    config: &UserServiceConfig,
    command: UserCommand,
) -> AppResult<JsonValue> {
    let db = Database::connect(&config.database).await?;
    let store = UserStore::new(db.get_connection());

    execute_user_command(&store, command).await
}

/// Run a user command against any repository and render the result as JSON.
///
/// Lookups that find nothing are reported as [`AppError::NotFound`] here,
/// since an operator asked for a specific user.
pub async fn execute_user_command<R>(repo: &R, command: UserCommand) -> AppResult<JsonValue>
where
    R: UserRepository + ?Sized,
{
    let output = match command {
        UserCommand::List => to_json(&repo.list_all().await?)?,
        UserCommand::Page { per_page, page } => to_json(&repo.paginate(per_page, page).await?)?,
        UserCommand::Show { id } => to_json(&repo.find_by_id(id).await?.ok_or_not_found()?)?,
        UserCommand::Token { token } => {
            to_json(&repo.find_by_token(&token).await?.ok_or_not_found()?)?
        }
        UserCommand::Create(data) => to_json(&repo.create(data).await?)?,
        UserCommand::Delete { id } => {
            let rows_affected = repo.delete(id).await?;
            serde_json::json!({ "id": id, "rows_affected": rows_affected })
        }
    };

    Ok(output)
}

/// One-line failure report for the operator: error code plus the
/// user-facing message. Details of hidden errors go to the log.
pub fn failure_message(error: &AppError) -> String {
    format!("{}: {}", error.code(), error.user_message())
}

fn to_json<T: serde::Serialize>(value: &T) -> AppResult<JsonValue> {
    serde_json::to_value(value)
        .map_err(|e| AppError::internal(format!("Failed to render output: {}", e)))
}
