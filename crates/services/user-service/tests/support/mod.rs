//! Test helpers and fixtures for store integration tests.
//!
//! Each test gets its own in-memory SQLite database with migrations applied.

#![allow(dead_code)]

use common::DatabaseConfig;
use domain::UserId;
use sea_orm::{ConnectionTrait, DatabaseConnection, DbBackend, Statement};
use user_service_lib::infra::Database;
use user_service_lib::repository::UserStore;

/// Fresh database with the users table in place
pub async fn test_db() -> Database {
    Database::connect(&DatabaseConfig::in_memory())
        .await
        .expect("Failed to open in-memory database")
}

/// Fresh database plus a store over it
pub async fn test_store() -> (Database, UserStore<DatabaseConnection>) {
    let db = test_db().await;
    let store = UserStore::new(db.get_connection());
    (db, store)
}

/// Test fixture: insert a user with a fixed creation time.
///
/// `created_at` uses SQLite's `YYYY-MM-DD HH:MM:SS` text form.
pub async fn insert_user_at(db: &Database, name: &str, token: &str, created_at: &str) -> UserId {
    let stmt = Statement::from_sql_and_values(
        DbBackend::Sqlite,
        "INSERT INTO users (name, auth_token, created_at) VALUES (?, ?, ?)",
        [name.into(), token.into(), created_at.into()],
    );
    let result = db
        .connection()
        .execute(stmt)
        .await
        .expect("Failed to insert test user");

    result.last_insert_id() as UserId
}

/// Test fixture: three users created at t1 < t2 < t3, returned in that order
pub async fn seed_three_users(db: &Database) -> [UserId; 3] {
    [
        insert_user_at(db, "first", "tok-1", "2024-01-01 10:00:00").await,
        insert_user_at(db, "second", "tok-2", "2024-01-01 11:00:00").await,
        insert_user_at(db, "third", "tok-3", "2024-01-01 12:00:00").await,
    ]
}
