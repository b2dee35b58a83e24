//! User repository backed by the SeaORM `users` entity.

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, Query};
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Select,
};

use super::entities::user::{Column, Entity as UserEntity};
use super::executor::QueryExecutor;
use common::{AppError, AppResult};
use domain::{page_offset, window_size, CreateUser, PaginatedUsers, User, UserId};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
///
/// Lookups that match nothing return `Ok(None)`. Query failures are passed
/// through as [`AppError::Database`] without retries.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// List every user, newest first
    async fn list_all(&self) -> AppResult<Vec<User>>;

    /// Fetch one page of users, newest first.
    ///
    /// Pages below 2 all start at the first row. `previous_page` is derived
    /// from `current_page` alone.
    async fn paginate(&self, per_page: u64, current_page: u64) -> AppResult<PaginatedUsers>;

    /// Find user by ID
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>>;

    /// Find user by exact auth token; the earliest created wins on duplicates
    async fn find_by_token(&self, token: &str) -> AppResult<Option<User>>;

    /// Insert a user and return the row as stored
    async fn create(&self, data: CreateUser) -> AppResult<User>;

    /// Delete user by ID, returning the number of rows removed
    async fn delete(&self, id: UserId) -> AppResult<u64>;
}

/// Concrete implementation of UserRepository
pub struct UserStore<C = DatabaseConnection> {
    db: C,
}

impl<C> UserStore<C> {
    /// Create new repository instance
    pub fn new(db: C) -> Self {
        Self { db }
    }

    /// Give back the executor, e.g. to commit a transaction
    pub fn into_inner(self) -> C {
        self.db
    }
}

// Listings order by creation time; id breaks ties within one clock second.
fn newest_first() -> Select<UserEntity> {
    UserEntity::find()
        .order_by_desc(Column::CreatedAt)
        .order_by_desc(Column::Id)
}

#[async_trait]
impl<C: QueryExecutor> UserRepository for UserStore<C> {
    async fn list_all(&self) -> AppResult<Vec<User>> {
        let users = newest_first().all(&self.db).await?;
        Ok(users.into_iter().map(User::from).collect())
    }

    async fn paginate(&self, per_page: u64, current_page: u64) -> AppResult<PaginatedUsers> {
        let limit = to_sql_int(window_size(per_page));
        let offset = to_sql_int(page_offset(per_page, current_page));
        tracing::debug!(per_page, current_page, limit, offset, "Paginating users");

        let rows = newest_first()
            .limit(limit)
            .offset(offset)
            .all(&self.db)
            .await?;

        Ok(PaginatedUsers::from_window(
            rows.into_iter().map(User::from).collect(),
            per_page,
            current_page,
        ))
    }

    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        let user = UserEntity::find_by_id(id).one(&self.db).await?;
        Ok(user.map(User::from))
    }

    async fn find_by_token(&self, token: &str) -> AppResult<Option<User>> {
        let user = UserEntity::find()
            .filter(Column::AuthToken.eq(token))
            .order_by_asc(Column::Id)
            .one(&self.db)
            .await?;

        Ok(user.map(User::from))
    }

    async fn create(&self, data: CreateUser) -> AppResult<User> {
        let insert = Query::insert()
            .into_table(UserEntity)
            .columns([Column::Name, Column::AuthToken, Column::CreatedAt])
            .values([
                data.name.into(),
                data.auth_token.into(),
                Expr::cust("DATETIME('now')"),
            ])
            .map_err(|e| AppError::internal(format!("Failed to build insert: {}", e)))?
            .to_owned();

        let backend = self.db.get_database_backend();
        let result = self.db.execute(backend.build(&insert)).await?;

        // Read back this insert's row, not the latest one
        let generated = result.last_insert_id();
        let id = UserId::try_from(generated).map_err(|_| {
            AppError::consistency(format!("Generated id {} does not fit a user id", generated))
        })?;

        let user = self.find_by_id(id).await?.ok_or_else(|| {
            AppError::consistency(format!("User {} was not found right after insert", id))
        })?;

        tracing::info!(user_id = user.id, "User created");
        Ok(user)
    }

    async fn delete(&self, id: UserId) -> AppResult<u64> {
        let result = UserEntity::delete_by_id(id).exec(&self.db).await?;

        tracing::info!(user_id = id, rows_affected = result.rows_affected, "User deleted");
        Ok(result.rows_affected)
    }
}

/// SQLite binds integers as i64; larger values clamp to its maximum.
fn to_sql_int(value: u64) -> u64 {
    value.min(i64::MAX as u64)
}
