//! Query execution seam over the relational engine.

use sea_orm::ConnectionTrait;

/// Async parameterized query execution.
///
/// Implemented for every SeaORM connection, so a store can run over a pool,
/// a transaction, or a mock connection. Statements are built with SeaORM's
/// query builder and bound positionally for the connection's backend.
/// Errors are returned as the engine reports them.
pub trait QueryExecutor: ConnectionTrait + Send + Sync {}

impl<C> QueryExecutor for C where C: ConnectionTrait + Send + Sync {}
