//! Repository layer for data access.

pub mod entities;
mod executor;
mod user_repository;

pub use executor::QueryExecutor;
pub use user_repository::{UserRepository, UserStore};

// Export mock for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
