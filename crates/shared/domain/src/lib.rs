//! Domain layer - Core user entities and paging rules.
//!
//! This crate contains pure domain logic with no infrastructure dependencies.
//! The store crate turns database rows into these types.

pub mod constants;
pub mod pagination;
pub mod user;

pub use constants::*;
pub use pagination::{page_offset, window_size, PaginatedUsers};
pub use user::{CreateUser, User, UserId};
