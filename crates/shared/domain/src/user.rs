//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier assigned by the store when a user is inserted
pub type UserId = i64;

/// User domain entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    /// Alternate lookup key; uniqueness is left to the schema
    pub auth_token: String,
    /// Stamped by the database clock at insert time
    pub created_at: DateTime<Utc>,
}

/// User creation data transfer object.
///
/// Deserializes from any mapping with at least `name` and `auth_token`;
/// other keys are ignored. Values are forwarded as given, without validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateUser {
    /// User display name
    pub name: String,
    /// Token the user authenticates with
    pub auth_token: String,
}

impl CreateUser {
    pub fn new(name: impl Into<String>, auth_token: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            auth_token: auth_token.into(),
        }
    }
}
