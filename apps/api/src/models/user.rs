//! User model for BlogQL

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// User role enum matching PostgreSQL user_role type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    Author,
    #[default]
    Reader,
}

impl Role {
    /// Whether this role may see other users' restricted fields
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

/// User record from the users table
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct User {
    /// Unique user identifier
    pub id: i32,

    /// Display name
    pub name: String,

    /// Email address (visibility-restricted at the API layer)
    pub email: String,

    /// Role granted to this user
    pub role: Role,

    /// When the account was created
    pub created_at: DateTime<Utc>,
}
