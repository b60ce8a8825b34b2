//! Comment model for BlogQL

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// Comment record from the comments table
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Comment {
    /// Unique comment identifier
    pub id: i32,

    /// Comment body
    pub content: String,

    /// Post this comment belongs to
    pub post_id: i32,

    /// User who wrote the comment
    pub author_id: i32,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}
