//! Like models for BlogQL
//!
//! A like is keyed by the `(author_id, post_id)` pair; the table's primary key
//! enforces at most one like per user and post. The join rows below carry the
//! key that the fan-out loaders group by.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use super::{Post, User};

/// Like record from the likes table
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Like {
    /// User who liked the post
    pub author_id: i32,

    /// Post that was liked
    pub post_id: i32,

    /// When the like was recorded
    pub created_at: DateTime<Utc>,
}

/// A user who liked a given post (likes JOIN users)
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct PostLiker {
    /// The liked post
    pub post_id: i32,

    #[sqlx(flatten)]
    pub user: User,
}

/// A post liked by a given user (likes JOIN posts)
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct LikedPost {
    /// The user who liked the post
    pub liker_id: i32,

    #[sqlx(flatten)]
    pub post: Post,
}
