//! Data access layer for BlogQL
//!
//! The core never talks to a database directly. Everything it reads goes
//! through [`BlogStore`], one method per access pattern, each method issuing a
//! single statement parameterized by the full key set it is given. The
//! Postgres implementation lives in [`postgres`]; tests provide in-memory ones.

pub mod postgres;
pub mod utils;

pub use postgres::PgBlogStore;

use async_trait::async_trait;

use crate::models::{Category, Comment, LikedPost, Post, PostLiker, User};
use crate::pagination::{PostFilter, PostWindow};

/// Result type for store operations
pub type StoreResult<T> = Result<T, sqlx::Error>;

/// Read-only query interface consumed by the loaders and the pagination engine
///
/// Row order within a result is not significant unless stated; the batch
/// fetch functions re-associate rows to keys themselves.
#[async_trait]
pub trait BlogStore: Send + Sync + 'static {
    /// Users whose id is in `ids`
    async fn users_by_ids(&self, ids: &[i32]) -> StoreResult<Vec<User>>;

    /// Posts whose id is in `ids`
    async fn posts_by_ids(&self, ids: &[i32]) -> StoreResult<Vec<Post>>;

    /// Posts written by any of `author_ids`
    async fn posts_by_author_ids(&self, author_ids: &[i32]) -> StoreResult<Vec<Post>>;

    /// Comments attached to any of `post_ids`
    async fn comments_by_post_ids(&self, post_ids: &[i32]) -> StoreResult<Vec<Comment>>;

    /// Comments written by any of `author_ids`
    async fn comments_by_author_ids(&self, author_ids: &[i32]) -> StoreResult<Vec<Comment>>;

    /// `(post_id, count)` for every post in `post_ids` with at least one comment
    async fn comment_counts(&self, post_ids: &[i32]) -> StoreResult<Vec<(i32, i64)>>;

    /// `(post_id, count)` for every post in `post_ids` with at least one like
    async fn like_counts(&self, post_ids: &[i32]) -> StoreResult<Vec<(i32, i64)>>;

    /// One row per like on any of `post_ids`, carrying the liking user
    async fn likers_of_posts(&self, post_ids: &[i32]) -> StoreResult<Vec<PostLiker>>;

    /// One row per like by any of `user_ids`, carrying the liked post
    async fn posts_liked_by_users(&self, user_ids: &[i32]) -> StoreResult<Vec<LikedPost>>;

    /// All users, newest first
    async fn list_users(&self) -> StoreResult<Vec<User>>;

    /// All posts, newest first
    async fn list_posts(&self) -> StoreResult<Vec<Post>>;

    /// Posts in a category, newest first
    async fn posts_by_category(&self, category: Category) -> StoreResult<Vec<Post>>;

    /// Comments on a single post, newest first
    async fn comments_for_post(&self, post_id: i32) -> StoreResult<Vec<Comment>>;

    /// Full-text search over title and content, best match first
    async fn search_posts(&self, query: &str, limit: i64) -> StoreResult<Vec<Post>>;

    /// One pagination window: filtered, cursor-bounded, ordered and limited
    async fn fetch_post_window(&self, window: &PostWindow) -> StoreResult<Vec<Post>>;

    /// Number of posts matching `filter`, ignoring cursor and limit
    async fn count_posts(&self, filter: &PostFilter) -> StoreResult<i64>;
}
