//! Post GraphQL type
//!
//! This module defines the GraphQL type for posts, its relationship
//! resolvers, and the result union of the single-post lookup.

use async_graphql::{Context, Object, Result, SimpleObject, Union, ID};
use chrono::{DateTime, Utc};

use crate::error::{graphql_error, ApiError};
use crate::graphql::loaders::Loaders;
use crate::models::Post as DbPost;

use super::comment::Comment;
use super::enums::{Category, PostStatus};
use super::user::User;

/// Blog post exposed via GraphQL
pub struct Post {
    inner: DbPost,
}

impl Post {
    /// Create a new GraphQL Post from a database Post
    pub fn new(post: DbPost) -> Self {
        Self { inner: post }
    }
}

impl From<DbPost> for Post {
    fn from(post: DbPost) -> Self {
        Self::new(post)
    }
}

#[Object]
impl Post {
    /// Unique post identifier
    async fn id(&self) -> ID {
        ID::from(self.inner.id)
    }

    /// Post title
    async fn title(&self) -> &str {
        &self.inner.title
    }

    /// Post body
    async fn content(&self) -> &str {
        &self.inner.content
    }

    async fn category(&self) -> Category {
        self.inner.category.into()
    }

    async fn status(&self) -> PostStatus {
        self.inner.status.into()
    }

    /// View counter
    async fn views(&self) -> i32 {
        self.inner.views
    }

    /// Creation timestamp
    async fn created_at(&self) -> DateTime<Utc> {
        self.inner.created_at
    }

    /// Last update timestamp
    async fn updated_at(&self) -> DateTime<Utc> {
        self.inner.updated_at
    }

    // Relationship resolvers

    /// Author of this post
    async fn author(&self, ctx: &Context<'_>) -> Result<User> {
        let loaders = ctx.data::<Loaders>()?;
        loaders
            .user_by_id
            .load(self.inner.author_id)
            .await
            .map_err(graphql_error)?
            .map(User::from)
            .ok_or_else(|| graphql_error(ApiError::not_found("user", self.inner.author_id)))
    }

    /// Comments on this post
    async fn comments(&self, ctx: &Context<'_>) -> Result<Vec<Comment>> {
        let loaders = ctx.data::<Loaders>()?;
        let comments = loaders
            .comments_by_post
            .load(self.inner.id)
            .await
            .map_err(graphql_error)?;
        Ok(comments
            .unwrap_or_default()
            .into_iter()
            .map(Comment::from)
            .collect())
    }

    /// Number of comments on this post
    async fn comment_count(&self, ctx: &Context<'_>) -> Result<i64> {
        let loaders = ctx.data::<Loaders>()?;
        let count = loaders
            .comment_count_by_post
            .load(self.inner.id)
            .await
            .map_err(graphql_error)?;
        Ok(count.unwrap_or(0))
    }

    /// Number of likes on this post
    async fn likes_count(&self, ctx: &Context<'_>) -> Result<i64> {
        let loaders = ctx.data::<Loaders>()?;
        let count = loaders
            .like_count_by_post
            .load(self.inner.id)
            .await
            .map_err(graphql_error)?;
        Ok(count.unwrap_or(0))
    }

    /// Users who liked this post
    async fn liked_by(&self, ctx: &Context<'_>) -> Result<Vec<User>> {
        let loaders = ctx.data::<Loaders>()?;
        let users = loaders
            .likers_by_post
            .load(self.inner.id)
            .await
            .map_err(graphql_error)?;
        Ok(users.unwrap_or_default().into_iter().map(User::from).collect())
    }
}

/// Returned instead of a post when the id matches nothing
#[derive(Debug, Clone, SimpleObject)]
pub struct PostNotFoundError {
    /// HTTP-style status, always 404
    pub status_code: i32,
    pub message: String,
}

impl PostNotFoundError {
    pub fn new(id: i32) -> Self {
        Self {
            status_code: 404,
            message: format!("Post with id {} not found", id),
        }
    }
}

/// Outcome of looking up a single post
#[derive(Union)]
pub enum PostResult {
    Post(Post),
    PostNotFoundError(PostNotFoundError),
}
