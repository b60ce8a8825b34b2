//! Comment GraphQL type

use async_graphql::{Context, Object, Result, ID};
use chrono::{DateTime, Utc};

use crate::error::{graphql_error, ApiError};
use crate::graphql::loaders::Loaders;
use crate::models::Comment as DbComment;

use super::post::Post;
use super::user::User;

/// Comment exposed via GraphQL
pub struct Comment {
    inner: DbComment,
}

impl From<DbComment> for Comment {
    fn from(comment: DbComment) -> Self {
        Self { inner: comment }
    }
}

#[Object]
impl Comment {
    async fn id(&self) -> ID {
        ID::from(self.inner.id)
    }

    async fn content(&self) -> &str {
        &self.inner.content
    }

    async fn created_at(&self) -> DateTime<Utc> {
        self.inner.created_at
    }

    /// Post this comment belongs to
    async fn post(&self, ctx: &Context<'_>) -> Result<Post> {
        let loaders = ctx.data::<Loaders>()?;
        loaders
            .post_by_id
            .load(self.inner.post_id)
            .await
            .map_err(graphql_error)?
            .map(Post::from)
            .ok_or_else(|| graphql_error(ApiError::not_found("post", self.inner.post_id)))
    }

    /// Author of this comment
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
}
