//! User GraphQL type
//!
//! Relationship fields resolve through the request's loaders, so a list of
//! users asking for their posts costs one query, not one per user.

use async_graphql::{Context, Object, Result, ID};
use chrono::{DateTime, Utc};

use crate::error::graphql_error;
use crate::graphql::loaders::Loaders;
use crate::graphql::viewer::Viewer;
use crate::models::User as DbUser;

use super::comment::Comment;
use super::enums::Role;
use super::post::Post;

/// User account exposed via GraphQL
pub struct User {
    inner: DbUser,
}

impl User {
    /// Create a new GraphQL User from a database User
    pub fn new(user: DbUser) -> Self {
        Self { inner: user }
    }
}

impl From<DbUser> for User {
    fn from(user: DbUser) -> Self {
        Self::new(user)
    }
}

#[Object]
impl User {
    /// Unique user identifier
    async fn id(&self) -> ID {
        ID::from(self.inner.id)
    }

    /// Display name
    async fn name(&self) -> &str {
        &self.inner.name
    }

    /// Email address, visible to the user themself and to admins only
    async fn email(&self, ctx: &Context<'_>) -> Option<String> {
        ctx.data_opt::<Viewer>()
            .filter(|viewer| viewer.can_see_private_fields_of(self.inner.id))
            .map(|_| self.inner.email.clone())
    }

    /// Role granted to this user
    async fn role(&self) -> Role {
        self.inner.role.into()
    }

    /// Account creation timestamp
    async fn created_at(&self) -> DateTime<Utc> {
        self.inner.created_at
    }

    // Relationship resolvers

    /// Posts written by this user
    async fn posts(&self, ctx: &Context<'_>) -> Result<Vec<Post>> {
        let loaders = ctx.data::<Loaders>()?;
        let posts = loaders
            .posts_by_author
            .load(self.inner.id)
            .await
            .map_err(graphql_error)?;
        Ok(posts.unwrap_or_default().into_iter().map(Post::from).collect())
    }

    /// Comments written by this user
    async fn comments(&self, ctx: &Context<'_>) -> Result<Vec<Comment>> {
        let loaders = ctx.data::<Loaders>()?;
        let comments = loaders
            .comments_by_author
            .load(self.inner.id)
            .await
            .map_err(graphql_error)?;
        Ok(comments
            .unwrap_or_default()
            .into_iter()
            .map(Comment::from)
            .collect())
    }

    /// Posts this user has liked
    async fn liked_posts(&self, ctx: &Context<'_>) -> Result<Vec<Post>> {
        let loaders = ctx.data::<Loaders>()?;
        let posts = loaders
            .liked_posts_by_user
            .load(self.inner.id)
            .await
            .map_err(graphql_error)?;
        Ok(posts.unwrap_or_default().into_iter().map(Post::from).collect())
    }
}
