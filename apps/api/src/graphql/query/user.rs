//! User queries for BlogQL GraphQL API
//!
//! - users: List every user
//! - user: Get a user by ID

use async_graphql::{Context, Object, Result, ID};

use crate::error::graphql_error;
use crate::graphql::loaders::Loaders;
use crate::graphql::types::User;

use super::{parse_id, store};

/// User-related queries
#[derive(Default)]
pub struct UserQuery;

#[Object]
impl UserQuery {
    /// List every user
    ///
    /// Fetched users seed the request's user cache, so nested `author`
    /// fields pointing back at them cost no further query.
    async fn users(&self, ctx: &Context<'_>) -> Result<Vec<User>> {
        let loaders = ctx.data::<Loaders>()?;
        let users = store(ctx)?.list_users().await.map_err(graphql_error)?;

        for user in &users {
            loaders.user_by_id.prime(user.id, Some(user.clone()));
        }

        Ok(users.into_iter().map(User::from).collect())
    }

    /// Get a user by ID
    async fn user(&self, ctx: &Context<'_>, id: ID) -> Result<Option<User>> {
        let id = parse_id(&id)?;
        let loaders = ctx.data::<Loaders>()?;
        let user = loaders.user_by_id.load(id).await.map_err(graphql_error)?;
        Ok(user.map(User::from))
    }
}
