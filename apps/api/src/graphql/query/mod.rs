//! GraphQL queries for BlogQL
//!
//! This module contains all query resolvers, organized by domain.

mod comment;
mod post;
mod user;

pub use comment::CommentQuery;
pub use post::PostQuery;
pub use user::UserQuery;

use std::sync::Arc;

use async_graphql::{Context, MergedObject, Result, ID};

use crate::error::{graphql_error, ApiError};
use crate::repositories::BlogStore;

/// Root query type combining all query domains
#[derive(MergedObject, Default)]
pub struct Query(UserQuery, PostQuery, CommentQuery);

/// Parse a GraphQL id into a primary key
fn parse_id(id: &ID) -> Result<i32> {
    id.parse::<i32>().map_err(|_| {
        graphql_error(ApiError::ValidationError(format!(
            "invalid id: {}",
            id.as_str()
        )))
    })
}

fn store<'a>(ctx: &'a Context<'_>) -> Result<&'a Arc<dyn BlogStore>> {
    ctx.data::<Arc<dyn BlogStore>>()
}
