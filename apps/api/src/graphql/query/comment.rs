//! Comment queries for BlogQL GraphQL API

use async_graphql::{Context, Object, Result, ID};

use crate::error::graphql_error;
use crate::graphql::types::Comment;

use super::{parse_id, store};

/// Comment-related queries
#[derive(Default)]
pub struct CommentQuery;

#[Object]
impl CommentQuery {
    /// Comments on one post, newest first
    async fn comments(&self, ctx: &Context<'_>, post_id: ID) -> Result<Vec<Comment>> {
        let post_id = parse_id(&post_id)?;
        let comments = store(ctx)?
            .comments_for_post(post_id)
            .await
            .map_err(graphql_error)?;
        Ok(comments.into_iter().map(Comment::from).collect())
    }
}
