//! Post queries for BlogQL GraphQL API
//!
//! This module provides queries over posts:
//! - posts: Every post, newest first
//! - post: A single post, or a not-found result
//! - postsByCategory: Posts filed under one category
//! - paginatedPosts: Cursor-paginated, filtered, ordered posts
//! - searchPosts: Full-text search ranked by relevance

use async_graphql::{Context, Object, Result, ID};

use crate::error::graphql_error;
use crate::graphql::loaders::Loaders;
use crate::graphql::types::{
    Category, Post, PostConnection, PostNotFoundError, PostOrderBy, PostResult, PostStatus,
};
use crate::models::Post as DbPost;
use crate::pagination::{
    clamp_limit, paginate_posts, PaginationConfig, PostFilter, PostPageArgs,
    DEFAULT_SEARCH_LIMIT, MAX_SEARCH_LIMIT,
};

use super::{parse_id, store};

/// Post-related queries
#[derive(Default)]
pub struct PostQuery;

#[Object]
impl PostQuery {
    /// Every post, newest first
    async fn posts(&self, ctx: &Context<'_>) -> Result<Vec<Post>> {
        let posts = store(ctx)?.list_posts().await.map_err(graphql_error)?;
        prime_posts(ctx, posts)
    }

    /// Get a post by ID
    async fn post(&self, ctx: &Context<'_>, id: ID) -> Result<PostResult> {
        let id = parse_id(&id)?;
        let loaders = ctx.data::<Loaders>()?;

        Ok(match loaders.post_by_id.load(id).await.map_err(graphql_error)? {
            Some(post) => PostResult::Post(Post::from(post)),
            None => PostResult::PostNotFoundError(PostNotFoundError::new(id)),
        })
    }

    /// Posts filed under one category, newest first
    async fn posts_by_category(&self, ctx: &Context<'_>, category: Category) -> Result<Vec<Post>> {
        let posts = store(ctx)?
            .posts_by_category(category.into())
            .await
            .map_err(graphql_error)?;
        prime_posts(ctx, posts)
    }

    /// Cursor-paginated posts
    ///
    /// `first` defaults to 10 and is clamped to the configured maximum.
    /// `after` is the `cursor` of the last edge already seen.
    async fn paginated_posts(
        &self,
        ctx: &Context<'_>,
        first: Option<i32>,
        after: Option<String>,
        category: Option<Category>,
        status: Option<PostStatus>,
        order_by: Option<PostOrderBy>,
        search: Option<String>,
    ) -> Result<PostConnection> {
        let config = ctx
            .data_opt::<PaginationConfig>()
            .copied()
            .unwrap_or_default();

        let args = PostPageArgs {
            first,
            after,
            order_by: order_by.unwrap_or_default().into(),
            filter: PostFilter {
                category: category.map(Into::into),
                status: status.map(Into::into),
                search: search.filter(|query| !query.trim().is_empty()),
            },
        };

        let page = paginate_posts(store(ctx)?.as_ref(), &args, &config)
            .await
            .map_err(graphql_error)?;
        Ok(PostConnection::from(page))
    }

    /// Full-text search over titles and bodies
    async fn search_posts(
        &self,
        ctx: &Context<'_>,
        query: String,
        #[graphql(default_with = "DEFAULT_SEARCH_LIMIT")] limit: i32,
    ) -> Result<Vec<Post>> {
        let limit = clamp_limit(limit, MAX_SEARCH_LIMIT);
        let posts = store(ctx)?
            .search_posts(&query, limit)
            .await
            .map_err(graphql_error)?;
        prime_posts(ctx, posts)
    }
}

/// Seed the post cache with rows fetched outside the loaders
fn prime_posts(ctx: &Context<'_>, posts: Vec<DbPost>) -> Result<Vec<Post>> {
    let loaders = ctx.data::<Loaders>()?;
    Ok(posts
        .into_iter()
        .map(|post| {
            loaders.post_by_id.prime(post.id, Some(post.clone()));
            Post::from(post)
        })
        .collect())
}
