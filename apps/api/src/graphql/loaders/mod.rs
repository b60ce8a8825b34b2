//! Request-scoped loaders for GraphQL
//!
//! This module provides the batching loaders that keep nested field
//! resolution from issuing one query per parent row. Each loader pairs the
//! generic [`BatchLoader`] with one batch fetch function:
//! - Single-entity loaders: `Option<T>` per id (users, posts)
//! - Collection loaders: `Vec<T>` per foreign key (posts by author, comments)
//! - Aggregate loaders: a count per post, zero when nothing matches
//! - Fan-out loaders: the other side of the likes join
//!
//! A fresh [`Loaders`] registry is built for every request and attached as
//! request data; caches are never shared between requests.

mod assemble;
mod batch;
mod comment_count;
mod comments_by_author;
mod comments_by_post;
mod like_count;
mod liked_posts_by_user;
mod likers_by_post;
mod post;
mod posts_by_author;
mod user;

pub use batch::{BatchError, BatchFetch, BatchLoader, LoadResult};
pub use comment_count::{CommentCountByPost, CommentCountLoader};
pub use comments_by_author::{CommentsByAuthor, CommentsByAuthorLoader};
pub use comments_by_post::{CommentsByPost, CommentsByPostLoader};
pub use like_count::{LikeCountByPost, LikeCountLoader};
pub use liked_posts_by_user::{LikedPostsByUser, LikedPostsLoader};
pub use likers_by_post::{LikersByPost, LikersByPostLoader};
pub use post::{PostById, PostLoader};
pub use posts_by_author::{PostsByAuthor, PostsByAuthorLoader};
pub use user::{UserById, UserLoader};

use std::sync::Arc;
use std::time::Duration;

use crate::repositories::BlogStore;

/// Batching options shared by every loader in a registry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoaderOptions {
    /// Hold windows open this long instead of a single scheduler turn
    pub delay: Option<Duration>,
    /// Split windows into fetches of at most this many keys
    pub max_batch_size: Option<usize>,
}

impl LoaderOptions {
    fn build<F: BatchFetch>(&self, fetcher: F) -> BatchLoader<F> {
        let mut loader = BatchLoader::new(fetcher);
        if let Some(delay) = self.delay {
            loader = loader.with_delay(delay);
        }
        if let Some(size) = self.max_batch_size {
            loader = loader.with_max_batch_size(size);
        }
        loader
    }
}

/// Per-request registry of all loaders
///
/// Construction allocates empty maps only; dropping the registry at the end
/// of the request discards every cached value.
pub struct Loaders {
    pub user_by_id: UserLoader,
    pub post_by_id: PostLoader,
    pub posts_by_author: PostsByAuthorLoader,
    pub comments_by_post: CommentsByPostLoader,
    pub comments_by_author: CommentsByAuthorLoader,
    pub comment_count_by_post: CommentCountLoader,
    pub like_count_by_post: LikeCountLoader,
    pub likers_by_post: LikersByPostLoader,
    pub liked_posts_by_user: LikedPostsLoader,
}

impl Loaders {
    /// Create a fresh registry with default batching
    pub fn new(store: Arc<dyn BlogStore>) -> Self {
        Self::with_options(store, LoaderOptions::default())
    }

    /// Create a fresh registry with the given batching options
    pub fn with_options(store: Arc<dyn BlogStore>, options: LoaderOptions) -> Self {
        Self {
            user_by_id: options.build(UserById::new(store.clone())),
            post_by_id: options.build(PostById::new(store.clone())),
            posts_by_author: options.build(PostsByAuthor::new(store.clone())),
            comments_by_post: options.build(CommentsByPost::new(store.clone())),
            comments_by_author: options.build(CommentsByAuthor::new(store.clone())),
            comment_count_by_post: options.build(CommentCountByPost::new(store.clone())),
            like_count_by_post: options.build(LikeCountByPost::new(store.clone())),
            likers_by_post: options.build(LikersByPost::new(store.clone())),
            liked_posts_by_user: options.build(LikedPostsByUser::new(store)),
        }
    }
}
