//! Posts-by-author batch fetch
//!
//! Batches author ids into one query and returns every post of each author.
//! Authors without posts resolve to an empty list.

use std::sync::Arc;

use async_trait::async_trait;

use super::assemble::group_by;
use super::{BatchFetch, BatchLoader};
use crate::models::Post;
use crate::repositories::BlogStore;

/// Posts grouped by author id
pub struct PostsByAuthor {
    store: Arc<dyn BlogStore>,
}

impl PostsByAuthor {
    pub fn new(store: Arc<dyn BlogStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl BatchFetch for PostsByAuthor {
    type Key = i32;
    type Value = Vec<Post>;
    type Error = Arc<sqlx::Error>;

    async fn fetch(&self, keys: &[i32]) -> Result<Vec<Option<Self::Value>>, Self::Error> {
        let posts = self
            .store
            .posts_by_author_ids(keys)
            .await
            .map_err(Arc::new)?;
        Ok(group_by(keys, posts, |post| post.author_id))
    }
}

/// Loader for an author's posts
pub type PostsByAuthorLoader = BatchLoader<PostsByAuthor>;
