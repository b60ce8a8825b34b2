//! Comments-by-author batch fetch

use std::sync::Arc;

use async_trait::async_trait;

use super::assemble::group_by;
use super::{BatchFetch, BatchLoader};
use crate::models::Comment;
use crate::repositories::BlogStore;

/// Comments grouped by author id
pub struct CommentsByAuthor {
    store: Arc<dyn BlogStore>,
}

impl CommentsByAuthor {
    pub fn new(store: Arc<dyn BlogStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl BatchFetch for CommentsByAuthor {
    type Key = i32;
    type Value = Vec<Comment>;
    type Error = Arc<sqlx::Error>;

    async fn fetch(&self, keys: &[i32]) -> Result<Vec<Option<Self::Value>>, Self::Error> {
        let comments = self
            .store
            .comments_by_author_ids(keys)
            .await
            .map_err(Arc::new)?;
        Ok(group_by(keys, comments, |comment| comment.author_id))
    }
}

/// Loader for a user's comments
pub type CommentsByAuthorLoader = BatchLoader<CommentsByAuthor>;
