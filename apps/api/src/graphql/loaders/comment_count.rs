//! Comment-count batch fetch
//!
//! One grouped COUNT per batch. Posts without comments are absent from the
//! query result and are filled in as zero.

use std::sync::Arc;

use async_trait::async_trait;

use super::assemble::counts_for;
use super::{BatchFetch, BatchLoader};
use crate::repositories::BlogStore;

/// Number of comments per post id
pub struct CommentCountByPost {
    store: Arc<dyn BlogStore>,
}

impl CommentCountByPost {
    pub fn new(store: Arc<dyn BlogStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl BatchFetch for CommentCountByPost {
    type Key = i32;
    type Value = i64;
    type Error = Arc<sqlx::Error>;

    async fn fetch(&self, keys: &[i32]) -> Result<Vec<Option<i64>>, Self::Error> {
        let counts = self.store.comment_counts(keys).await.map_err(Arc::new)?;
        Ok(counts_for(keys, counts))
    }
}

/// Loader for comment counts
pub type CommentCountLoader = BatchLoader<CommentCountByPost>;
