//! Like-count batch fetch

use std::sync::Arc;

use async_trait::async_trait;

use super::assemble::counts_for;
use super::{BatchFetch, BatchLoader};
use crate::repositories::BlogStore;

/// Number of likes per post id, zero when a post has none
pub struct LikeCountByPost {
    store: Arc<dyn BlogStore>,
}

impl LikeCountByPost {
    pub fn new(store: Arc<dyn BlogStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl BatchFetch for LikeCountByPost {
    type Key = i32;
    type Value = i64;
    type Error = Arc<sqlx::Error>;

    async fn fetch(&self, keys: &[i32]) -> Result<Vec<Option<i64>>, Self::Error> {
        let counts = self.store.like_counts(keys).await.map_err(Arc::new)?;
        Ok(counts_for(keys, counts))
    }
}

/// Loader for like counts
pub type LikeCountLoader = BatchLoader<LikeCountByPost>;
