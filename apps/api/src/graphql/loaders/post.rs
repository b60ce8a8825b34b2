//! Post-by-id batch fetch

use std::sync::Arc;

use async_trait::async_trait;

use super::assemble::index_by;
use super::{BatchFetch, BatchLoader};
use crate::models::Post;
use crate::repositories::BlogStore;

/// Posts by primary key
pub struct PostById {
    store: Arc<dyn BlogStore>,
}

impl PostById {
    pub fn new(store: Arc<dyn BlogStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl BatchFetch for PostById {
    type Key = i32;
    type Value = Post;
    type Error = Arc<sqlx::Error>;

    async fn fetch(&self, keys: &[i32]) -> Result<Vec<Option<Self::Value>>, Self::Error> {
        let posts = self.store.posts_by_ids(keys).await.map_err(Arc::new)?;
        Ok(index_by(keys, posts, |post| post.id))
    }
}

/// Loader for posts by id
pub type PostLoader = BatchLoader<PostById>;
