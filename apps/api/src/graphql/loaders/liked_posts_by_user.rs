//! Posts-liked-by-a-user batch fetch

use std::sync::Arc;

use async_trait::async_trait;

use super::assemble::group_by;
use super::{BatchFetch, BatchLoader};
use crate::models::Post;
use crate::repositories::BlogStore;

/// Posts liked by each user id, one entry per like
pub struct LikedPostsByUser {
    store: Arc<dyn BlogStore>,
}

impl LikedPostsByUser {
    pub fn new(store: Arc<dyn BlogStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl BatchFetch for LikedPostsByUser {
    type Key = i32;
    type Value = Vec<Post>;
    type Error = Arc<sqlx::Error>;

    async fn fetch(&self, keys: &[i32]) -> Result<Vec<Option<Vec<Post>>>, Self::Error> {
        let rows = self
            .store
            .posts_liked_by_users(keys)
            .await
            .map_err(Arc::new)?;
        let grouped = group_by(keys, rows, |row| row.liker_id);
        Ok(grouped
            .into_iter()
            .map(|group| group.map(|rows| rows.into_iter().map(|row| row.post).collect()))
            .collect())
    }
}

/// Loader for a user's liked posts
pub type LikedPostsLoader = BatchLoader<LikedPostsByUser>;
