//! Users-who-liked-a-post batch fetch
//!
//! Fans out through the likes table: each like row contributes its user to
//! the liked post's list, so a list has exactly one entry per like.

use std::sync::Arc;

use async_trait::async_trait;

use super::assemble::group_by;
use super::{BatchFetch, BatchLoader};
use crate::models::User;
use crate::repositories::BlogStore;

/// Users who liked each post id
pub struct LikersByPost {
    store: Arc<dyn BlogStore>,
}

impl LikersByPost {
    pub fn new(store: Arc<dyn BlogStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl BatchFetch for LikersByPost {
    type Key = i32;
    type Value = Vec<User>;
    type Error = Arc<sqlx::Error>;

    async fn fetch(&self, keys: &[i32]) -> Result<Vec<Option<Vec<User>>>, Self::Error> {
        let rows = self.store.likers_of_posts(keys).await.map_err(Arc::new)?;
        let grouped = group_by(keys, rows, |row| row.post_id);
        Ok(grouped
            .into_iter()
            .map(|group| group.map(|rows| rows.into_iter().map(|row| row.user).collect()))
            .collect())
    }
}

/// Loader for a post's likers
pub type LikersByPostLoader = BatchLoader<LikersByPost>;
