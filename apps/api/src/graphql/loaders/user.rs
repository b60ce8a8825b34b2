//! User-by-id batch fetch

use std::sync::Arc;

use async_trait::async_trait;

use super::assemble::index_by;
use super::{BatchFetch, BatchLoader};
use crate::models::User;
use crate::repositories::BlogStore;

/// Users by primary key
pub struct UserById {
    store: Arc<dyn BlogStore>,
}

impl UserById {
    pub fn new(store: Arc<dyn BlogStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl BatchFetch for UserById {
    type Key = i32;
    type Value = User;
    type Error = Arc<sqlx::Error>;

    async fn fetch(&self, keys: &[i32]) -> Result<Vec<Option<Self::Value>>, Self::Error> {
        let users = self.store.users_by_ids(keys).await.map_err(Arc::new)?;
        Ok(index_by(keys, users, |user| user.id))
    }
}

/// Loader for users by id
pub type UserLoader = BatchLoader<UserById>;
