//! Filter, ordering and window descriptions for post listings
//!
//! A [`PostWindow`] is what the engine asks the store for: a filter, an
//! optional cursor key, an ordering and a row limit. The SQL rendering uses
//! `QueryBuilder` so every user-supplied value is a bound parameter.

use sqlx::{Postgres, QueryBuilder};

use crate::models::{Category, PostStatus};
use crate::repositories::utils::POST_COLUMNS;

/// Ordering modes for post listings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PostOrderBy {
    /// Primary key descending
    #[default]
    Newest,
    /// Primary key ascending
    Oldest,
    /// Like count descending
    MostLiked,
    /// Comment count descending
    MostCommented,
}

impl PostOrderBy {
    /// Whether an `after` cursor continues with larger keys
    ///
    /// Only `Oldest` walks keys upwards. The aggregate orderings still compare
    /// against the cursor key as if they were `Newest`; ties among equal
    /// counts have no defined order.
    pub fn cursor_ascends(&self) -> bool {
        matches!(self, Self::Oldest)
    }

    fn order_clause(&self) -> &'static str {
        match self {
            Self::Newest => "id DESC",
            Self::Oldest => "id ASC",
            Self::MostLiked => "(SELECT COUNT(*) FROM likes WHERE likes.post_id = posts.id) DESC",
            Self::MostCommented => {
                "(SELECT COUNT(*) FROM comments WHERE comments.post_id = posts.id) DESC"
            }
        }
    }
}

/// Optional predicates ANDed onto the post collection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostFilter {
    pub category: Option<Category>,
    pub status: Option<PostStatus>,
    /// Plain-language full-text query
    pub search: Option<String>,
}

/// One bounded, ordered slice of the filtered post collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostWindow {
    pub filter: PostFilter,
    /// Key decoded from the `after` cursor
    pub after: Option<i32>,
    pub order_by: PostOrderBy,
    /// Maximum rows to return
    pub limit: i64,
}

impl PostWindow {
    /// Render the window as a parameterized SELECT
    pub fn to_query(&self) -> QueryBuilder<'static, Postgres> {
        let mut query = QueryBuilder::new(format!("SELECT {} FROM posts WHERE 1=1", POST_COLUMNS));
        self.filter.push_predicates(&mut query);

        if let Some(after) = self.after {
            if self.order_by.cursor_ascends() {
                query.push(" AND id > ");
            } else {
                query.push(" AND id < ");
            }
            query.push_bind(after);
        }

        query.push(" ORDER BY ").push(self.order_by.order_clause());
        query.push(" LIMIT ").push_bind(self.limit);
        query
    }
}

/// Render the unpaginated count for a filter
pub fn count_query(filter: &PostFilter) -> QueryBuilder<'static, Postgres> {
    let mut query = QueryBuilder::new("SELECT COUNT(*) FROM posts WHERE 1=1");
    filter.push_predicates(&mut query);
    query
}
