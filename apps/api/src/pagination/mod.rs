//! Cursor pagination over the post collection
//!
//! The engine turns `(first, after, orderBy, filters)` into a bounded window,
//! asks the store for `first + 1` rows to learn whether another page exists,
//! and counts the filtered collection independently of the window.
//!
//! Two behaviors are deliberately simple and relied upon by clients:
//! - `has_previous_page` is true exactly when an `after` cursor was supplied.
//! - Cursors always carry the primary key, including under the aggregate
//!   orderings, where resuming from a cursor compares keys, not counts.

mod cursor;
mod window;

pub use cursor::{decode_cursor, encode_cursor, CursorError};
pub use window::{count_query, PostFilter, PostOrderBy, PostWindow};

use blogql_shared_config::{ConfigError, ConfigResult};

use crate::error::ApiResult;
use crate::models::Post;
use crate::repositories::BlogStore;

/// Default page size when `first` is omitted
pub const DEFAULT_PAGE_SIZE: i32 = 10;

/// Maximum items per page for paginated listings
pub const MAX_PAGE_SIZE: i32 = 100;

/// Default number of search results
pub const DEFAULT_SEARCH_LIMIT: i32 = 20;

/// Maximum items for search results
pub const MAX_SEARCH_LIMIT: i32 = 50;

/// Clamp a search limit to `1..=max`
#[inline]
pub fn clamp_limit(limit: i32, max: i32) -> i64 {
    limit.clamp(1, max.max(1)) as i64
}

/// Clamp a requested page size to `0..=max`
///
/// Zero is a valid page size: it returns no edges but still reports
/// whether any row matches.
#[inline]
pub fn clamp_page_size(first: i32, max: i32) -> i64 {
    first.clamp(0, max.max(0)) as i64
}

/// Page sizing applied by the engine
///
/// Built through [`PaginationConfig::new`], which rejects bounds that
/// cannot produce a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationConfig {
    default_page_size: i32,
    max_page_size: i32,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: MAX_PAGE_SIZE,
        }
    }
}

impl PaginationConfig {
    /// Validate page sizing bounds
    ///
    /// `max_page_size` must be at least 1 and `default_page_size` must lie in
    /// `1..=max_page_size`.
    pub fn new(default_page_size: i32, max_page_size: i32) -> ConfigResult<Self> {
        if max_page_size < 1 {
            return Err(ConfigError::ValidationError(format!(
                "MAX_PAGE_SIZE must be at least 1 (got {})",
                max_page_size
            )));
        }
        if !(1..=max_page_size).contains(&default_page_size) {
            return Err(ConfigError::ValidationError(format!(
                "DEFAULT_PAGE_SIZE must be between 1 and MAX_PAGE_SIZE ({}), got {}",
                max_page_size, default_page_size
            )));
        }

        Ok(Self {
            default_page_size,
            max_page_size,
        })
    }

    pub fn default_page_size(&self) -> i32 {
        self.default_page_size
    }

    pub fn max_page_size(&self) -> i32 {
        self.max_page_size
    }

    /// Effective page size for a requested `first`
    pub fn page_size(&self, first: Option<i32>) -> i64 {
        clamp_page_size(first.unwrap_or(self.default_page_size), self.max_page_size)
    }
}

/// Arguments of a paginated post listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostPageArgs {
    pub first: Option<i32>,
    pub after: Option<String>,
    pub order_by: PostOrderBy,
    pub filter: PostFilter,
}

/// A node together with the cursor that resumes after it
#[derive(Debug, Clone, PartialEq)]
pub struct Edge<T> {
    pub node: T,
    pub cursor: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageInfo {
    pub has_next_page: bool,
    pub has_previous_page: bool,
    pub start_cursor: Option<String>,
    pub end_cursor: Option<String>,
}

/// One page of a connection
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub edges: Vec<Edge<T>>,
    pub page_info: PageInfo,
    pub total_count: i64,
}

/// Serve one page of posts
pub async fn paginate_posts(
    store: &dyn BlogStore,
    args: &PostPageArgs,
    config: &PaginationConfig,
) -> ApiResult<Page<Post>> {
    let first = config.page_size(args.first);
    // An empty cursor string counts as no cursor.
    let after_cursor = args.after.as_deref().filter(|cursor| !cursor.is_empty());
    let after = after_cursor.map(decode_cursor).transpose()?;

    let window = PostWindow {
        filter: args.filter.clone(),
        after,
        order_by: args.order_by,
        limit: first + 1,
    };

    tracing::debug!(
        first,
        ?after,
        order_by = ?args.order_by,
        "Paginating posts"
    );

    let (rows, total_count) = tokio::try_join!(
        store.fetch_post_window(&window),
        store.count_posts(&args.filter)
    )?;

    Ok(assemble_page(rows, first, after.is_some(), total_count))
}

/// Trim the look-ahead row and derive cursors and page flags
fn assemble_page(mut rows: Vec<Post>, first: i64, has_cursor: bool, total_count: i64) -> Page<Post> {
    let has_next_page = rows.len() as i64 > first;
    if has_next_page {
        rows.truncate(first as usize);
    }

    let edges: Vec<Edge<Post>> = rows
        .into_iter()
        .map(|post| Edge {
            cursor: encode_cursor(post.id),
            node: post,
        })
        .collect();

    let page_info = PageInfo {
        has_next_page,
        has_previous_page: has_cursor,
        start_cursor: edges.first().map(|edge| edge.cursor.clone()),
        end_cursor: edges.last().map(|edge| edge.cursor.clone()),
    };

    Page {
        edges,
        page_info,
        total_count,
    }
}
