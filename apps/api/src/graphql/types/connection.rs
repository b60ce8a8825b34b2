//! Relay-style connection types for paginated posts

use async_graphql::SimpleObject;

use crate::models::Post as DbPost;
use crate::pagination::{Page, PageInfo as EnginePageInfo};

use super::post::Post;

/// Pagination state of a connection
#[derive(Debug, Clone, SimpleObject)]
pub struct PageInfo {
    pub has_next_page: bool,
    /// True exactly when an `after` cursor was supplied
    pub has_previous_page: bool,
    pub start_cursor: Option<String>,
    pub end_cursor: Option<String>,
}

impl From<EnginePageInfo> for PageInfo {
    fn from(info: EnginePageInfo) -> Self {
        Self {
            has_next_page: info.has_next_page,
            has_previous_page: info.has_previous_page,
            start_cursor: info.start_cursor,
            end_cursor: info.end_cursor,
        }
    }
}

/// A post together with the cursor that resumes after it
#[derive(SimpleObject)]
pub struct PostEdge {
    pub node: Post,
    pub cursor: String,
}

/// One page of posts
#[derive(SimpleObject)]
pub struct PostConnection {
    pub edges: Vec<PostEdge>,
    pub page_info: PageInfo,
    /// Size of the filtered collection, independent of the page
    pub total_count: i64,
}

impl From<Page<DbPost>> for PostConnection {
    fn from(page: Page<DbPost>) -> Self {
        Self {
            edges: page
                .edges
                .into_iter()
                .map(|edge| PostEdge {
                    node: Post::from(edge.node),
                    cursor: edge.cursor,
                })
                .collect(),
            page_info: page.page_info.into(),
            total_count: page.total_count,
        }
    }
}
