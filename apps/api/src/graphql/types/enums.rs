//! Blog enums exposed through GraphQL
//!
//! Each GraphQL enum mirrors a database or engine enum; conversions run in
//! both directions since the enums appear both as arguments and as fields.

use async_graphql::Enum;

use crate::models::{Category as DbCategory, PostStatus as DbPostStatus, Role as DbRole};
use crate::pagination::PostOrderBy as EnginePostOrderBy;

/// User role enum for GraphQL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Enum)]
pub enum Role {
    /// Full access, sees every user's email
    Admin,
    /// May write posts
    Author,
    /// Default role
    Reader,
}

impl From<DbRole> for Role {
    fn from(role: DbRole) -> Self {
        match role {
            DbRole::Admin => Self::Admin,
            DbRole::Author => Self::Author,
            DbRole::Reader => Self::Reader,
        }
    }
}

/// Post category enum for GraphQL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Enum)]
pub enum Category {
    Technology,
    Lifestyle,
    Business,
    Science,
}

impl From<DbCategory> for Category {
    fn from(category: DbCategory) -> Self {
        match category {
            DbCategory::Technology => Self::Technology,
            DbCategory::Lifestyle => Self::Lifestyle,
            DbCategory::Business => Self::Business,
            DbCategory::Science => Self::Science,
        }
    }
}

impl From<Category> for DbCategory {
    fn from(category: Category) -> Self {
        match category {
            Category::Technology => Self::Technology,
            Category::Lifestyle => Self::Lifestyle,
            Category::Business => Self::Business,
            Category::Science => Self::Science,
        }
    }
}

/// Post publication status enum for GraphQL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Enum)]
pub enum PostStatus {
    Draft,
    Published,
    Archived,
}

impl From<DbPostStatus> for PostStatus {
    fn from(status: DbPostStatus) -> Self {
        match status {
            DbPostStatus::Draft => Self::Draft,
            DbPostStatus::Published => Self::Published,
            DbPostStatus::Archived => Self::Archived,
        }
    }
}

impl From<PostStatus> for DbPostStatus {
    fn from(status: PostStatus) -> Self {
        match status {
            PostStatus::Draft => Self::Draft,
            PostStatus::Published => Self::Published,
            PostStatus::Archived => Self::Archived,
        }
    }
}

/// Ordering of a paginated post listing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Enum)]
pub enum PostOrderBy {
    /// Highest id first
    #[default]
    Newest,
    /// Lowest id first
    Oldest,
    /// Most likes first
    MostLiked,
    /// Most comments first
    MostCommented,
}

impl From<PostOrderBy> for EnginePostOrderBy {
    fn from(order_by: PostOrderBy) -> Self {
        match order_by {
            PostOrderBy::Newest => Self::Newest,
            PostOrderBy::Oldest => Self::Oldest,
            PostOrderBy::MostLiked => Self::MostLiked,
            PostOrderBy::MostCommented => Self::MostCommented,
        }
    }
}
