//! Shared SQL fragments for the repository layer
//!
//! These constants define the SELECT column lists for each entity type so the
//! loaders, list queries and pagination windows all decode the same row shape.

/// SQL columns for user queries
pub const USER_COLUMNS: &str = "id, name, email, role, created_at";

/// SQL columns for post queries
pub const POST_COLUMNS: &str =
    "id, title, content, category, status, views, author_id, created_at, updated_at";

/// SQL columns for comment queries
pub const COMMENT_COLUMNS: &str = "id, content, post_id, author_id, created_at";

/// Prefix every column in a column list with a table alias
///
/// Used by the like fan-out joins, where both sides carry an `id` column.
pub fn qualify_columns(columns: &str, alias: &str) -> String {
    columns
        .split(',')
        .map(|column| format!("{}.{}", alias, column.trim()))
        .collect::<Vec<_>>()
        .join(", ")
}
