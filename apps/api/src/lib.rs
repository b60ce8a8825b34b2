//! BlogQL API library
//!
//! The data-access core of a GraphQL blog API: request-scoped batching
//! loaders, the cursor pagination engine, the store they read from, and the
//! read-only schema wired on top of them.

pub mod config;
pub mod error;
pub mod graphql;
pub mod models;
pub mod pagination;
pub mod repositories;
pub mod telemetry;

// Re-export commonly used types
pub use config::Config;
pub use error::{ApiError, ApiResult};
pub use graphql::{build_schema, execute_request, BlogSchema, LoaderOptions, Loaders, Viewer};
pub use repositories::{BlogStore, PgBlogStore};
