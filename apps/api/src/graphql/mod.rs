//! GraphQL schema and resolvers for BlogQL
//!
//! This module contains the async-graphql schema including:
//! - Query resolvers for users, posts, comments, pagination, and search
//! - Type definitions for all GraphQL objects
//! - The per-request loader registry behind every relationship field

pub mod loaders;
pub mod query;
pub mod schema;
pub mod types;
pub mod viewer;

pub use loaders::{LoaderOptions, Loaders};
pub use schema::{
    build_schema, execute_request, execute_request_with_options, BlogSchema, SchemaBuilder,
};
pub use viewer::Viewer;
