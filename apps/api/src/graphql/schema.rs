//! GraphQL schema builder for BlogQL
//!
//! This module provides the schema construction for the async-graphql API
//! and the per-request entry point that attaches fresh loaders.

use std::sync::Arc;

use async_graphql::{EmptyMutation, EmptySubscription, Request, Response, Schema};

use crate::pagination::PaginationConfig;
use crate::repositories::BlogStore;

use super::loaders::{LoaderOptions, Loaders};
use super::query::Query;

/// The BlogQL GraphQL schema type
pub type BlogSchema = Schema<Query, EmptyMutation, EmptySubscription>;

/// Builder for constructing the GraphQL schema with required services
pub struct SchemaBuilder {
    store: Arc<dyn BlogStore>,
    pagination: PaginationConfig,
}

impl SchemaBuilder {
    /// Create a new schema builder over a store
    pub fn new(store: Arc<dyn BlogStore>) -> Self {
        Self {
            store,
            pagination: PaginationConfig::default(),
        }
    }

    /// Set the page sizing used by `paginatedPosts`
    pub fn pagination(mut self, pagination: PaginationConfig) -> Self {
        self.pagination = pagination;
        self
    }

    /// Build the schema with all configured services
    pub fn build(self) -> BlogSchema {
        Schema::build(Query::default(), EmptyMutation, EmptySubscription)
            .data(self.store)
            .data(self.pagination)
            .finish()
    }
}

/// Create a new GraphQL schema with default page sizing
pub fn build_schema(store: Arc<dyn BlogStore>) -> BlogSchema {
    SchemaBuilder::new(store).build()
}

/// Execute one request with a fresh loader registry
///
/// Loader caches live exactly as long as this call; nothing cached here is
/// visible to any other request.
pub async fn execute_request(
    schema: &BlogSchema,
    store: Arc<dyn BlogStore>,
    request: impl Into<Request>,
) -> Response {
    execute_request_with_options(schema, store, LoaderOptions::default(), request).await
}

/// Execute one request with a fresh loader registry using custom batching
pub async fn execute_request_with_options(
    schema: &BlogSchema,
    store: Arc<dyn BlogStore>,
    options: LoaderOptions,
    request: impl Into<Request>,
) -> Response {
    let loaders = Loaders::with_options(store, options);
    let request = request.into().data(loaders);
    let response = schema.execute(request).await;

    if response.is_err() {
        tracing::debug!(errors = response.errors.len(), "Request completed with errors");
    }

    response
}
