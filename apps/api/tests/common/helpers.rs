//! Test helper functions for API integration tests
//!
//! Provides utility functions for building schemas over a [`MemoryStore`]
//! and running GraphQL requests with a fresh loader registry.

#![allow(dead_code)]

use std::sync::Arc;

use async_graphql::{Request, Response};
use serde_json::Value;

use blogql_api::graphql::{build_schema, execute_request, BlogSchema, Viewer};
use blogql_api::repositories::BlogStore;

use super::fixtures::MemoryStore;

/// A schema bound to one in-memory store
pub struct TestApi {
    pub store: Arc<MemoryStore>,
    pub schema: BlogSchema,
}

impl TestApi {
    pub fn new(store: MemoryStore) -> Self {
        let store = Arc::new(store);
        let schema = build_schema(store.clone());
        Self { store, schema }
    }

    pub fn seeded() -> Self {
        Self::new(MemoryStore::seeded())
    }

    fn dyn_store(&self) -> Arc<dyn BlogStore> {
        self.store.clone()
    }

    /// Execute a request as an anonymous caller
    pub async fn execute(&self, query: &str) -> Response {
        execute_request(&self.schema, self.dyn_store(), query).await
    }

    /// Execute a request as the given viewer
    pub async fn execute_as(&self, viewer: Viewer, query: &str) -> Response {
        let request = Request::new(query).data(viewer);
        execute_request(&self.schema, self.dyn_store(), request).await
    }

    /// Execute a request that must succeed and return its data as JSON
    pub async fn data(&self, query: &str) -> Value {
        into_data(self.execute(query).await)
    }

    pub async fn data_as(&self, viewer: Viewer, query: &str) -> Value {
        into_data(self.execute_as(viewer, query).await)
    }
}

/// Unwrap a response that must not carry errors
pub fn into_data(response: Response) -> Value {
    assert!(
        response.errors.is_empty(),
        "unexpected errors: {:?}",
        response.errors
    );
    response.data.into_json().unwrap()
}

/// The `extensions.code` of a response's first error
pub fn first_error_code(response: &Response) -> Option<String> {
    response
        .errors
        .first()
        .and_then(|err| err.extensions.as_ref())
        .and_then(|ext| ext.get("code"))
        .and_then(|code| match code {
            async_graphql::Value::String(code) => Some(code.clone()),
            _ => None,
        })
}
