//! Error handling for the BlogQL API
//!
//! This module provides the crate-level error type using thiserror, with a
//! mapping onto GraphQL errors carrying an `extensions.code` for clients.

use async_graphql::ErrorExtensions;
use thiserror::Error;

use crate::graphql::loaders::BatchError;
use crate::pagination::CursorError;

/// Main API error type
#[derive(Error, Debug)]
pub enum ApiError {
    // ========== Resource Errors ==========
    /// Requested resource not found
    #[error("{resource_type} not found: {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    // ========== Validation Errors ==========
    /// Pagination cursor could not be decoded
    #[error("invalid cursor: {0}")]
    InvalidCursor(#[from] CursorError),

    /// Request validation failed
    #[error("validation error: {0}")]
    ValidationError(String),

    // ========== Data Access Errors ==========
    /// Database query failed
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A batched loader fetch failed
    #[error("batch load failed: {0}")]
    Batch(String),

    // ========== Configuration Errors ==========
    /// Environment configuration was missing or out of range
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl ApiError {
    /// Get the error code string for client-side handling
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::InvalidCursor(_) | Self::ValidationError(_) => "BAD_USER_INPUT",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Batch(_) => "BATCH_LOAD_ERROR",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
        }
    }

    /// Whether the error is the server's fault rather than the caller's
    pub fn is_server_error(&self) -> bool {
        !matches!(
            self,
            Self::NotFound { .. } | Self::InvalidCursor(_) | Self::ValidationError(_)
        )
    }

    /// Create a not found error for a specific resource
    pub fn not_found(resource_type: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            resource_type,
            id: id.to_string(),
        }
    }

    /// Log the error with appropriate severity
    pub fn log(&self) {
        if self.is_server_error() {
            tracing::error!(error = %self, code = self.error_code(), "Server error occurred");
        } else {
            tracing::debug!(error = %self, code = self.error_code(), "Client error");
        }
    }
}

impl ErrorExtensions for ApiError {
    fn extend(&self) -> async_graphql::Error {
        self.log();
        async_graphql::Error::new(self.to_string()).extend_with(|_, e| {
            e.set("code", self.error_code());
        })
    }
}

impl<E: std::fmt::Display> From<BatchError<E>> for ApiError {
    fn from(err: BatchError<E>) -> Self {
        Self::Batch(err.to_string())
    }
}

impl From<blogql_shared_config::ConfigError> for ApiError {
    fn from(err: blogql_shared_config::ConfigError) -> Self {
        Self::Configuration(err.to_string())
    }
}

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Convert anything that maps onto [`ApiError`] into a coded GraphQL error
pub fn graphql_error(err: impl Into<ApiError>) -> async_graphql::Error {
    err.into().extend()
}
