//! Common test utilities for API integration tests
//!
//! This module provides shared test infrastructure for integration tests:
//! an in-memory store with seeded blog data and helpers for running
//! GraphQL requests against it.

#![allow(unused_imports)]

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
