//! Query execution seam.
//!
//! Generated SQL is handed to an external collaborator that returns rows or
//! an error. This crate ships only a demonstration implementation.

pub mod demo;
pub mod result;

pub use demo::*;
pub use result::*;

use crate::error::Result;
use crate::query::builder::GeneratedQuery;
use async_trait::async_trait;

/// Trait for query execution backends
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    /// Run a generated query and collect its rows
    async fn execute(&self, query: &GeneratedQuery) -> Result<ResultSet>;
}
