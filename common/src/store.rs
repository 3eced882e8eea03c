//! # Parameter Store Port
//!
//! The contract the core needs from the remote parameter store. Pagination state lives with
//! the caller; an implementation only answers one page at a time.

use async_trait::async_trait;

use crate::error::QueryError;

/// One page request against a hierarchical path.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageRequest {
    pub path: String,
    /// Upper bound on parameters per page; `None` leaves it to the store.
    pub page_size: Option<i32>,
    /// Continuation token returned by the previous page.
    pub next_token: Option<String>,
}

impl PageRequest {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }
}

/// Parameter names found directly under the requested path.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParameterPage {
    pub names: Vec<String>,
    pub next_token: Option<String>,
}

/// Read access to a hierarchical key/value parameter store.
///
/// Implementations must be safe to share between concurrently running probes.
#[async_trait]
pub trait ParameterStore: Send + Sync {
    async fn parameters_by_path(&self, request: &PageRequest) -> Result<ParameterPage, QueryError>;
}
