//! Catalog port used by the admin board to read and triage issues.
//!
//! The board never talks to a repository directly: it may run next to the
//! store or on the far side of the JSON API, so the contract is limited to
//! the two operations an administrator needs.

use crate::issue::domain::{Issue, IssueId, IssueStatus};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for catalog operations.
pub type IssueCatalogResult<T> = Result<T, IssueCatalogError>;

/// Read-and-triage contract backing the admin board.
#[async_trait]
pub trait IssueCatalog: Send + Sync {
    /// Returns every issue, newest first.
    async fn list_issues(&self) -> IssueCatalogResult<Vec<Issue>>;

    /// Sets the status of an issue and returns the persisted record.
    async fn update_status(&self, id: IssueId, status: IssueStatus) -> IssueCatalogResult<Issue>;
}

/// Errors returned by catalog implementations.
#[derive(Debug, Clone, Error)]
pub enum IssueCatalogError {
    /// The issue does not exist.
    #[error("issue not found: {0}")]
    NotFound(IssueId),

    /// The caller is not allowed to perform the operation.
    #[error("not authorized: {0}")]
    Unauthorized(String),

    /// The catalog rejected the operation with a reason.
    #[error("{0}")]
    Rejected(String),

    /// The catalog could not be reached.
    #[error("catalog transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}

impl IssueCatalogError {
    /// Wraps a transport error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }
}
