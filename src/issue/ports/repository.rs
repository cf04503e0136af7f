//! Repository port for issue persistence and lookup.

use crate::issue::domain::{Issue, IssueId, IssueStatus};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for issue repository operations.
pub type IssueRepositoryResult<T> = Result<T, IssueRepositoryError>;

/// Issue persistence contract.
#[async_trait]
pub trait IssueRepository: Send + Sync {
    /// Stores a newly reported issue.
    ///
    /// # Errors
    ///
    /// Returns [`IssueRepositoryError::DuplicateIssue`] when the identifier
    /// already exists.
    async fn store(&self, issue: &Issue) -> IssueRepositoryResult<()>;

    /// Returns every issue, newest creation timestamp first.
    async fn find_all(&self) -> IssueRepositoryResult<Vec<Issue>>;

    /// Finds an issue by identifier.
    ///
    /// Returns `None` when the issue does not exist.
    async fn find_by_id(&self, id: IssueId) -> IssueRepositoryResult<Option<Issue>>;

    /// Replaces the status of an existing issue and returns the updated
    /// record.
    ///
    /// # Errors
    ///
    /// Returns [`IssueRepositoryError::NotFound`] when the issue does not
    /// exist; the store is left unchanged.
    async fn update_status(&self, id: IssueId, status: IssueStatus)
    -> IssueRepositoryResult<Issue>;
}

/// Errors returned by issue repository implementations.
#[derive(Debug, Clone, Error)]
pub enum IssueRepositoryError {
    /// An issue with the same identifier already exists.
    #[error("duplicate issue identifier: {0}")]
    DuplicateIssue(IssueId),

    /// The issue was not found.
    #[error("issue not found: {0}")]
    NotFound(IssueId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl IssueRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
