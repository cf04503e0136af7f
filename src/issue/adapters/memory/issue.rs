//! In-memory issue repository for tests and database-less deployments.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::issue::{
    domain::{Issue, IssueId, IssueStatus},
    ports::{IssueRepository, IssueRepositoryError, IssueRepositoryResult},
};

/// Thread-safe in-memory issue repository.
///
/// Each instance owns its own state; clones share it.
#[derive(Debug, Clone, Default)]
pub struct InMemoryIssueRepository {
    state: Arc<RwLock<HashMap<IssueId, Issue>>>,
}

impl InMemoryIssueRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository pre-populated with the given issues.
    ///
    /// Later entries replace earlier ones with the same identifier.
    #[must_use]
    pub fn with_issues(issues: impl IntoIterator<Item = Issue>) -> Self {
        let map = issues.into_iter().map(|issue| (issue.id(), issue)).collect();
        Self {
            state: Arc::new(RwLock::new(map)),
        }
    }
}

fn poisoned(err: impl std::fmt::Display) -> IssueRepositoryError {
    IssueRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl IssueRepository for InMemoryIssueRepository {
    async fn store(&self, issue: &Issue) -> IssueRepositoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        if state.contains_key(&issue.id()) {
            return Err(IssueRepositoryError::DuplicateIssue(issue.id()));
        }
        state.insert(issue.id(), issue.clone());
        Ok(())
    }

    async fn find_all(&self) -> IssueRepositoryResult<Vec<Issue>> {
        let state = self.state.read().map_err(poisoned)?;
        let mut issues: Vec<Issue> = state.values().cloned().collect();
        issues.sort_by_key(|issue| std::cmp::Reverse(issue.created_at()));
        Ok(issues)
    }

    async fn find_by_id(&self, id: IssueId) -> IssueRepositoryResult<Option<Issue>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.get(&id).cloned())
    }

    async fn update_status(
        &self,
        id: IssueId,
        status: IssueStatus,
    ) -> IssueRepositoryResult<Issue> {
        let mut state = self.state.write().map_err(poisoned)?;
        let issue = state
            .get_mut(&id)
            .ok_or(IssueRepositoryError::NotFound(id))?;
        issue.set_status(status);
        Ok(issue.clone())
    }
}
