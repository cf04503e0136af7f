//! Admin triage board with optimistic status changes.
//!
//! The board keeps a local copy of the issue list. A status change is
//! applied locally first, then confirmed against the catalog: on success the
//! local row is replaced by the persisted record, on failure the previous
//! status is restored unless a later change has already overwritten the row.

use super::filter::AdminFilter;
use crate::issue::{
    domain::{Issue, IssueId, IssueStatus},
    ports::{IssueCatalog, IssueCatalogError},
};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;

/// Errors returned by admin board operations.
#[derive(Debug, Clone, Error)]
pub enum AdminBoardError {
    /// The issue is not on the board.
    #[error("issue {0} is not on the board")]
    UnknownIssue(IssueId),

    /// The catalog rejected the operation; local state was restored.
    #[error("catalog rejected the change for issue {id}: {source}")]
    Rejected {
        /// Issue the change targeted.
        id: IssueId,
        /// Catalog failure.
        source: IssueCatalogError,
    },

    /// The catalog could not be read.
    #[error("failed to load issues: {0}")]
    Load(#[source] IssueCatalogError),
}

/// Outcome of a status change request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusChange {
    /// The issue already had the requested status; nothing was sent.
    Unchanged(Issue),
    /// The change was confirmed; carries the persisted record.
    Applied(Issue),
}

#[derive(Debug, Default)]
struct BoardState {
    issues: Vec<Issue>,
    filter: AdminFilter,
}

/// Local admin view over an [`IssueCatalog`].
pub struct AdminBoard<P>
where
    P: IssueCatalog + ?Sized,
{
    catalog: Arc<P>,
    state: Mutex<BoardState>,
}

impl<P> AdminBoard<P>
where
    P: IssueCatalog + ?Sized,
{
    /// Loads the full issue list once.
    ///
    /// # Errors
    ///
    /// Returns [`AdminBoardError::Load`] when the catalog cannot be read.
    pub async fn load(catalog: Arc<P>) -> Result<Self, AdminBoardError> {
        let issues = catalog.list_issues().await.map_err(AdminBoardError::Load)?;
        Ok(Self {
            catalog,
            state: Mutex::new(BoardState {
                issues,
                filter: AdminFilter::default(),
            }),
        })
    }

    fn lock(&self) -> MutexGuard<'_, BoardState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Re-reads the issue list from the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`AdminBoardError::Load`] when the catalog cannot be read; the
    /// current rows are kept.
    pub async fn refresh(&self) -> Result<(), AdminBoardError> {
        let issues = self
            .catalog
            .list_issues()
            .await
            .map_err(AdminBoardError::Load)?;
        self.lock().issues = issues;
        Ok(())
    }

    /// Replaces the active filter.
    pub fn set_filter(&self, filter: AdminFilter) {
        self.lock().filter = filter;
    }

    /// Returns the active filter.
    #[must_use]
    pub fn filter(&self) -> AdminFilter {
        self.lock().filter.clone()
    }

    /// Returns every row on the board.
    #[must_use]
    pub fn issues(&self) -> Vec<Issue> {
        self.lock().issues.clone()
    }

    /// Returns the rows passing the active filter.
    #[must_use]
    pub fn visible(&self) -> Vec<Issue> {
        let state = self.lock();
        state
            .issues
            .iter()
            .filter(|issue| state.filter.matches(issue))
            .cloned()
            .collect()
    }

    /// Returns a single row.
    #[must_use]
    pub fn get(&self, id: IssueId) -> Option<Issue> {
        self.lock()
            .issues
            .iter()
            .find(|issue| issue.id() == id)
            .cloned()
    }

    /// Changes the status of a row.
    ///
    /// The new status is visible on the board while the catalog call is in
    /// flight.
    ///
    /// # Errors
    ///
    /// Returns [`AdminBoardError::UnknownIssue`] when the row is not on the
    /// board, or [`AdminBoardError::Rejected`] after restoring the previous
    /// status when the catalog refuses the change.
    pub async fn update_status(
        &self,
        id: IssueId,
        status: IssueStatus,
    ) -> Result<StatusChange, AdminBoardError> {
        let previous = {
            let mut state = self.lock();
            let row = state
                .issues
                .iter_mut()
                .find(|issue| issue.id() == id)
                .ok_or(AdminBoardError::UnknownIssue(id))?;
            if row.status() == status {
                return Ok(StatusChange::Unchanged(row.clone()));
            }
            row.set_status(status)
        };

        match self.catalog.update_status(id, status).await {
            Ok(persisted) => {
                self.replace_row(persisted.clone());
                Ok(StatusChange::Applied(persisted))
            }
            Err(source) => {
                tracing::warn!(
                    issue_id = %id,
                    error = %source,
                    "status change rejected, reverting"
                );
                self.restore_status(id, status, previous);
                Err(AdminBoardError::Rejected { id, source })
            }
        }
    }

    fn replace_row(&self, persisted: Issue) {
        let mut state = self.lock();
        if let Some(row) = state
            .issues
            .iter_mut()
            .find(|issue| issue.id() == persisted.id())
        {
            *row = persisted;
        }
    }

    /// Puts `previous` back only while the row still shows the failed
    /// `optimistic` status.
    fn restore_status(&self, id: IssueId, optimistic: IssueStatus, previous: IssueStatus) {
        let mut state = self.lock();
        if let Some(row) = state
            .issues
            .iter_mut()
            .find(|issue| issue.id() == id && issue.status() == optimistic)
        {
            row.set_status(previous);
        }
    }
}
