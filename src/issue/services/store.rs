//! Issue Store service: reporting, listing and status triage.

use crate::issue::{
    domain::{
        Issue, IssueCategory, IssueDomainError, IssueDraft, IssueId, IssueStatus,
        ParseIssueCategoryError,
    },
    ports::{
        IssueCatalog, IssueCatalogError, IssueCatalogResult, IssueRepository,
        IssueRepositoryError,
    },
};
use async_trait::async_trait;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for reporting a new issue.
///
/// There is deliberately no status field: every new issue starts as
/// [`IssueStatus::Reported`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateIssueRequest {
    title: String,
    description: String,
    location: String,
    category: String,
    photo_url: Option<String>,
}

impl CreateIssueRequest {
    /// Creates a request with the required title and category name.
    #[must_use]
    pub fn new(title: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            location: String::new(),
            category: category.into(),
            photo_url: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the location text.
    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// Sets the photo reference. Blank values are ignored.
    #[must_use]
    pub fn with_photo_url(mut self, photo_url: impl Into<String>) -> Self {
        let value = photo_url.into();
        self.photo_url = (!value.trim().is_empty()).then_some(value);
        self
    }
}

/// Service-level errors for issue store operations.
#[derive(Debug, Error)]
pub enum IssueStoreError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] IssueDomainError),
    /// The category is not one of the fixed set.
    #[error(transparent)]
    Category(#[from] ParseIssueCategoryError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] IssueRepositoryError),
}

impl IssueStoreError {
    /// Returns `true` when the error is a missing issue.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Repository(IssueRepositoryError::NotFound(_)))
    }
}

/// Result type for issue store operations.
pub type IssueStoreResult<T> = Result<T, IssueStoreError>;

/// Issue Store orchestration service.
///
/// `R` may be unsized so one binary can pick its repository at start-up
/// behind `Arc<dyn IssueRepository>`.
pub struct IssueStoreService<R, C>
where
    R: IssueRepository + ?Sized,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> Clone for IssueStoreService<R, C>
where
    R: IssueRepository + ?Sized,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<R, C> IssueStoreService<R, C>
where
    R: IssueRepository + ?Sized,
    C: Clock + Send + Sync,
{
    /// Creates a new issue store service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Returns every issue, newest first.
    ///
    /// Storage failures are logged and reported as an empty list; use
    /// [`Self::try_list`] to observe them.
    pub async fn list(&self) -> Vec<Issue> {
        match self.try_list().await {
            Ok(issues) => issues,
            Err(err) => {
                tracing::error!(error = %err, "failed to fetch issues");
                Vec::new()
            }
        }
    }

    /// Returns every issue, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`IssueStoreError::Repository`] when the lookup fails.
    pub async fn try_list(&self) -> IssueStoreResult<Vec<Issue>> {
        Ok(self.repository.find_all().await?)
    }

    /// Returns a single issue.
    ///
    /// # Errors
    ///
    /// Returns [`IssueRepositoryError::NotFound`] (wrapped) when the issue
    /// does not exist, or the underlying repository failure.
    pub async fn get(&self, id: IssueId) -> IssueStoreResult<Issue> {
        let found = self.repository.find_by_id(id).await?;
        found.ok_or(IssueStoreError::Repository(IssueRepositoryError::NotFound(id)))
    }

    /// Reports a new issue.
    ///
    /// # Errors
    ///
    /// Returns [`IssueStoreError`] when the title is blank, the category is
    /// unknown, or the repository rejects persistence.
    pub async fn create(&self, request: CreateIssueRequest) -> IssueStoreResult<Issue> {
        let CreateIssueRequest {
            title,
            description,
            location,
            category,
            photo_url,
        } = request;

        let parsed_category = IssueCategory::try_from(category.as_str())?;
        let mut draft = IssueDraft::new(title, parsed_category)?
            .with_description(description)
            .with_location(location);
        if let Some(url) = photo_url {
            draft = draft.with_photo_url(url);
        }

        let issue = Issue::report(draft, &*self.clock);
        if let Err(err) = self.repository.store(&issue).await {
            tracing::error!(error = %err, "failed to create issue");
            return Err(err.into());
        }
        tracing::info!(
            issue_id = %issue.id(),
            category = %issue.category(),
            "issue reported"
        );
        Ok(issue)
    }

    /// Sets the status of an existing issue. Only the status changes.
    ///
    /// # Errors
    ///
    /// Returns [`IssueRepositoryError::NotFound`] (wrapped) when the issue
    /// does not exist, leaving the store unchanged, or the underlying
    /// repository failure.
    pub async fn update_status(
        &self,
        id: IssueId,
        status: IssueStatus,
    ) -> IssueStoreResult<Issue> {
        match self.repository.update_status(id, status).await {
            Ok(issue) => {
                tracing::info!(issue_id = %id, status = %status, "issue status updated");
                Ok(issue)
            }
            Err(err) => {
                tracing::error!(issue_id = %id, error = %err, "failed to update status");
                Err(err.into())
            }
        }
    }
}

#[async_trait]
impl<R, C> IssueCatalog for IssueStoreService<R, C>
where
    R: IssueRepository + ?Sized,
    C: Clock + Send + Sync,
{
    async fn list_issues(&self) -> IssueCatalogResult<Vec<Issue>> {
        self.try_list().await.map_err(into_catalog_error)
    }

    async fn update_status(&self, id: IssueId, status: IssueStatus) -> IssueCatalogResult<Issue> {
        Self::update_status(self, id, status)
            .await
            .map_err(into_catalog_error)
    }
}

fn into_catalog_error(err: IssueStoreError) -> IssueCatalogError {
    match err {
        IssueStoreError::Repository(IssueRepositoryError::NotFound(id)) => {
            IssueCatalogError::NotFound(id)
        }
        other => IssueCatalogError::Rejected(other.to_string()),
    }
}
