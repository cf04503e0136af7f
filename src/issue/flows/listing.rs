//! Public issue listing: one store read per view, filtered locally.

use super::filter::ListingFilter;
use crate::issue::{domain::Issue, ports::IssueRepository, services::IssueStoreService};
use mockable::Clock;

/// A rendered-ready listing: all issues plus the filtered selection.
#[derive(Debug, Clone)]
pub struct ListingPage {
    issues: Vec<Issue>,
    filter: ListingFilter,
}

impl ListingPage {
    /// Loads every issue once and pairs it with `filter`.
    ///
    /// Storage failures surface as an empty page.
    pub async fn load<R, C>(store: &IssueStoreService<R, C>, filter: ListingFilter) -> Self
    where
        R: IssueRepository + ?Sized,
        C: Clock + Send + Sync,
    {
        Self::from_issues(store.list().await, filter)
    }

    /// Builds a page from an already-fetched list.
    #[must_use]
    pub const fn from_issues(issues: Vec<Issue>, filter: ListingFilter) -> Self {
        Self { issues, filter }
    }

    /// Returns the active filter.
    #[must_use]
    pub const fn filter(&self) -> &ListingFilter {
        &self.filter
    }

    /// Returns the number of issues before filtering.
    #[must_use]
    pub fn total(&self) -> usize {
        self.issues.len()
    }

    /// Returns the issues passing the filter, newest first.
    #[must_use]
    pub fn visible(&self) -> Vec<&Issue> {
        self.filter.apply(&self.issues)
    }
}
