//! Search and facet filters applied to an already-fetched issue list.

use crate::issue::domain::{
    Issue, IssueCategory, IssueStatus, ParseIssueCategoryError, ParseIssueStatusError,
};
use std::str::FromStr;

/// Category facet: every category, or exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    /// No category restriction.
    #[default]
    All,
    /// Only issues of this category.
    Only(IssueCategory),
}

impl CategoryFilter {
    /// Returns `true` when `category` passes the filter.
    #[must_use]
    pub fn admits(self, category: IssueCategory) -> bool {
        match self {
            Self::All => true,
            Self::Only(expected) => expected == category,
        }
    }

    /// Returns the query-string form (`all` or the category name).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Only(category) => category.as_str(),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = ParseIssueCategoryError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        IssueCategory::try_from(trimmed).map(Self::Only)
    }
}

/// Status facet: every status, or exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    /// No status restriction.
    #[default]
    All,
    /// Only issues with this status.
    Only(IssueStatus),
}

impl StatusFilter {
    /// Returns `true` when `status` passes the filter.
    #[must_use]
    pub fn admits(self, status: IssueStatus) -> bool {
        match self {
            Self::All => true,
            Self::Only(expected) => expected == status,
        }
    }

    /// Returns the query-string form (`all` or the status name).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Only(status) => status.as_str(),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = ParseIssueStatusError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        IssueStatus::try_from(trimmed).map(Self::Only)
    }
}

fn contains_folded(haystack: &str, folded_needle: &str) -> bool {
    haystack.to_lowercase().contains(folded_needle)
}

/// Public listing filter: free-text search over title, description and
/// location plus a category facet.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListingFilter {
    search: String,
    category: CategoryFilter,
}

impl ListingFilter {
    /// Creates a filter that admits everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the search text. Matching is case-insensitive.
    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    /// Sets the category facet.
    #[must_use]
    pub const fn with_category(mut self, category: CategoryFilter) -> Self {
        self.category = category;
        self
    }

    /// Returns the search text.
    #[must_use]
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Returns the category facet.
    #[must_use]
    pub const fn category(&self) -> CategoryFilter {
        self.category
    }

    /// Returns `true` when `issue` passes the filter.
    #[must_use]
    pub fn matches(&self, issue: &Issue) -> bool {
        let needle = self.search.to_lowercase();
        let matches_search = contains_folded(issue.title().as_str(), &needle)
            || contains_folded(issue.description(), &needle)
            || contains_folded(issue.location(), &needle);
        matches_search && self.category.admits(issue.category())
    }

    /// Returns the issues passing the filter, preserving order.
    #[must_use]
    pub fn apply<'a>(&self, issues: &'a [Issue]) -> Vec<&'a Issue> {
        issues.iter().filter(|issue| self.matches(issue)).collect()
    }
}

/// Admin dashboard filter: search over title or identifier plus category
/// and status facets.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AdminFilter {
    search: String,
    category: CategoryFilter,
    status: StatusFilter,
}

impl AdminFilter {
    /// Creates a filter that admits everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the search text. Matching is case-insensitive.
    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    /// Sets the category facet.
    #[must_use]
    pub const fn with_category(mut self, category: CategoryFilter) -> Self {
        self.category = category;
        self
    }

    /// Sets the status facet.
    #[must_use]
    pub const fn with_status(mut self, status: StatusFilter) -> Self {
        self.status = status;
        self
    }

    /// Returns the search text.
    #[must_use]
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Returns the category facet.
    #[must_use]
    pub const fn category(&self) -> CategoryFilter {
        self.category
    }

    /// Returns the status facet.
    #[must_use]
    pub const fn status(&self) -> StatusFilter {
        self.status
    }

    /// Returns `true` when `issue` passes the filter.
    #[must_use]
    pub fn matches(&self, issue: &Issue) -> bool {
        let needle = self.search.to_lowercase();
        let matches_search = contains_folded(issue.title().as_str(), &needle)
            || contains_folded(&issue.id().to_string(), &needle);
        matches_search
            && self.category.admits(issue.category())
            && self.status.admits(issue.status())
    }
}
