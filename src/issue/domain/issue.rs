//! Issue aggregate root and the draft it is reported from.

use super::{IssueCategory, IssueDomainError, IssueId, IssueStatus};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Non-empty, trimmed issue title.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct IssueTitle(String);

impl IssueTitle {
    /// Creates a validated title.
    ///
    /// # Errors
    ///
    /// Returns [`IssueDomainError::EmptyTitle`] if the title is blank.
    pub fn new(value: impl Into<String>) -> Result<Self, IssueDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        if normalized.is_empty() {
            return Err(IssueDomainError::EmptyTitle);
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Returns the title as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for IssueTitle {
    type Error = IssueDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<IssueTitle> for String {
    fn from(value: IssueTitle) -> Self {
        value.0
    }
}

impl AsRef<str> for IssueTitle {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for IssueTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Reporter-supplied fields for a new issue.
///
/// A draft carries no identifier, status or timestamp; those are assigned
/// when the issue is reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueDraft {
    title: IssueTitle,
    description: String,
    location: String,
    category: IssueCategory,
    photo_url: Option<String>,
}

impl IssueDraft {
    /// Creates a draft with the required title and category.
    ///
    /// # Errors
    ///
    /// Returns [`IssueDomainError::EmptyTitle`] if the title is blank.
    pub fn new(
        title: impl Into<String>,
        category: IssueCategory,
    ) -> Result<Self, IssueDomainError> {
        Ok(Self {
            title: IssueTitle::new(title)?,
            description: String::new(),
            location: String::new(),
            category,
            photo_url: None,
        })
    }

    /// Sets the free-text description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the free-text location.
    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// Attaches a photo reference.
    #[must_use]
    pub fn with_photo_url(mut self, photo_url: impl Into<String>) -> Self {
        self.photo_url = Some(photo_url.into());
        self
    }
}

/// Issue aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    id: IssueId,
    title: IssueTitle,
    description: String,
    location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    photo_url: Option<String>,
    status: IssueStatus,
    category: IssueCategory,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedIssueData {
    /// Persisted issue identifier.
    pub id: IssueId,
    /// Persisted title.
    pub title: IssueTitle,
    /// Persisted description.
    pub description: String,
    /// Persisted location text.
    pub location: String,
    /// Persisted photo reference, if any.
    pub photo_url: Option<String>,
    /// Persisted lifecycle status.
    pub status: IssueStatus,
    /// Persisted category.
    pub category: IssueCategory,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Issue {
    /// Reports a new issue from a draft.
    ///
    /// The issue receives a fresh identifier, starts at
    /// [`IssueStatus::Reported`] and is stamped with the current clock time.
    #[must_use]
    pub fn report(draft: IssueDraft, clock: &impl Clock) -> Self {
        let IssueDraft {
            title,
            description,
            location,
            category,
            photo_url,
        } = draft;

        Self {
            id: IssueId::new(),
            title,
            description,
            location,
            photo_url,
            status: IssueStatus::Reported,
            category,
            created_at: clock.utc(),
        }
    }

    /// Reconstructs an issue from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedIssueData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            location: data.location,
            photo_url: data.photo_url,
            status: data.status,
            category: data.category,
            created_at: data.created_at,
        }
    }

    /// Returns the issue identifier.
    #[must_use]
    pub const fn id(&self) -> IssueId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &IssueTitle {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the location text.
    #[must_use]
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Returns the photo reference, if any.
    #[must_use]
    pub fn photo_url(&self) -> Option<&str> {
        self.photo_url.as_deref()
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> IssueStatus {
        self.status
    }

    /// Returns the category.
    #[must_use]
    pub const fn category(&self) -> IssueCategory {
        self.category
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Replaces the status and returns the previous one.
    ///
    /// No other field is touched.
    pub const fn set_status(&mut self, status: IssueStatus) -> IssueStatus {
        let previous = self.status;
        self.status = status;
        previous
    }
}
