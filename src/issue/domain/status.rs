//! Issue lifecycle status.

use super::ParseIssueStatusError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle stage of a reported issue.
///
/// Administrators may move an issue between any two stages; new issues
/// always start at [`IssueStatus::Reported`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IssueStatus {
    /// Issue has been reported and awaits triage.
    #[serde(rename = "Reported", alias = "reported")]
    Reported,
    /// Issue is being worked on.
    #[serde(rename = "In Progress", alias = "in_progress", alias = "in-progress")]
    InProgress,
    /// Issue has been fixed.
    #[serde(rename = "Resolved", alias = "resolved")]
    Resolved,
}

impl IssueStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [Self; 3] = [Self::Reported, Self::InProgress, Self::Resolved];

    /// Returns the canonical display and storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Reported => "Reported",
            Self::InProgress => "In Progress",
            Self::Resolved => "Resolved",
        }
    }
}

impl TryFrom<&str> for IssueStatus {
    type Error = ParseIssueStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase().replace(['_', '-'], " ");
        match normalized.as_str() {
            "reported" => Ok(Self::Reported),
            "in progress" => Ok(Self::InProgress),
            "resolved" => Ok(Self::Resolved),
            _ => Err(ParseIssueStatusError(value.to_owned())),
        }
    }
}

impl fmt::Display for IssueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
