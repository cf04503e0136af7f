//! Fixed issue classification.

use super::ParseIssueCategoryError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification tag for a reported issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IssueCategory {
    /// Road surface damage.
    Pothole,
    /// Broken or dim street lighting.
    Streetlight,
    /// Litter, fly-tipping or overflowing bins.
    Trash,
    /// Unwanted paint or tags on public property.
    Graffiti,
    /// Anything not covered by the other categories.
    Other,
}

impl IssueCategory {
    /// Every category, in the order they are offered to reporters.
    pub const ALL: [Self; 5] = [
        Self::Pothole,
        Self::Streetlight,
        Self::Trash,
        Self::Graffiti,
        Self::Other,
    ];

    /// Returns the canonical display and storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pothole => "Pothole",
            Self::Streetlight => "Streetlight",
            Self::Trash => "Trash",
            Self::Graffiti => "Graffiti",
            Self::Other => "Other",
        }
    }
}

impl TryFrom<&str> for IssueCategory {
    type Error = ParseIssueCategoryError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "pothole" => Ok(Self::Pothole),
            "streetlight" => Ok(Self::Streetlight),
            "trash" => Ok(Self::Trash),
            "graffiti" => Ok(Self::Graffiti),
            "other" => Ok(Self::Other),
            _ => Err(ParseIssueCategoryError(value.to_owned())),
        }
    }
}

impl fmt::Display for IssueCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
