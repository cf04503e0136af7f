//! Error types for issue domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing domain issue values.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum IssueDomainError {
    /// The issue title is empty after trimming.
    #[error("issue title must not be empty")]
    EmptyTitle,

    /// The coordinates are not a valid point on the globe.
    #[error("invalid coordinates ({latitude}, {longitude})")]
    InvalidCoordinates {
        /// Rejected latitude.
        latitude: f64,
        /// Rejected longitude.
        longitude: f64,
    },
}

/// Error returned while parsing issue statuses.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown issue status: {0}")]
pub struct ParseIssueStatusError(pub String);

/// Error returned while parsing issue categories.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown issue category: {0}")]
pub struct ParseIssueCategoryError(pub String);
