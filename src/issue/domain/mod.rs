//! Domain model for civic issue reporting.
//!
//! The issue domain covers the single reported-complaint record, its fixed
//! categories and lifecycle statuses, and the map coordinates a location can
//! be derived from. Infrastructure concerns stay outside this boundary.

mod category;
mod error;
mod ids;
mod issue;
mod location;
mod status;

pub use category::IssueCategory;
pub use error::{IssueDomainError, ParseIssueCategoryError, ParseIssueStatusError};
pub use ids::IssueId;
pub use issue::{Issue, IssueDraft, IssueTitle, PersistedIssueData};
pub use location::Coordinates;
pub use status::IssueStatus;
