//! Application services for the issue context.

mod location;
mod store;

pub use location::LocationResolver;
pub use store::{CreateIssueRequest, IssueStoreError, IssueStoreResult, IssueStoreService};
