//! In-memory adapters for the issue context.

mod issue;
mod seed;

pub use issue::InMemoryIssueRepository;
pub use seed::demo_issues;
