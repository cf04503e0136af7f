//! `PostgreSQL` adapters for issue persistence.

mod models;
mod repository;
mod schema;

pub use repository::{CREATE_ISSUES_SQL, IssuePgPool, PostgresIssueRepository};
