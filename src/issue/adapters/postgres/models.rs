//! Diesel row models for issue persistence.

use super::schema::issues;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for issue records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = issues)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct IssueRow {
    /// Issue identifier.
    pub id: uuid::Uuid,
    /// Title text.
    pub title: String,
    /// Description text.
    pub description: String,
    /// Location text.
    pub location: String,
    /// Category display name.
    pub category: String,
    /// Optional photo reference.
    pub photo_url: Option<String>,
    /// Status display name.
    pub status: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for issue records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = issues)]
pub struct NewIssueRow {
    /// Issue identifier.
    pub id: uuid::Uuid,
    /// Title text.
    pub title: String,
    /// Description text.
    pub description: String,
    /// Location text.
    pub location: String,
    /// Category display name.
    pub category: String,
    /// Optional photo reference.
    pub photo_url: Option<String>,
    /// Status display name.
    pub status: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}
