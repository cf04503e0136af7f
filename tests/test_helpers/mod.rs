//! Shared issue fixtures for integration tests.

use chrono::{DateTime, Duration, TimeZone, Utc};
use civic_connect::issue::domain::{
    Issue, IssueCategory, IssueId, IssueStatus, IssueTitle, PersistedIssueData,
};

/// Fixed reference time so ordering assertions are deterministic.
pub fn base_time() -> Result<DateTime<Utc>, eyre::Report> {
    Utc.with_ymd_and_hms(2026, 10, 1, 9, 0, 0)
        .single()
        .ok_or_else(|| eyre::eyre!("reference time is ambiguous"))
}

/// Builds a persisted-looking issue created `minutes` after [`base_time`].
pub fn issue_at(
    title: &str,
    category: IssueCategory,
    status: IssueStatus,
    minutes: i64,
) -> Result<Issue, eyre::Report> {
    Ok(Issue::from_persisted(PersistedIssueData {
        id: IssueId::new(),
        title: IssueTitle::new(title)?,
        description: format!("{title} details"),
        location: "Town Hall Square".to_owned(),
        photo_url: None,
        status,
        category,
        created_at: base_time()? + Duration::minutes(minutes),
    }))
}
