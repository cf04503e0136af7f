//! Demo records for a freshly started in-memory store.

use chrono::DateTime;

use crate::issue::domain::{
    Issue, IssueCategory, IssueId, IssueStatus, IssueTitle, PersistedIssueData,
};

struct DemoIssue {
    title: &'static str,
    description: &'static str,
    location: &'static str,
    photo_url: Option<&'static str>,
    status: IssueStatus,
    category: IssueCategory,
    created_at_secs: i64,
}

const DEMO_ISSUES: [DemoIssue; 2] = [
    DemoIssue {
        title: "Large Pothole on Main St",
        description: "There's a massive pothole in the right lane going south.",
        location: "Main St & 4th Ave",
        photo_url: Some("https://images.unsplash.com/photo-1515162816999-a0c47dc192f7"),
        status: IssueStatus::Reported,
        category: IssueCategory::Pothole,
        // 2024-03-20T10:00:00Z
        created_at_secs: 1_710_928_800,
    },
    DemoIssue {
        title: "Broken Streetlight",
        description: "Streetlight has been out for a week.",
        location: "Oak St & Elm St",
        photo_url: None,
        status: IssueStatus::InProgress,
        category: IssueCategory::Streetlight,
        // 2024-03-18T18:30:00Z
        created_at_secs: 1_710_786_600,
    },
];

/// Returns the sample issues shown by a demo deployment.
#[must_use]
pub fn demo_issues() -> Vec<Issue> {
    DEMO_ISSUES
        .iter()
        .filter_map(|demo| {
            let title = IssueTitle::new(demo.title).ok()?;
            let created_at = DateTime::from_timestamp(demo.created_at_secs, 0)?;
            Some(Issue::from_persisted(PersistedIssueData {
                id: IssueId::new(),
                title,
                description: demo.description.to_owned(),
                location: demo.location.to_owned(),
                photo_url: demo.photo_url.map(str::to_owned),
                status: demo.status,
                category: demo.category,
                created_at,
            }))
        })
        .collect()
}
