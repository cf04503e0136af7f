//! Shared doubles and builders for issue unit tests.

use crate::issue::{
    domain::{
        Coordinates, Issue, IssueCategory, IssueId, IssueStatus, IssueTitle, PersistedIssueData,
    },
    ports::{
        GeocoderResult, IssueCatalog, IssueCatalogResult, IssueRepository, IssueRepositoryResult,
        ReverseGeocoder,
    },
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockall::mock;

mock! {
    pub Repository {}

    #[async_trait]
    impl IssueRepository for Repository {
        async fn store(&self, issue: &Issue) -> IssueRepositoryResult<()>;
        async fn find_all(&self) -> IssueRepositoryResult<Vec<Issue>>;
        async fn find_by_id(&self, id: IssueId) -> IssueRepositoryResult<Option<Issue>>;
        async fn update_status(
            &self,
            id: IssueId,
            status: IssueStatus,
        ) -> IssueRepositoryResult<Issue>;
    }
}

mock! {
    pub Catalog {}

    #[async_trait]
    impl IssueCatalog for Catalog {
        async fn list_issues(&self) -> IssueCatalogResult<Vec<Issue>>;
        async fn update_status(
            &self,
            id: IssueId,
            status: IssueStatus,
        ) -> IssueCatalogResult<Issue>;
    }
}

mock! {
    pub Geocoder {}

    #[async_trait]
    impl ReverseGeocoder for Geocoder {
        async fn reverse(&self, coordinates: Coordinates) -> GeocoderResult<Option<String>>;
    }
}

/// Builds a persisted issue with an explicit creation time.
pub fn issue_at(
    title: &str,
    category: IssueCategory,
    status: IssueStatus,
    created_at_secs: i64,
) -> Issue {
    let created_at = DateTime::<Utc>::from_timestamp(created_at_secs, 0)
        .expect("test timestamp should be in range");
    Issue::from_persisted(PersistedIssueData {
        id: IssueId::new(),
        title: IssueTitle::new(title).expect("test title should be valid"),
        description: format!("{title} details"),
        location: "Town Hall Square".to_owned(),
        photo_url: None,
        status,
        category,
        created_at,
    })
}

/// Returns `issue` with its status replaced.
pub fn with_status(issue: &Issue, status: IssueStatus) -> Issue {
    let mut updated = issue.clone();
    updated.set_status(status);
    updated
}
