//! Shared world state for issue lifecycle BDD scenarios.

use std::sync::Arc;

use async_trait::async_trait;
use civic_connect::{
    access::{
        adapters::InMemorySessionStore,
        domain::{AdminCredentials, Session},
        services::{AccessError, AuthService},
    },
    issue::{
        adapters::memory::InMemoryIssueRepository,
        domain::{Coordinates, Issue},
        flows::{ListingFilter, SubmissionForm, SubmissionFlow, SubmissionOutcome},
        ports::{GeocoderResult, ReverseGeocoder},
        services::{IssueStoreService, LocationResolver},
    },
};
use mockable::DefaultClock;
use rstest::fixture;

/// Admin email used by scenarios.
pub const ADMIN_EMAIL: &str = "admin@example.org";
/// Admin password used by scenarios.
pub const ADMIN_PASSWORD: &str = "correct horse battery staple";

/// Geocoder that never knows an address.
pub struct OfflineGeocoder;

#[async_trait]
impl ReverseGeocoder for OfflineGeocoder {
    async fn reverse(&self, _coordinates: Coordinates) -> GeocoderResult<Option<String>> {
        Ok(None)
    }
}

/// Issue store type used by the BDD world.
pub type TestStore = IssueStoreService<InMemoryIssueRepository, DefaultClock>;

/// Scenario world for issue lifecycle behaviour tests.
pub struct IssueWorld {
    /// Issue store under test.
    pub store: TestStore,
    /// Report form flow over the same store.
    pub submission: SubmissionFlow<InMemoryIssueRepository, DefaultClock, OfflineGeocoder>,
    /// Session service with one admin account.
    pub auth: AuthService<InMemorySessionStore, DefaultClock>,
    /// Session opened by a `Given ... is signed in` step.
    pub session: Option<Session>,
    /// Outcome of the last report.
    pub last_outcome: Option<SubmissionOutcome>,
    /// Filter applied to the listing.
    pub listing_filter: ListingFilter,
    /// Result of the last status change attempt.
    pub last_status_change: Option<Result<Issue, AccessError>>,
}

impl IssueWorld {
    /// Creates a world with an empty store and no session.
    #[must_use]
    pub fn new() -> Self {
        let store = IssueStoreService::new(
            Arc::new(InMemoryIssueRepository::new()),
            Arc::new(DefaultClock),
        );
        let locations = LocationResolver::new(Arc::new(OfflineGeocoder));
        let auth = AuthService::new(Arc::new(InMemorySessionStore::new()), Arc::new(DefaultClock))
            .with_admin(AdminCredentials::from_password(ADMIN_EMAIL, ADMIN_PASSWORD));
        Self {
            submission: SubmissionFlow::new(store.clone(), locations),
            store,
            auth,
            session: None,
            last_outcome: None,
            listing_filter: ListingFilter::new(),
            last_status_change: None,
        }
    }
}

impl Default for IssueWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> IssueWorld {
    IssueWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

/// Builds a report form with a title, category and location.
pub fn report_form(title: &str, category: &str, location: &str) -> SubmissionForm {
    SubmissionForm {
        title: title.to_owned(),
        description: format!("{title} reported by a resident"),
        location: location.to_owned(),
        category: category.to_owned(),
        ..SubmissionForm::default()
    }
}

/// Finds a stored issue by title.
pub fn find_by_title(world: &IssueWorld, title: &str) -> Result<Issue, eyre::Report> {
    let issues = run_async(world.store.try_list())
        .map_err(|err| eyre::eyre!("listing issues failed: {err}"))?;
    issues
        .into_iter()
        .find(|issue| issue.title().as_str() == title)
        .ok_or_else(|| eyre::eyre!("no issue titled '{title}'"))
}
