//! Shared application state handed to every handler.

use std::sync::Arc;

use mockable::DefaultClock;

use super::pages::{PageError, Pages};
use crate::access::{ports::SessionStore, services::AuthService};
use crate::issue::{
    flows::SubmissionFlow,
    ports::{IssueRepository, ReverseGeocoder},
    services::{IssueStoreService, LocationResolver},
};

/// Issue store over whichever repository the binary selected.
pub type IssueStore = IssueStoreService<dyn IssueRepository, DefaultClock>;

/// Authentication over whichever session store the binary selected.
pub type Auth = AuthService<dyn SessionStore, DefaultClock>;

/// Location resolver over whichever geocoder the binary selected.
pub type Locations = LocationResolver<dyn ReverseGeocoder>;

/// Submission flow used by the report page.
pub type Submission = SubmissionFlow<dyn IssueRepository, DefaultClock, dyn ReverseGeocoder>;

/// Services shared by the JSON API and the HTML pages.
pub struct AppState {
    /// Issue store.
    pub store: IssueStore,
    /// Sessions and the admin guard.
    pub auth: Auth,
    /// Map pin resolution.
    pub locations: Locations,
    /// Report form handling.
    pub submission: Submission,
    /// Compiled page templates.
    pub pages: Pages,
}

/// State as held by the router.
pub type SharedState = Arc<AppState>;

impl AppState {
    /// Wires the services together and compiles the page templates.
    ///
    /// # Errors
    ///
    /// Returns [`PageError`] when a bundled template fails to compile.
    pub fn new(
        repository: Arc<dyn IssueRepository>,
        geocoder: Arc<dyn ReverseGeocoder>,
        auth: Auth,
    ) -> Result<Self, PageError> {
        let store = IssueStoreService::new(repository, Arc::new(DefaultClock));
        let locations = LocationResolver::new(geocoder);
        let submission = SubmissionFlow::new(store.clone(), locations.clone());
        Ok(Self {
            store,
            auth,
            locations,
            submission,
            pages: Pages::new()?,
        })
    }

    /// Wraps the state for the router.
    #[must_use]
    pub fn shared(self) -> SharedState {
        Arc::new(self)
    }
}
