//! Issue submission: form validation, pin-to-address resolution and store
//! create.

use crate::issue::{
    domain::{Coordinates, Issue},
    ports::{IssueRepository, ReverseGeocoder},
    services::{CreateIssueRequest, IssueStoreService, LocationResolver},
};
use mockable::Clock;

/// Notice shown when the store rejects a submission.
pub const CREATE_FAILED_NOTICE: &str = "Failed to create issue";

/// Page the citizen is sent to after a successful submission.
pub const SUBMITTED_REDIRECT: &str = "/issues";

/// Raw report form as entered by a citizen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubmissionForm {
    /// Short summary of the problem.
    pub title: String,
    /// Free-text details.
    pub description: String,
    /// Address or landmark; may be left empty when a pin is dropped.
    pub location: String,
    /// Category display name.
    pub category: String,
    /// Optional photo reference.
    pub photo_url: Option<String>,
    /// Optional map pin.
    pub pin: Option<Coordinates>,
}

impl SubmissionForm {
    fn missing_field(&self) -> Option<&'static str> {
        if self.title.trim().is_empty() {
            return Some("Please enter a title.");
        }
        if self.description.trim().is_empty() {
            return Some("Please enter a description.");
        }
        if self.category.trim().is_empty() {
            return Some("Please choose a category.");
        }
        if self.location.trim().is_empty() && self.pin.is_none() {
            return Some("Please enter a location or pick one on the map.");
        }
        None
    }
}

/// Result of a submission attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// The issue was stored.
    Submitted {
        /// The stored record.
        issue: Issue,
        /// Where to send the citizen next.
        redirect_to: &'static str,
    },
    /// The form was incomplete; nothing was sent to the store.
    Rejected {
        /// Message describing the missing field.
        notice: String,
    },
    /// The store refused the issue.
    Failed {
        /// Generic failure message.
        notice: String,
    },
}

/// Drives a report form from input to stored issue.
pub struct SubmissionFlow<R, C, G>
where
    R: IssueRepository + ?Sized,
    C: Clock + Send + Sync,
    G: ReverseGeocoder + ?Sized,
{
    store: IssueStoreService<R, C>,
    locations: LocationResolver<G>,
}

impl<R, C, G> SubmissionFlow<R, C, G>
where
    R: IssueRepository + ?Sized,
    C: Clock + Send + Sync,
    G: ReverseGeocoder + ?Sized,
{
    /// Creates a flow over the store and location resolver.
    #[must_use]
    pub const fn new(store: IssueStoreService<R, C>, locations: LocationResolver<G>) -> Self {
        Self { store, locations }
    }

    /// Returns the location text for a map pin, falling back to the
    /// formatted coordinates.
    pub async fn pick_location(&self, pin: Coordinates) -> String {
        self.locations.resolve(pin).await
    }

    /// Validates and stores the form.
    pub async fn submit(&self, form: SubmissionForm) -> SubmissionOutcome {
        if let Some(notice) = form.missing_field() {
            return SubmissionOutcome::Rejected {
                notice: notice.to_owned(),
            };
        }

        let SubmissionForm {
            title,
            description,
            location,
            category,
            photo_url,
            pin,
        } = form;

        let resolved_location = match pin {
            Some(coordinates) if location.trim().is_empty() => {
                self.pick_location(coordinates).await
            }
            _ => location,
        };

        let mut request = CreateIssueRequest::new(title, category)
            .with_description(description)
            .with_location(resolved_location);
        if let Some(url) = photo_url {
            request = request.with_photo_url(url);
        }

        match self.store.create(request).await {
            Ok(issue) => SubmissionOutcome::Submitted {
                issue,
                redirect_to: SUBMITTED_REDIRECT,
            },
            Err(err) => {
                tracing::debug!(error = %err, "submission refused by store");
                SubmissionOutcome::Failed {
                    notice: CREATE_FAILED_NOTICE.to_owned(),
                }
            }
        }
    }
}
