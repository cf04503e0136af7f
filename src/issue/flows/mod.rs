//! User-facing flows built on the issue store: submission, public listing
//! and admin triage.

mod admin;
mod filter;
mod listing;
mod submission;

pub use admin::{AdminBoard, AdminBoardError, StatusChange};
pub use filter::{AdminFilter, CategoryFilter, ListingFilter, StatusFilter};
pub use listing::ListingPage;
pub use submission::{
    CREATE_FAILED_NOTICE, SUBMITTED_REDIRECT, SubmissionFlow, SubmissionForm, SubmissionOutcome,
};
