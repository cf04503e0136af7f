//! HTTP surface: the JSON API under `/api`, the HTML pages, and the
//! session-based admin guard shared by both.
//!
//! Handlers only translate between HTTP and the issue and access services;
//! every rule lives in those contexts.

pub mod api;
mod error;
pub mod extract;
pub mod pages;
mod state;

pub use error::ApiError;
pub use state::{AppState, Auth, IssueStore, Locations, SharedState, Submission};

use axum::Router;
use tower_http::trace::TraceLayer;

/// Builds the complete router with request tracing.
#[must_use]
pub fn build_router(state: SharedState) -> Router {
    Router::new()
        .merge(api::api_router())
        .merge(pages::pages_router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
