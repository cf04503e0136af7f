//! Port contracts for the issue context.
//!
//! Ports define infrastructure-agnostic interfaces used by issue services
//! and flows.

pub mod catalog;
pub mod geocoder;
pub mod repository;

pub use catalog::{IssueCatalog, IssueCatalogError, IssueCatalogResult};
pub use geocoder::{GeocoderError, GeocoderResult, ReverseGeocoder};
pub use repository::{IssueRepository, IssueRepositoryError, IssueRepositoryResult};
