//! Adapter implementations for issue ports.
//!
//! - [`memory::InMemoryIssueRepository`]: process-lifetime storage
//! - [`postgres::PostgresIssueRepository`]: Diesel-backed `PostgreSQL`
//!   storage
//! - [`NominatimGeocoder`]: reverse geocoding over HTTP
//! - [`ApiIssueCatalog`]: admin catalog reached through the JSON API

pub mod memory;
pub mod postgres;

mod api_client;
mod nominatim;

pub use api_client::ApiIssueCatalog;
pub use nominatim::{DEFAULT_NOMINATIM_URL, NominatimGeocoder};
