//! Civic Connect: report and track local infrastructure problems.
//!
//! Citizens file issues such as potholes or broken streetlights, browse
//! what others have reported, and administrators move issues through
//! `Reported`, `In Progress` and `Resolved`.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for storage, sessions and geocoding
//! - **Adapters**: In-memory, `PostgreSQL`, Nominatim and HTTP implementations
//!
//! # Modules
//!
//! - [`issue`]: Issue records, the issue store, and the user-facing flows
//! - [`access`]: Sessions, roles, and the admin guard
//! - [`http`]: JSON API and HTML pages
//! - [`config`]: Server settings
//! - [`telemetry`]: Tracing setup

pub mod access;
pub mod config;
pub mod http;
pub mod issue;
pub mod telemetry;
