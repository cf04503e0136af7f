//! Access control for the admin dashboard.
//!
//! Citizens sign in with an email address (or as a guest); the one
//! configured administrator signs in with email and password. Every admin
//! operation checks the presented session server-side.
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
