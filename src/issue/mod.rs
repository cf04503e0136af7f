//! Civic issue reporting and triage.
//!
//! Citizens report issues (a title, description, location, category and an
//! optional photo reference); everyone can browse them newest first; and
//! administrators move them through `Reported`, `In Progress` and `Resolved`.
//! The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]
//! - Submission, listing and admin controllers in [`flows`]

pub mod adapters;
pub mod domain;
pub mod flows;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
