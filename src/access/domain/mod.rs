//! Domain model for sign-in and authorization.
//!
//! Two roles exist. The single admin account is configured at start-up;
//! everyone else signs in as a citizen with just an email address, or
//! continues as a guest.

mod credentials;
mod error;
mod role;
mod session;

pub use credentials::{AdminCredentials, CredentialCheck, normalize_email};
pub use error::AccessDomainError;
pub use role::Role;
pub use session::{Session, SessionToken};
