//! Error types for access domain validation.

use thiserror::Error;

/// Errors returned while building access domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AccessDomainError {
    /// The configured admin email is blank.
    #[error("admin email must not be empty")]
    EmptyAdminEmail,

    /// The configured password digest is not 64 hex characters.
    #[error("admin password digest must be a 64-character hex SHA-256 digest")]
    InvalidPasswordDigest,

    /// The session lifetime pushes the expiry past the supported date range.
    #[error("session lifetime is out of range")]
    SessionLifetimeOutOfRange,
}
