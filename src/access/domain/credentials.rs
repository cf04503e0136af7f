//! The configured administrator account.

use super::AccessDomainError;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// Result of checking an email/password pair against the admin account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialCheck {
    /// Email and password match the admin account.
    Admin,
    /// Email matches the admin account but the password does not.
    WrongPassword,
    /// Email belongs to someone else.
    NotAdmin,
}

/// Admin email plus the SHA-256 digest of its password.
#[derive(Clone, PartialEq, Eq)]
pub struct AdminCredentials {
    email: String,
    password_digest: [u8; 32],
}

impl AdminCredentials {
    /// Builds credentials from an email and a hex-encoded SHA-256 digest.
    ///
    /// # Errors
    ///
    /// Returns [`AccessDomainError::EmptyAdminEmail`] for a blank email and
    /// [`AccessDomainError::InvalidPasswordDigest`] when the digest is not
    /// 64 hex characters.
    pub fn from_sha256_hex(email: &str, digest_hex: &str) -> Result<Self, AccessDomainError> {
        let normalized = normalize_email(email);
        if normalized.is_empty() {
            return Err(AccessDomainError::EmptyAdminEmail);
        }
        let mut password_digest = [0_u8; 32];
        hex::decode_to_slice(digest_hex.trim(), &mut password_digest)
            .map_err(|_| AccessDomainError::InvalidPasswordDigest)?;
        Ok(Self {
            email: normalized,
            password_digest,
        })
    }

    /// Builds credentials from a plaintext password.
    #[must_use]
    pub fn from_password(email: &str, password: &str) -> Self {
        Self {
            email: normalize_email(email),
            password_digest: Sha256::digest(password.as_bytes()).into(),
        }
    }

    /// Returns the admin email, lower-cased.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Checks a sign-in attempt. Emails compare case-insensitively; the
    /// password digest comparison runs in constant time.
    #[must_use]
    pub fn check(&self, email: &str, password: &str) -> CredentialCheck {
        if normalize_email(email) != self.email {
            return CredentialCheck::NotAdmin;
        }
        let attempt: [u8; 32] = Sha256::digest(password.as_bytes()).into();
        if bool::from(attempt.ct_eq(&self.password_digest)) {
            CredentialCheck::Admin
        } else {
            CredentialCheck::WrongPassword
        }
    }
}

impl std::fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Trims and lower-cases an email address.
#[must_use]
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
