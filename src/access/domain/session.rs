//! Sessions and their opaque tokens.

use super::{AccessDomainError, Role};
use chrono::{DateTime, Duration, Utc};
use mockable::Clock;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::fmt;

const TOKEN_BYTES: usize = 32;

/// Opaque bearer token identifying a session.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    /// Generates a fresh random token.
    #[must_use]
    pub fn generate() -> Self {
        let mut bytes = [0_u8; TOKEN_BYTES];
        rand::rng().fill_bytes(&mut bytes);
        Self(hex::encode(bytes))
    }

    /// Wraps a token received from a client.
    #[must_use]
    pub fn from_raw(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the token text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(..)")
    }
}

/// An authenticated session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    token: SessionToken,
    role: Role,
    email: String,
    issued_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl Session {
    /// Opens a session valid for `ttl` from now.
    ///
    /// # Errors
    ///
    /// Returns [`AccessDomainError::SessionLifetimeOutOfRange`] when the
    /// expiry time cannot be represented.
    pub fn open(
        role: Role,
        email: impl Into<String>,
        ttl: Duration,
        clock: &impl Clock,
    ) -> Result<Self, AccessDomainError> {
        let issued_at = clock.utc();
        let expires_at = issued_at
            .checked_add_signed(ttl)
            .ok_or(AccessDomainError::SessionLifetimeOutOfRange)?;
        Ok(Self {
            token: SessionToken::generate(),
            role,
            email: email.into(),
            issued_at,
            expires_at,
        })
    }

    /// Returns the bearer token.
    #[must_use]
    pub const fn token(&self) -> &SessionToken {
        &self.token
    }

    /// Returns the role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Returns the signed-in email, or `guest`.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns when the session was opened.
    #[must_use]
    pub const fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }

    /// Returns when the session stops being accepted.
    #[must_use]
    pub const fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Returns `true` once `now` has reached the expiry time.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}
