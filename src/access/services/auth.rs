//! Sign-in, sign-out and the admin guard.

use crate::access::{
    domain::{
        AccessDomainError, AdminCredentials, CredentialCheck, Role, Session, SessionToken,
        normalize_email,
    },
    ports::{SessionStore, SessionStoreError},
};
use chrono::Duration;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Email recorded on guest sessions.
pub const GUEST_EMAIL: &str = "guest";

/// Default session lifetime in minutes.
pub const DEFAULT_SESSION_TTL_MINUTES: i64 = 480;

/// Longest accepted session lifetime in minutes (one year).
pub const MAX_SESSION_TTL_MINUTES: i64 = 525_600;

/// Errors returned by access operations.
#[derive(Debug, Clone, Error)]
pub enum AccessError {
    /// Sign-in was attempted without an email address.
    #[error("Please enter your email address.")]
    EmptyEmail,

    /// The admin email was given with the wrong password.
    #[error("Invalid email or password.")]
    InvalidCredentials,

    /// No session token was presented, or it is unknown.
    #[error("authentication required")]
    Unauthenticated,

    /// The session token has expired.
    #[error("session expired")]
    Expired,

    /// The session is valid but lacks the admin role.
    #[error("admin access required")]
    Forbidden,

    /// A session could not be built.
    #[error(transparent)]
    Domain(#[from] AccessDomainError),

    /// The session store failed.
    #[error(transparent)]
    Store(#[from] SessionStoreError),
}

/// Result type for access operations.
pub type AccessResult<T> = Result<T, AccessError>;

/// Issues and checks sessions.
pub struct AuthService<S, C>
where
    S: SessionStore + ?Sized,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    clock: Arc<C>,
    admin: Option<AdminCredentials>,
    ttl: Duration,
}

impl<S, C> Clone for AuthService<S, C>
where
    S: SessionStore + ?Sized,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            clock: Arc::clone(&self.clock),
            admin: self.admin.clone(),
            ttl: self.ttl,
        }
    }
}

impl<S, C> AuthService<S, C>
where
    S: SessionStore + ?Sized,
    C: Clock + Send + Sync,
{
    /// Creates a service with no admin account and the default lifetime.
    #[must_use]
    pub fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self {
            store,
            clock,
            admin: None,
            ttl: Duration::minutes(DEFAULT_SESSION_TTL_MINUTES),
        }
    }

    /// Configures the admin account.
    #[must_use]
    pub fn with_admin(mut self, admin: AdminCredentials) -> Self {
        self.admin = Some(admin);
        self
    }

    /// Sets how long new sessions stay valid.
    #[must_use]
    pub const fn with_session_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Returns `true` when an admin account is configured.
    #[must_use]
    pub const fn has_admin(&self) -> bool {
        self.admin.is_some()
    }

    /// Signs in with an email and password.
    ///
    /// The configured admin email with its password yields an admin session.
    /// Any other email yields a citizen session; the password is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::EmptyEmail`] for a blank email,
    /// [`AccessError::InvalidCredentials`] for the admin email with a wrong
    /// password, [`AccessError::Domain`] when the configured lifetime is out
    /// of range, or [`AccessError::Store`] when the session cannot be saved.
    pub async fn sign_in(&self, email: &str, password: &str) -> AccessResult<Session> {
        let normalized = normalize_email(email);
        if normalized.is_empty() {
            return Err(AccessError::EmptyEmail);
        }

        let check = self
            .admin
            .as_ref()
            .map_or(CredentialCheck::NotAdmin, |admin| {
                admin.check(&normalized, password)
            });
        let role = match check {
            CredentialCheck::Admin => Role::Admin,
            CredentialCheck::NotAdmin => Role::Citizen,
            CredentialCheck::WrongPassword => {
                tracing::warn!("admin sign-in rejected");
                return Err(AccessError::InvalidCredentials);
            }
        };
        self.open(role, normalized).await
    }

    /// Opens a citizen session without an email address.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::Domain`] when the configured lifetime is out of
    /// range, or [`AccessError::Store`] when the session cannot be saved.
    pub async fn continue_as_guest(&self) -> AccessResult<Session> {
        self.open(Role::Citizen, GUEST_EMAIL.to_owned()).await
    }

    async fn open(&self, role: Role, email: String) -> AccessResult<Session> {
        let now = self.clock.utc();
        let session = Session::open(role, email, self.ttl, &*self.clock)?;
        let purged = self.store.purge_expired(now).await?;
        if purged > 0 {
            tracing::debug!(purged, "expired sessions dropped");
        }
        self.store.save(&session).await?;
        tracing::info!(role = %session.role(), "session opened");
        Ok(session)
    }

    /// Revokes a session. Unknown tokens are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::Store`] when the store fails.
    pub async fn sign_out(&self, token: &SessionToken) -> AccessResult<()> {
        if self.store.revoke(token).await? {
            tracing::info!("session closed");
        }
        Ok(())
    }

    /// Resolves a token to a live session.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::Unauthenticated`] when no token is given or it
    /// is unknown, [`AccessError::Expired`] when the session has lapsed (it
    /// is revoked as a side effect), or [`AccessError::Store`].
    pub async fn authorize(&self, token: Option<&SessionToken>) -> AccessResult<Session> {
        let presented = token.ok_or(AccessError::Unauthenticated)?;
        let session = self
            .store
            .find(presented)
            .await?
            .ok_or(AccessError::Unauthenticated)?;
        if session.is_expired_at(self.clock.utc()) {
            self.store.revoke(presented).await?;
            return Err(AccessError::Expired);
        }
        Ok(session)
    }

    /// Resolves a token to a live admin session.
    ///
    /// # Errors
    ///
    /// Returns the [`Self::authorize`] failures, or [`AccessError::Forbidden`]
    /// for a citizen session.
    pub async fn require_admin(&self, token: Option<&SessionToken>) -> AccessResult<Session> {
        let session = self.authorize(token).await?;
        if !session.role().is_admin() {
            return Err(AccessError::Forbidden);
        }
        Ok(session)
    }
}
