//! Session persistence port.

use crate::access::domain::{Session, SessionToken};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for session store operations.
pub type SessionStoreResult<T> = Result<T, SessionStoreError>;

/// Session persistence contract.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Saves a newly opened session.
    async fn save(&self, session: &Session) -> SessionStoreResult<()>;

    /// Finds a session by token, expired or not.
    async fn find(&self, token: &SessionToken) -> SessionStoreResult<Option<Session>>;

    /// Removes a session. Returns `true` when a session was removed.
    async fn revoke(&self, token: &SessionToken) -> SessionStoreResult<bool>;

    /// Removes every session expired at `now`. Returns how many were removed.
    async fn purge_expired(&self, now: DateTime<Utc>) -> SessionStoreResult<usize>;
}

/// Errors returned by session store implementations.
#[derive(Debug, Clone, Error)]
pub enum SessionStoreError {
    /// Persistence-layer failure.
    #[error("session persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl SessionStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
