//! Reverse-geocoding port used to turn a map pin into an address.

use crate::issue::domain::Coordinates;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for reverse-geocoding operations.
pub type GeocoderResult<T> = Result<T, GeocoderError>;

/// Address lookup contract.
#[async_trait]
pub trait ReverseGeocoder: Send + Sync {
    /// Resolves coordinates to a human-readable address.
    ///
    /// Returns `None` when the provider answered but knows no address for
    /// the point.
    async fn reverse(&self, coordinates: Coordinates) -> GeocoderResult<Option<String>>;
}

/// Errors returned by reverse-geocoding adapters.
#[derive(Debug, Clone, Error)]
pub enum GeocoderError {
    /// The provider could not be reached or timed out.
    #[error("geocoder transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),

    /// The provider answered with a non-success status.
    #[error("geocoder returned HTTP status {0}")]
    Status(u16),

    /// The provider response could not be decoded.
    #[error("geocoder response could not be decoded: {0}")]
    Decode(Arc<dyn std::error::Error + Send + Sync>),
}

impl GeocoderError {
    /// Wraps a transport error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }

    /// Wraps a decoding error.
    pub fn decode(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Decode(Arc::new(err))
    }
}
