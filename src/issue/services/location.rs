//! Turns a map pin into location text, degrading to raw coordinates.

use crate::issue::{domain::Coordinates, ports::ReverseGeocoder};
use std::sync::Arc;

/// Resolves map coordinates to an address through a [`ReverseGeocoder`].
pub struct LocationResolver<G>
where
    G: ReverseGeocoder + ?Sized,
{
    geocoder: Arc<G>,
}

impl<G> Clone for LocationResolver<G>
where
    G: ReverseGeocoder + ?Sized,
{
    fn clone(&self) -> Self {
        Self {
            geocoder: Arc::clone(&self.geocoder),
        }
    }
}

impl<G> LocationResolver<G>
where
    G: ReverseGeocoder + ?Sized,
{
    /// Creates a resolver over the given geocoder.
    #[must_use]
    pub const fn new(geocoder: Arc<G>) -> Self {
        Self { geocoder }
    }

    /// Returns the address for `coordinates`.
    ///
    /// Never fails: when the lookup errors or yields no address the result
    /// is the coordinate pair formatted to four decimals.
    pub async fn resolve(&self, coordinates: Coordinates) -> String {
        match self.geocoder.reverse(coordinates).await {
            Ok(Some(address)) => address,
            Ok(None) => {
                tracing::debug!(%coordinates, "no address for coordinates");
                coordinates.to_string()
            }
            Err(err) => {
                tracing::warn!(%coordinates, error = %err, "reverse geocoding failed");
                coordinates.to_string()
            }
        }
    }
}
