//! Reverse geocoding against an OpenStreetMap Nominatim endpoint.

use crate::issue::{
    domain::Coordinates,
    ports::{GeocoderError, GeocoderResult, ReverseGeocoder},
};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

/// Public Nominatim instance.
pub const DEFAULT_NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";

#[derive(Debug, Deserialize)]
struct ReverseResponse {
    display_name: Option<String>,
}

/// [`ReverseGeocoder`] backed by the Nominatim `/reverse` API.
#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    client: reqwest::Client,
    base_url: String,
}

impl NominatimGeocoder {
    /// Creates a geocoder for the given base URL.
    ///
    /// Nominatim's usage policy requires an identifying `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`GeocoderError::Transport`] when the HTTP client cannot be
    /// built.
    pub fn new(
        base_url: impl Into<String>,
        user_agent: &str,
        timeout: Duration,
    ) -> GeocoderResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(GeocoderError::transport)?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    fn reverse_url(&self) -> String {
        format!("{}/reverse", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl ReverseGeocoder for NominatimGeocoder {
    async fn reverse(&self, coordinates: Coordinates) -> GeocoderResult<Option<String>> {
        let query = [
            ("format", "json".to_owned()),
            ("lat", coordinates.latitude().to_string()),
            ("lon", coordinates.longitude().to_string()),
        ];
        let response = self
            .client
            .get(self.reverse_url())
            .query(&query)
            .send()
            .await
            .map_err(GeocoderError::transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeocoderError::Status(status.as_u16()));
        }

        let body = response
            .json::<ReverseResponse>()
            .await
            .map_err(GeocoderError::decode)?;
        Ok(body
            .display_name
            .map(|name| name.trim().to_owned())
            .filter(|name| !name.is_empty()))
    }
}
