//! Nominatim-compatible reverse geocoding client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use mishwar_domain::Coordinates;

use crate::infrastructure::ports::{Address, GeocodeError, GeocodePort};

/// Default public Nominatim endpoint.
pub const DEFAULT_NOMINATIM_BASE_URL: &str = "https://nominatim.openstreetmap.org";

/// Client for a Nominatim-compatible `/reverse` endpoint.
#[derive(Clone)]
pub struct NominatimClient {
    client: Client,
    base_url: String,
}

impl NominatimClient {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent("mishwar-engine")
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

impl Default for NominatimClient {
    fn default() -> Self {
        Self::new(DEFAULT_NOMINATIM_BASE_URL, Duration::from_secs(10))
    }
}

#[async_trait]
impl GeocodePort for NominatimClient {
    async fn reverse_geocode(
        &self,
        coordinates: Coordinates,
    ) -> Result<Option<Address>, GeocodeError> {
        let response = self
            .client
            .get(format!("{}/reverse", self.base_url))
            .query(&[
                ("format", "jsonv2".to_string()),
                ("lat", coordinates.latitude().to_string()),
                ("lon", coordinates.longitude().to_string()),
            ])
            .send()
            .await
            .map_err(|e| GeocodeError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(GeocodeError::Transport(format!(
                "reverse geocode returned {}",
                response.status()
            )));
        }

        let body: ReverseResponse = response
            .json()
            .await
            .map_err(|e| GeocodeError::InvalidResponse(e.to_string()))?;

        // Nominatim reports "unable to geocode" as an error field, not a status.
        if body.error.is_some() {
            return Ok(None);
        }

        Ok(body.address.map(Address::from))
    }
}

#[derive(Debug, Deserialize)]
struct ReverseResponse {
    error: Option<String>,
    address: Option<ReverseAddress>,
}

#[derive(Debug, Default, Deserialize)]
struct ReverseAddress {
    road: Option<String>,
    neighbourhood: Option<String>,
    suburb: Option<String>,
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
    country: Option<String>,
}

impl From<ReverseAddress> for Address {
    fn from(raw: ReverseAddress) -> Self {
        Self {
            road: raw.road,
            district: raw.neighbourhood.or(raw.suburb),
            city: raw.city.or(raw.town).or(raw.village),
            country: raw.country,
        }
    }
}
