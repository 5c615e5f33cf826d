//! Geocoding adapter - Implements GeocodingPort using integration_transit

use application::error::ApplicationError;
use application::ports::GeocodingPort;
use async_trait::async_trait;
use domain::value_objects::GeoLocation;
use integration_transit::{GeocodingClient, GeocodingError, NominatimClient};
use tracing::{debug, instrument, warn};

/// Adapter for address geocoding using Nominatim
#[derive(Debug)]
pub struct NominatimGeocodingAdapter {
    client: NominatimClient,
}

impl NominatimGeocodingAdapter {
    /// Create a new geocoding adapter
    #[must_use]
    pub const fn new(client: NominatimClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl GeocodingPort for NominatimGeocodingAdapter {
    #[instrument(skip(self))]
    async fn geocode(&self, address: &str) -> Result<Option<GeoLocation>, ApplicationError> {
        match self.client.geocode(address).await {
            Ok(location) => {
                debug!(%address, %location, "Geocoded address");
                Ok(Some(location))
            },
            Err(GeocodingError::NoMatch(_)) => {
                debug!(%address, "Address not found");
                Ok(None)
            },
            Err(error) => {
                warn!(%address, %error, "Geocoding provider failed");
                Err(ApplicationError::ExternalService(format!(
                    "Geocoding failed: {error}"
                )))
            },
        }
    }
}
