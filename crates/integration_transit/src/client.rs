//! Transit App API client
//!
//! Provides nearby-stop, nearby-route, and per-stop departure lookup using
//! the [Transit App public API](https://external.transitapp.com/v3/public).
//! Every request carries the static API key in the `apiKey` header.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::RETRY_AFTER;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::config::TransitConfig;
use crate::error::TransitError;
use crate::models::{NearbyRoute, NearbyStop, StopDeparture};

/// Trait for transit data provider clients
#[async_trait]
pub trait TransitClient: Send + Sync {
    /// All stops within `max_distance` meters of a coordinate
    async fn nearby_stops(
        &self,
        latitude: f64,
        longitude: f64,
        max_distance: u32,
    ) -> Result<Vec<NearbyStop>, TransitError>;

    /// All routes serving points within `max_distance` meters of a
    /// coordinate, with nested itinerary and schedule data
    async fn nearby_routes(
        &self,
        latitude: f64,
        longitude: f64,
        max_distance: u32,
    ) -> Result<Vec<NearbyRoute>, TransitError>;

    /// Upcoming departures at one known stop
    async fn stop_departures(
        &self,
        global_stop_id: &str,
    ) -> Result<Vec<StopDeparture>, TransitError>;

    /// Check if the transit provider is reachable
    async fn is_healthy(&self) -> bool;
}

/// Transit App API client
#[derive(Debug)]
pub struct TransitAppClient {
    client: Client,
    config: TransitConfig,
}

impl TransitAppClient {
    /// Create a new Transit App API client
    ///
    /// # Errors
    ///
    /// Returns [`TransitError::InvalidConfig`] when the configuration is
    /// rejected, in particular for a missing API key, or when the HTTP
    /// client cannot be initialized.
    pub fn new(config: &TransitConfig) -> Result<Self, TransitError> {
        config.validate().map_err(TransitError::InvalidConfig)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("stopfinder/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TransitError::InvalidConfig(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// "true"/"false" value for the realtime refresh query parameter
    fn realtime_param(&self) -> &'static str {
        if self.config.realtime { "true" } else { "false" }
    }

    fn send_error(&self, error: &reqwest::Error) -> TransitError {
        if error.is_timeout() {
            TransitError::Timeout {
                timeout_secs: self.config.timeout_secs,
            }
        } else {
            TransitError::Unreachable(error.to_string())
        }
    }

    /// Issue one authenticated GET and return the response body
    ///
    /// Exactly one attempt per call; transient failures surface to the
    /// caller instead of being retried here.
    async fn get(&self, path: &str, params: &[(&str, String)]) -> Result<String, TransitError> {
        let url = format!("{}/{path}", self.config.base_url);

        let response = self
            .client
            .get(&url)
            .header("apiKey", self.config.api_key.as_str())
            .query(params)
            .send()
            .await
            .map_err(|e| self.send_error(&e))?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after_secs = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok());
            return Err(TransitError::Throttled { retry_after_secs });
        }
        if !status.is_success() {
            return Err(TransitError::BadStatus {
                status: status.as_u16(),
            });
        }

        response
            .text()
            .await
            .map_err(|e| TransitError::BadPayload(e.to_string()))
    }

    /// Parse the raw JSON `nearby_stops` response
    fn parse_stops_response(body: &str) -> Result<Vec<NearbyStop>, TransitError> {
        let raw: RawStopsResponse =
            serde_json::from_str(body).map_err(|e| TransitError::BadPayload(e.to_string()))?;
        Ok(raw.stops)
    }

    /// Parse the raw JSON `nearby_routes` response
    fn parse_routes_response(body: &str) -> Result<Vec<NearbyRoute>, TransitError> {
        let raw: RawRoutesResponse =
            serde_json::from_str(body).map_err(|e| TransitError::BadPayload(e.to_string()))?;
        Ok(raw.routes)
    }

    /// Parse the raw JSON `stop_departures` response
    fn parse_departures_response(body: &str) -> Result<Vec<StopDeparture>, TransitError> {
        let raw: RawDeparturesResponse =
            serde_json::from_str(body).map_err(|e| TransitError::BadPayload(e.to_string()))?;
        Ok(raw.departures)
    }
}

#[async_trait]
impl TransitClient for TransitAppClient {
    #[instrument(skip(self))]
    async fn nearby_stops(
        &self,
        latitude: f64,
        longitude: f64,
        max_distance: u32,
    ) -> Result<Vec<NearbyStop>, TransitError> {
        let params = [
            ("lat", latitude.to_string()),
            ("lon", longitude.to_string()),
            ("max_distance", max_distance.to_string()),
            ("stop_filter", "Routable".to_string()),
            ("pickup_dropoff_filter", "Everything".to_string()),
        ];

        debug!("Searching nearby stops");
        let body = self.get("nearby_stops", &params).await?;
        let stops = Self::parse_stops_response(&body)?;

        if stops.is_empty() {
            warn!("No stops within radius");
        }
        debug!(count = stops.len(), "Stops found");
        Ok(stops)
    }

    #[instrument(skip(self))]
    async fn nearby_routes(
        &self,
        latitude: f64,
        longitude: f64,
        max_distance: u32,
    ) -> Result<Vec<NearbyRoute>, TransitError> {
        let params = [
            ("lat", latitude.to_string()),
            ("lon", longitude.to_string()),
            ("max_distance", max_distance.to_string()),
            ("should_update_realtime", self.realtime_param().to_string()),
        ];

        debug!("Searching nearby routes");
        let body = self.get("nearby_routes", &params).await?;
        let routes = Self::parse_routes_response(&body)?;

        debug!(count = routes.len(), "Routes found");
        Ok(routes)
    }

    #[instrument(skip(self))]
    async fn stop_departures(
        &self,
        global_stop_id: &str,
    ) -> Result<Vec<StopDeparture>, TransitError> {
        let params = [
            ("global_stop_id", global_stop_id.to_string()),
            ("should_update_realtime", self.realtime_param().to_string()),
        ];

        debug!("Fetching stop departures");
        let body = self.get("stop_departures", &params).await?;
        let departures = Self::parse_departures_response(&body)?;

        debug!(count = departures.len(), "Departures found");
        Ok(departures)
    }

    async fn is_healthy(&self) -> bool {
        let params = [
            ("lat", "41.7658".to_string()),
            ("lon", "-72.6734".to_string()),
            ("max_distance", "100".to_string()),
        ];
        self.get("nearby_stops", &params).await.is_ok()
    }
}

// --- Raw API response envelopes for deserialization ---

#[derive(Debug, Deserialize)]
struct RawStopsResponse {
    #[serde(default)]
    stops: Vec<NearbyStop>,
}

#[derive(Debug, Deserialize)]
struct RawRoutesResponse {
    #[serde(default)]
    routes: Vec<NearbyRoute>,
}

#[derive(Debug, Deserialize)]
struct RawDeparturesResponse {
    #[serde(default)]
    departures: Vec<StopDeparture>,
}
