//! Nominatim geocoding client
//!
//! Converts free-form address strings to geographic coordinates using the
//! [Nominatim](https://nominatim.openstreetmap.org) API (OpenStreetMap),
//! restricted to a fixed country filter and regional viewbox.
//!
//! Requests are paced to at most one per second per Nominatim usage
//! policy. Results are not cached; every search issues a fresh query.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use domain::value_objects::GeoLocation;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, instrument};

/// Minimum spacing between two outbound Nominatim requests
const MIN_REQUEST_GAP: Duration = Duration::from_millis(1100);

/// A geographic bounding box for restricting geocoding matches
///
/// Expressed the way Nominatim's `viewbox` parameter wants it: western and
/// eastern longitudes, northern and southern latitudes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewbox {
    /// Western longitude bound in degrees
    pub west: f64,
    /// Northern latitude bound in degrees
    pub north: f64,
    /// Eastern longitude bound in degrees
    pub east: f64,
    /// Southern latitude bound in degrees
    pub south: f64,
}

impl Viewbox {
    /// The Connecticut deployment region
    #[must_use]
    pub const fn connecticut() -> Self {
        Self {
            west: -73.727_775,
            north: 42.050_587,
            east: -71.787_22,
            south: 40.950_943,
        }
    }

    /// Render as a Nominatim `viewbox` query value
    #[must_use]
    pub fn query_value(&self) -> String {
        format!("{},{},{},{}", self.west, self.north, self.east, self.south)
    }
}

/// Configuration for the Nominatim geocoding service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NominatimConfig {
    /// Base URL for the Nominatim API
    #[serde(default = "nominatim_base_url")]
    pub base_url: String,

    /// Bounded wait for each request, in seconds
    #[serde(default = "nominatim_timeout")]
    pub timeout_secs: u64,

    /// Country code filter (e.g., "us")
    #[serde(default = "country_filter")]
    pub country_codes: String,

    /// Bounding box matches are restricted to
    #[serde(default = "region_viewbox")]
    pub viewbox: Viewbox,

    /// Reject matches outside the viewbox entirely
    #[serde(default = "bounded_on")]
    pub bounded: bool,
}

fn nominatim_base_url() -> String {
    "https://nominatim.openstreetmap.org".to_string()
}

const fn nominatim_timeout() -> u64 {
    10
}

fn country_filter() -> String {
    "us".to_string()
}

const fn region_viewbox() -> Viewbox {
    Viewbox::connecticut()
}

const fn bounded_on() -> bool {
    true
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self {
            base_url: nominatim_base_url(),
            timeout_secs: nominatim_timeout(),
            country_codes: country_filter(),
            viewbox: region_viewbox(),
            bounded: bounded_on(),
        }
    }
}

impl NominatimConfig {
    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            timeout_secs: 5,
            ..Default::default()
        }
    }
}

/// Errors surfaced by the geocoding client
#[derive(Debug, Error)]
pub enum GeocodingError {
    /// The geocoder could not be reached at all
    #[error("geocoder unreachable: {0}")]
    Unreachable(String),

    /// The geocoder answered with a non-success HTTP status
    #[error("geocoder returned HTTP {status}")]
    BadStatus {
        /// The HTTP status code
        status: u16,
    },

    /// The response body did not match the documented payload shape
    #[error("malformed geocoder payload: {0}")]
    BadPayload(String),

    /// The geocoder answered but found nothing for the query
    #[error("no match for address: {0}")]
    NoMatch(String),

    /// The bounded wait elapsed before the geocoder answered
    #[error("geocoding request timed out")]
    Timeout,
}

/// Trait for geocoding clients
#[async_trait]
pub trait GeocodingClient: Send + Sync {
    /// Convert a free-form address to geographic coordinates
    async fn geocode(&self, address: &str) -> Result<GeoLocation, GeocodingError>;
}

/// Nominatim-based geocoding client with request pacing
#[derive(Debug)]
pub struct NominatimClient {
    client: Client,
    config: NominatimConfig,
    last_request: Arc<Mutex<Option<Instant>>>,
}

impl NominatimClient {
    /// Create a new Nominatim geocoding client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &NominatimConfig) -> Result<Self, GeocodingError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("stopfinder/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GeocodingError::Unreachable(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
            last_request: Arc::new(Mutex::new(None)),
        })
    }

    /// Hold the caller until a request is allowed again
    ///
    /// Nominatim's usage policy allows at most one request per second per
    /// client; the guard stays locked across the sleep so concurrent
    /// callers queue instead of racing.
    async fn pace(&self) {
        let mut last = self.last_request.lock().await;
        if let Some(previous) = *last
            && let Some(wait) = MIN_REQUEST_GAP.checked_sub(previous.elapsed())
        {
            debug!(?wait, "Pacing geocoding request");
            tokio::time::sleep(wait).await;
        }
        *last = Some(Instant::now());
    }

    /// Query parameters for one `/search` request
    fn search_params(&self, address: &str) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("q", address.to_string()),
            ("format", "jsonv2".to_string()),
            ("limit", "1".to_string()),
            ("viewbox", self.config.viewbox.query_value()),
        ];

        if self.config.bounded {
            params.push(("bounded", "1".to_string()));
        }
        if !self.config.country_codes.is_empty() {
            params.push(("countrycodes", self.config.country_codes.clone()));
        }

        params
    }

    /// Parse the raw JSON `/search` response
    fn parse_search_response(body: &str) -> Result<Vec<NominatimResult>, GeocodingError> {
        serde_json::from_str(body).map_err(|e| GeocodingError::BadPayload(e.to_string()))
    }
}

#[async_trait]
impl GeocodingClient for NominatimClient {
    #[instrument(skip(self))]
    async fn geocode(&self, address: &str) -> Result<GeoLocation, GeocodingError> {
        let address = address.trim();
        if address.is_empty() {
            // Empty input never reaches the network.
            return Err(GeocodingError::NoMatch("empty input".to_string()));
        }

        self.pace().await;

        let url = format!("{}/search", self.config.base_url);
        debug!(%address, "Geocoding address");

        let response = self
            .client
            .get(&url)
            .query(&self.search_params(address))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GeocodingError::Timeout
                } else {
                    GeocodingError::Unreachable(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeocodingError::BadStatus {
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| GeocodingError::BadPayload(e.to_string()))?;
        let results = Self::parse_search_response(&body)?;

        let best = results
            .first()
            .ok_or_else(|| GeocodingError::NoMatch(address.to_string()))?;
        let location = best.coordinate()?;

        debug!(%address, %location, "Geocoded address");
        Ok(location)
    }
}

/// One entry of a raw Nominatim `/search` response
///
/// Nominatim serializes coordinates as strings.
#[derive(Debug, Deserialize)]
struct NominatimResult {
    lat: String,
    lon: String,
}

impl NominatimResult {
    /// Parse the string coordinate pair into a validated location
    fn coordinate(&self) -> Result<GeoLocation, GeocodingError> {
        let latitude: f64 = self
            .lat
            .parse()
            .map_err(|_| GeocodingError::BadPayload(format!("bad latitude: {}", self.lat)))?;
        let longitude: f64 = self
            .lon
            .parse()
            .map_err(|_| GeocodingError::BadPayload(format!("bad longitude: {}", self.lon)))?;

        GeoLocation::new(latitude, longitude)
            .map_err(|e| GeocodingError::BadPayload(e.to_string()))
    }
}
