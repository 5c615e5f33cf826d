//! Transit provider integration for the stop finder
//!
//! Provides nearby-stop, nearby-route, and per-stop departure lookup via
//! the [Transit App public API](https://external.transitapp.com/v3/public)
//! and address geocoding via
//! [Nominatim/OpenStreetMap](https://nominatim.openstreetmap.org).
//!
//! # Architecture
//!
//! The crate follows a client-trait pattern: [`TransitClient`] defines the
//! provider interface, implemented by [`TransitAppClient`];
//! [`GeocodingClient`] handles address-to-coordinate conversion via
//! [`NominatimClient`]. Both clients are configured explicitly; the
//! geocoder additionally paces its requests to Nominatim's
//! one-per-second policy.
//!
//! # Example
//!
//! ```rust,ignore
//! use integration_transit::{TransitAppClient, TransitClient, TransitConfig};
//!
//! let config = TransitConfig {
//!     api_key: "<your key>".to_string(),
//!     ..TransitConfig::default()
//! };
//! let client = TransitAppClient::new(&config)?;
//!
//! let stops = client.nearby_stops(41.7658, -72.6734, 1_000).await?;
//! ```

mod client;
mod config;
mod error;
mod geocoding;
mod models;

pub use client::{TransitAppClient, TransitClient};
pub use config::TransitConfig;
pub use error::TransitError;
pub use geocoding::{
    GeocodingClient, GeocodingError, NominatimClient, NominatimConfig, Viewbox,
};
pub use models::{NearbyRoute, NearbyStop, RouteItinerary, ScheduleEntry, StopDeparture};
