//! Infrastructure layer - configuration and port adapters
//!
//! Loads and validates the application configuration and implements the
//! application ports on top of the integration clients.

pub mod adapters;
pub mod config;

pub use adapters::{NominatimGeocodingAdapter, TransitAdapter};
pub use config::{AppConfig, TransitSettings};
