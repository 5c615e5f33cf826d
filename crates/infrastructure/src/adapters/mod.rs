//! Port adapters over the integration clients

mod geocoding_adapter;
mod transit_adapter;

pub use geocoding_adapter::NominatimGeocodingAdapter;
pub use transit_adapter::TransitAdapter;
