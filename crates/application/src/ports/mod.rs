//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external providers. Adapters in the infrastructure layer implement
//! these ports.

mod geocoding_port;
mod transit_port;

pub use geocoding_port::GeocodingPort;
#[cfg(test)]
pub use geocoding_port::MockGeocodingPort;
#[cfg(test)]
pub use transit_port::MockTransitPort;
pub use transit_port::TransitPort;
