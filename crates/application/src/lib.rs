//! Application layer - Use cases and orchestration
//!
//! Defines the ports the pipeline depends on and the search service that
//! orchestrates geocoding, stop resolution, and departure scheduling.
//! Adapters in the infrastructure layer implement the ports.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
