//! Transit data provider port
//!
//! Defines the three provider operations the pipeline consumes: stops near
//! a coordinate, routes (with nested schedule data) near a coordinate, and
//! the flat per-stop departure listing.

use async_trait::async_trait;
use domain::entities::{RouteDeparture, RouteTimetable, StopCandidate};
use domain::value_objects::GeoLocation;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for transit data operations
///
/// Empty result vectors mean the provider answered with nothing in range;
/// `Err` means the provider failed. Callers collapse both to an empty
/// outcome but keep the distinction for diagnostics.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TransitPort: Send + Sync {
    /// All stops within `radius_meters` of a coordinate
    async fn nearby_stops(
        &self,
        at: GeoLocation,
        radius_meters: u32,
    ) -> Result<Vec<StopCandidate>, ApplicationError>;

    /// All routes serving points within `radius_meters` of a coordinate,
    /// with their nested itinerary/schedule data
    async fn nearby_routes(
        &self,
        at: GeoLocation,
        radius_meters: u32,
    ) -> Result<Vec<RouteTimetable>, ApplicationError>;

    /// Upcoming departures at one known stop
    async fn stop_departures(
        &self,
        global_stop_id: &str,
    ) -> Result<Vec<RouteDeparture>, ApplicationError>;

    /// Check if the transit provider is reachable
    async fn is_available(&self) -> bool;
}
