//! Transit adapter - Implements TransitPort using integration_transit

use application::error::ApplicationError;
use application::ports::TransitPort;
use async_trait::async_trait;
use domain::entities::{Itinerary, RouteDeparture, RouteTimetable, ScheduleItem, StopCandidate};
use domain::value_objects::GeoLocation;
use integration_transit::{
    NearbyRoute, NearbyStop, StopDeparture, TransitAppClient, TransitClient,
};
use tracing::{instrument, warn};

/// Adapter for transit data using the Transit App API
#[derive(Debug)]
pub struct TransitAdapter {
    client: TransitAppClient,
}

impl TransitAdapter {
    /// Create a new transit adapter
    #[must_use]
    pub const fn new(client: TransitAppClient) -> Self {
        Self { client }
    }

    /// Convert a wire stop to a domain candidate
    ///
    /// Stops with out-of-range coordinates are dropped; the provider
    /// occasionally emits them and they cannot be displayed or routed to.
    fn convert_stop(stop: NearbyStop) -> Option<StopCandidate> {
        let Ok(location) = GeoLocation::new(stop.stop_lat, stop.stop_lon) else {
            warn!(stop_id = %stop.global_stop_id, "Dropping stop with invalid coordinates");
            return None;
        };
        Some(StopCandidate {
            stop_id: stop.global_stop_id,
            name: stop.stop_name,
            location,
            distance_meters: stop.distance,
        })
    }

    /// Convert a wire route to a domain timetable
    fn convert_route(route: NearbyRoute) -> RouteTimetable {
        RouteTimetable {
            route_name: route.route_short_name,
            itineraries: route
                .itineraries
                .into_iter()
                .map(|itinerary| Itinerary {
                    schedule_items: itinerary
                        .schedule_items
                        .into_iter()
                        .map(|entry| ScheduleItem {
                            departure_epoch: entry.departure_time,
                        })
                        .collect(),
                })
                .collect(),
        }
    }

    /// Convert a flat wire departure to a domain departure
    ///
    /// Entries without a timestamp carry no scheduling information and are
    /// dropped.
    fn convert_departure(departure: StopDeparture) -> Option<RouteDeparture> {
        departure.departure_time.map(|epoch| RouteDeparture {
            route_name: departure.route_short_name,
            departure_epoch: epoch,
        })
    }
}

#[async_trait]
impl TransitPort for TransitAdapter {
    #[instrument(skip(self))]
    async fn nearby_stops(
        &self,
        at: GeoLocation,
        radius_meters: u32,
    ) -> Result<Vec<StopCandidate>, ApplicationError> {
        let stops = self
            .client
            .nearby_stops(at.latitude(), at.longitude(), radius_meters)
            .await
            .map_err(|e| ApplicationError::ExternalService(format!("Stop lookup failed: {e}")))?;

        Ok(stops.into_iter().filter_map(Self::convert_stop).collect())
    }

    #[instrument(skip(self))]
    async fn nearby_routes(
        &self,
        at: GeoLocation,
        radius_meters: u32,
    ) -> Result<Vec<RouteTimetable>, ApplicationError> {
        let routes = self
            .client
            .nearby_routes(at.latitude(), at.longitude(), radius_meters)
            .await
            .map_err(|e| ApplicationError::ExternalService(format!("Route lookup failed: {e}")))?;

        Ok(routes.into_iter().map(Self::convert_route).collect())
    }

    #[instrument(skip(self))]
    async fn stop_departures(
        &self,
        global_stop_id: &str,
    ) -> Result<Vec<RouteDeparture>, ApplicationError> {
        let departures = self
            .client
            .stop_departures(global_stop_id)
            .await
            .map_err(|e| {
                ApplicationError::ExternalService(format!("Stop departures failed: {e}"))
            })?;

        Ok(departures
            .into_iter()
            .filter_map(Self::convert_departure)
            .collect())
    }

    async fn is_available(&self) -> bool {
        self.client.is_healthy().await
    }
}
