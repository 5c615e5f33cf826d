//! Typed wire models for the Transit App public API
//!
//! Field names follow the provider payloads so the structs deserialize
//! directly; conversion to domain types happens in the adapters.

use serde::Deserialize;

/// One stop from a `nearby_stops` response
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NearbyStop {
    /// Provider-global stop identifier
    #[serde(default)]
    pub global_stop_id: String,
    /// Stop display name
    #[serde(default)]
    pub stop_name: String,
    /// Stop latitude in degrees
    pub stop_lat: f64,
    /// Stop longitude in degrees
    pub stop_lon: f64,
    /// Distance from the query point in meters
    ///
    /// Stops the provider returns without a distance sort last.
    #[serde(default = "missing_distance")]
    pub distance: f64,
}

const fn missing_distance() -> f64 {
    f64::INFINITY
}

/// One route from a `nearby_routes` response, with nested schedule data
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NearbyRoute {
    /// Short display name of the route
    #[serde(default)]
    pub route_short_name: String,
    /// Itineraries grouping this route's scheduled trips
    #[serde(default)]
    pub itineraries: Vec<RouteItinerary>,
}

/// One itinerary within a route payload
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RouteItinerary {
    /// Scheduled departures within this itinerary
    #[serde(default)]
    pub schedule_items: Vec<ScheduleEntry>,
}

/// One scheduled departure within an itinerary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ScheduleEntry {
    /// Departure time as UTC seconds since the epoch
    ///
    /// Absent when the provider cannot resolve a timestamp for the trip.
    #[serde(default)]
    pub departure_time: Option<i64>,
}

/// One entry from the flat `stop_departures` response
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StopDeparture {
    /// Short display name of the departing route
    #[serde(default)]
    pub route_short_name: String,
    /// Departure time as UTC seconds since the epoch
    #[serde(default)]
    pub departure_time: Option<i64>,
}
