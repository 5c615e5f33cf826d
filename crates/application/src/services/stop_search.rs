//! Stop search pipeline
//!
//! Orchestrates the three stages in strict dependency order: geocode the
//! address, resolve the nearest stop within the search radius, then build
//! the departure board from the routes serving the stop's coordinate.
//! Provider failures collapse to the stage's empty outcome; the reason is
//! kept on the result so logs and tests can tell the cases apart.

use std::fmt;
use std::sync::Arc;

use domain::entities::{
    departure_board, nearest_stop, sort_departures, RouteDeparture, StopCandidate,
};
use domain::value_objects::GeoLocation;
use tracing::{debug, instrument, warn};

use crate::ports::{GeocodingPort, TransitPort};

/// Pipeline stage, used to tag diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Address-to-coordinate resolution
    Geocoding,
    /// Nearest-stop lookup
    StopLookup,
    /// Route/departure aggregation
    Departures,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Geocoding => write!(f, "geocoding"),
            Self::StopLookup => write!(f, "stop-lookup"),
            Self::Departures => write!(f, "departures"),
        }
    }
}

/// Why a stage produced no value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyReason {
    /// The provider answered and had nothing for the query
    NoMatch,
    /// The provider failed (timeout, bad status, malformed payload)
    ProviderFailure,
}

/// A departure list plus the reason it is empty, when it is
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartureBoard {
    /// Departures sorted ascending by epoch
    pub departures: Vec<RouteDeparture>,
    /// Set only when `departures` is empty
    pub empty_reason: Option<EmptyReason>,
}

impl DepartureBoard {
    fn from_departures(departures: Vec<RouteDeparture>) -> Self {
        let empty_reason = departures.is_empty().then_some(EmptyReason::NoMatch);
        Self {
            departures,
            empty_reason,
        }
    }

    fn failed() -> Self {
        Self {
            departures: Vec::new(),
            empty_reason: Some(EmptyReason::ProviderFailure),
        }
    }
}

/// A fully resolved search: the origin, the chosen stop, and its board
#[derive(Debug, Clone, PartialEq)]
pub struct StopBoard {
    /// Coordinate the address resolved to
    pub origin: GeoLocation,
    /// Nearest stop within the search radius
    pub stop: StopCandidate,
    /// Departure board for the stop's coordinate
    pub board: DepartureBoard,
}

/// Outcome of one pipeline search
///
/// Each variant maps to one user-facing message; the embedded
/// [`EmptyReason`] distinguishes "nothing there" from "provider failed"
/// without changing the variant.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchResult {
    /// Empty or whitespace-only input; no network call was made
    MissingAddress,
    /// The address did not resolve to a coordinate
    LocationNotFound(EmptyReason),
    /// No stop within the search radius of the resolved coordinate
    StopNotFound {
        /// Coordinate the address resolved to
        origin: GeoLocation,
        /// Why the stop lookup came back empty
        reason: EmptyReason,
    },
    /// Nearest stop resolved; the board may still be empty
    Resolved(StopBoard),
}

/// Orchestrates the geocode → nearest-stop → departures pipeline
///
/// Holds no state between calls; every search is independent and
/// idempotent. Dropping the returned future aborts any in-flight provider
/// request.
pub struct StopSearchService {
    geocoding: Arc<dyn GeocodingPort>,
    transit: Arc<dyn TransitPort>,
    radius_meters: u32,
}

impl fmt::Debug for StopSearchService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StopSearchService")
            .field("radius_meters", &self.radius_meters)
            .finish_non_exhaustive()
    }
}

impl StopSearchService {
    /// Create a new search service over the given ports
    #[must_use]
    pub fn new(
        geocoding: Arc<dyn GeocodingPort>,
        transit: Arc<dyn TransitPort>,
        radius_meters: u32,
    ) -> Self {
        Self {
            geocoding,
            transit,
            radius_meters,
        }
    }

    /// Run the full pipeline for a free-text address
    #[instrument(skip(self))]
    pub async fn search(&self, address: &str) -> SearchResult {
        let address = address.trim();
        if address.is_empty() {
            debug!("Empty address input, skipping search");
            return SearchResult::MissingAddress;
        }

        let origin = match self.geocoding.geocode(address).await {
            Ok(Some(location)) => location,
            Ok(None) => {
                debug!(%address, "Address did not resolve");
                return SearchResult::LocationNotFound(EmptyReason::NoMatch);
            },
            Err(error) => {
                warn!(stage = %Stage::Geocoding, %error, "Geocoding provider failed");
                return SearchResult::LocationNotFound(EmptyReason::ProviderFailure);
            },
        };

        let stop = match self.transit.nearby_stops(origin, self.radius_meters).await {
            Ok(candidates) => match nearest_stop(candidates) {
                Some(stop) => stop,
                None => {
                    debug!(%origin, "No stops within radius");
                    return SearchResult::StopNotFound {
                        origin,
                        reason: EmptyReason::NoMatch,
                    };
                },
            },
            Err(error) => {
                warn!(stage = %Stage::StopLookup, %error, "Stop lookup failed");
                return SearchResult::StopNotFound {
                    origin,
                    reason: EmptyReason::ProviderFailure,
                };
            },
        };

        // Route lookup re-uses the resolved stop's coordinate, never the
        // user's origin.
        let board = self.board_near(stop.location).await;

        SearchResult::Resolved(StopBoard {
            origin,
            stop,
            board,
        })
    }

    /// Departure board for the routes serving a coordinate
    #[instrument(skip(self))]
    pub async fn board_near(&self, at: GeoLocation) -> DepartureBoard {
        match self.transit.nearby_routes(at, self.radius_meters).await {
            Ok(routes) => {
                let board = DepartureBoard::from_departures(departure_board(&routes));
                debug!(count = board.departures.len(), "Departure board built");
                board
            },
            Err(error) => {
                warn!(stage = %Stage::Departures, %error, "Route lookup failed");
                DepartureBoard::failed()
            },
        }
    }

    /// Departure board for one known stop, via the per-stop endpoint
    ///
    /// The provider returns these pre-sorted; they are re-sorted through
    /// the same stable ordering regardless.
    #[instrument(skip(self))]
    pub async fn board_for_stop(&self, global_stop_id: &str) -> DepartureBoard {
        match self.transit.stop_departures(global_stop_id).await {
            Ok(mut departures) => {
                sort_departures(&mut departures);
                DepartureBoard::from_departures(departures)
            },
            Err(error) => {
                warn!(stage = %Stage::Departures, %global_stop_id, %error, "Stop departures failed");
                DepartureBoard::failed()
            },
        }
    }

    /// Check if the transit provider is reachable
    pub async fn provider_available(&self) -> bool {
        self.transit.is_available().await
    }
}
