//! Route timetables and departure aggregation
//!
//! A route's provider payload nests itineraries, each holding schedule
//! items with UTC epoch departure timestamps. The departure board keeps one
//! entry per route: its earliest known upcoming departure.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One scheduled departure instance
///
/// The provider omits the timestamp for schedule items it cannot resolve;
/// such items are skipped during aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleItem {
    /// Departure time as UTC seconds since the epoch
    pub departure_epoch: Option<i64>,
}

/// A provider-specific grouping of scheduled trips for a route at a stop
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Itinerary {
    /// Scheduled departures within this itinerary
    pub schedule_items: Vec<ScheduleItem>,
}

/// A route serving the queried area, with its nested schedule data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteTimetable {
    /// Short display name of the route (e.g. "41", "Green Line")
    pub route_name: String,
    /// Itineraries grouping this route's scheduled trips
    pub itineraries: Vec<Itinerary>,
}

impl RouteTimetable {
    /// Earliest departure epoch across all schedule items of all itineraries
    ///
    /// `None` when no schedule item carries a timestamp.
    #[must_use]
    pub fn earliest_departure(&self) -> Option<i64> {
        self.itineraries
            .iter()
            .flat_map(|itinerary| &itinerary.schedule_items)
            .filter_map(|item| item.departure_epoch)
            .min()
    }
}

/// A route's earliest known upcoming departure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteDeparture {
    /// Short display name of the route
    pub route_name: String,
    /// Departure time as UTC seconds since the epoch
    pub departure_epoch: i64,
}

impl fmt::Display for RouteDeparture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {}", self.route_name, self.departure_epoch)
    }
}

/// Build the time-ordered departure board for a set of routes
///
/// Each route with at least one timestamped schedule item contributes
/// exactly one entry holding its minimum departure epoch; routes without
/// schedule data are excluded, not represented as zero or null. The result
/// is sorted ascending by epoch, ties in provider order.
#[must_use]
pub fn departure_board(routes: &[RouteTimetable]) -> Vec<RouteDeparture> {
    let mut departures: Vec<RouteDeparture> = routes
        .iter()
        .filter_map(|route| {
            route.earliest_departure().map(|epoch| RouteDeparture {
                route_name: route.route_name.clone(),
                departure_epoch: epoch,
            })
        })
        .collect();
    sort_departures(&mut departures);
    departures
}

/// Sort departures ascending by epoch
///
/// The sort is stable: entries with equal timestamps keep their existing
/// (provider) order, and re-sorting a sorted list changes nothing.
pub fn sort_departures(departures: &mut [RouteDeparture]) {
    departures.sort_by_key(|departure| departure.departure_epoch);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(name: &str, epochs_per_itinerary: &[&[i64]]) -> RouteTimetable {
        RouteTimetable {
            route_name: name.to_string(),
            itineraries: epochs_per_itinerary
                .iter()
                .map(|epochs| Itinerary {
                    schedule_items: epochs
                        .iter()
                        .map(|&epoch| ScheduleItem {
                            departure_epoch: Some(epoch),
                        })
                        .collect(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_earliest_departure_minimum_across_itineraries() {
        let r = route("41", &[&[500, 200], &[350]]);
        assert_eq!(r.earliest_departure(), Some(200));
    }

    #[test]
    fn test_earliest_departure_none_without_items() {
        let r = route("41", &[]);
        assert_eq!(r.earliest_departure(), None);

        let r = route("41", &[&[], &[]]);
        assert_eq!(r.earliest_departure(), None);
    }

    #[test]
    fn test_earliest_departure_skips_missing_timestamps() {
        let r = RouteTimetable {
            route_name: "41".to_string(),
            itineraries: vec![Itinerary {
                schedule_items: vec![
                    ScheduleItem {
                        departure_epoch: None,
                    },
                    ScheduleItem {
                        departure_epoch: Some(900),
                    },
                    ScheduleItem {
                        departure_epoch: None,
                    },
                ],
            }],
        };
        assert_eq!(r.earliest_departure(), Some(900));
    }

    #[test]
    fn test_board_excludes_routes_without_schedule() {
        // Route A has items at 200 and 100; Route B has none.
        let board = departure_board(&[route("A", &[&[200, 100]]), route("B", &[&[]])]);
        assert_eq!(board.len(), 1);
        assert_eq!(board[0].route_name, "A");
        assert_eq!(board[0].departure_epoch, 100);
    }

    #[test]
    fn test_board_sorted_ascending() {
        let board = departure_board(&[
            route("late", &[&[300]]),
            route("early", &[&[100]]),
            route("mid", &[&[200]]),
        ]);
        let epochs: Vec<i64> = board.iter().map(|d| d.departure_epoch).collect();
        assert_eq!(epochs, vec![100, 200, 300]);
        assert_eq!(board[0].route_name, "early");
    }

    #[test]
    fn test_board_empty_for_no_routes() {
        assert!(departure_board(&[]).is_empty());
    }

    #[test]
    fn test_equal_epochs_keep_provider_order() {
        let board = departure_board(&[
            route("first", &[&[100]]),
            route("second", &[&[100]]),
            route("third", &[&[50]]),
        ]);
        let names: Vec<&str> = board.iter().map(|d| d.route_name.as_str()).collect();
        assert_eq!(names, vec!["third", "first", "second"]);
    }

    #[test]
    fn test_sort_is_idempotent() {
        let mut departures = vec![
            RouteDeparture {
                route_name: "a".to_string(),
                departure_epoch: 10,
            },
            RouteDeparture {
                route_name: "b".to_string(),
                departure_epoch: 20,
            },
        ];
        let before = departures.clone();
        sort_departures(&mut departures);
        assert_eq!(departures, before);
    }

    #[test]
    fn test_route_departure_display() {
        let departure = RouteDeparture {
            route_name: "41".to_string(),
            departure_epoch: 1700000000,
        };
        assert_eq!(departure.to_string(), "41 @ 1700000000");
    }
}
