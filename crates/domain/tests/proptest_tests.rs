//! Property-based tests for domain logic
//!
//! These tests use proptest to verify invariants across many random inputs.

use std::time::Duration;

use domain::countdown::remaining;
use domain::entities::{
    departure_board, nearest_stop, sort_departures, Itinerary, RouteDeparture, RouteTimetable,
    ScheduleItem, StopCandidate,
};
use domain::value_objects::GeoLocation;
use proptest::prelude::*;

fn candidate_strategy() -> impl Strategy<Value = StopCandidate> {
    ("[a-z]{1,8}", 0.0f64..50_000.0f64).prop_map(|(stop_id, distance_meters)| StopCandidate {
        name: format!("Stop {stop_id}"),
        stop_id,
        location: GeoLocation::hartford(),
        distance_meters,
    })
}

fn timetable_strategy() -> impl Strategy<Value = RouteTimetable> {
    (
        "[A-Z0-9]{1,4}",
        prop::collection::vec(
            prop::collection::vec(prop::option::of(0i64..2_000_000_000i64), 0..5),
            0..4,
        ),
    )
        .prop_map(|(route_name, itineraries)| RouteTimetable {
            route_name,
            itineraries: itineraries
                .into_iter()
                .map(|epochs| Itinerary {
                    schedule_items: epochs
                        .into_iter()
                        .map(|departure_epoch| ScheduleItem { departure_epoch })
                        .collect(),
                })
                .collect(),
        })
}

mod nearest_stop_tests {
    use super::*;

    proptest! {
        #[test]
        fn result_is_minimal(candidates in prop::collection::vec(candidate_strategy(), 1..20)) {
            let all_distances: Vec<f64> =
                candidates.iter().map(|c| c.distance_meters).collect();
            let chosen = nearest_stop(candidates).expect("non-empty set");
            for distance in all_distances {
                prop_assert!(chosen.distance_meters <= distance);
            }
        }

        #[test]
        fn result_comes_from_input(candidates in prop::collection::vec(candidate_strategy(), 1..20)) {
            let ids: Vec<String> = candidates.iter().map(|c| c.stop_id.clone()).collect();
            let chosen = nearest_stop(candidates).expect("non-empty set");
            prop_assert!(ids.contains(&chosen.stop_id));
        }

        #[test]
        fn first_minimum_wins(candidates in prop::collection::vec(candidate_strategy(), 1..20)) {
            let expected_index = candidates
                .iter()
                .enumerate()
                .fold(0usize, |best, (index, candidate)| {
                    if candidate.distance_meters < candidates[best].distance_meters {
                        index
                    } else {
                        best
                    }
                });
            let expected_id = candidates[expected_index].stop_id.clone();
            let chosen = nearest_stop(candidates).expect("non-empty set");
            prop_assert_eq!(chosen.stop_id, expected_id);
        }
    }

    #[test]
    fn empty_set_is_absent() {
        assert!(nearest_stop(Vec::new()).is_none());
    }
}

mod departure_board_tests {
    use super::*;

    proptest! {
        #[test]
        fn board_is_sorted_ascending(routes in prop::collection::vec(timetable_strategy(), 0..12)) {
            let board = departure_board(&routes);
            for pair in board.windows(2) {
                prop_assert!(pair[0].departure_epoch <= pair[1].departure_epoch);
            }
        }

        #[test]
        fn entry_matches_route_minimum(mut routes in prop::collection::vec(timetable_strategy(), 0..12)) {
            // Disambiguate generated names so each entry maps to one route.
            for (index, route) in routes.iter_mut().enumerate() {
                route.route_name = format!("{}-{index}", route.route_name);
            }
            let board = departure_board(&routes);
            for entry in &board {
                let minimum = routes
                    .iter()
                    .find(|route| route.route_name == entry.route_name)
                    .and_then(RouteTimetable::earliest_departure)
                    .expect("board entries come from routes with schedule data");
                prop_assert_eq!(entry.departure_epoch, minimum);
            }
        }

        #[test]
        fn schedule_free_routes_are_excluded(routes in prop::collection::vec(timetable_strategy(), 0..12)) {
            let board = departure_board(&routes);
            let with_schedule = routes
                .iter()
                .filter(|route| route.earliest_departure().is_some())
                .count();
            prop_assert_eq!(board.len(), with_schedule);
        }

        #[test]
        fn sorting_is_idempotent(routes in prop::collection::vec(timetable_strategy(), 0..12)) {
            let board = departure_board(&routes);
            let mut resorted: Vec<RouteDeparture> = board.clone();
            sort_departures(&mut resorted);
            prop_assert_eq!(resorted, board);
        }
    }
}

mod countdown_tests {
    use super::*;

    proptest! {
        #[test]
        fn remaining_is_never_negative(departure in any::<i64>(), now in any::<i64>()) {
            // Duration is unsigned; the property is that this never panics
            // and hits zero exactly when the departure has passed.
            let left = remaining(departure, now);
            if now >= departure {
                prop_assert_eq!(left, Duration::ZERO);
            } else {
                prop_assert!(left > Duration::ZERO);
            }
        }

        #[test]
        fn remaining_matches_difference(departure in 0i64..4_000_000_000i64, lead in 0i64..1_000_000i64) {
            let now = departure - lead;
            let left = remaining(departure, now);
            prop_assert_eq!(left, Duration::from_secs(u64::try_from(lead).expect("non-negative")));
        }
    }
}
