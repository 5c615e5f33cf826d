//! Transit stop candidates and nearest-stop selection

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::value_objects::GeoLocation;

/// A transit stop returned by the provider for one search
///
/// Candidate sets are ephemeral: they exist only for the duration of a
/// single search and are never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StopCandidate {
    /// Provider-assigned global stop identifier
    pub stop_id: String,
    /// Human-readable stop name
    pub name: String,
    /// Stop coordinates
    pub location: GeoLocation,
    /// Provider-reported distance from the query point, in meters (>= 0)
    pub distance_meters: f64,
}

impl fmt::Display for StopCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.0}m)", self.name, self.distance_meters)
    }
}

/// Select the candidate with the minimum distance
///
/// Returns `None` for an empty candidate set. Ties are broken by provider
/// order: the first occurrence of the minimum distance wins, so the result
/// is stable for identical inputs.
#[must_use]
pub fn nearest_stop(candidates: Vec<StopCandidate>) -> Option<StopCandidate> {
    candidates
        .into_iter()
        .fold(None, |best, candidate| match best {
            Some(best) if candidate.distance_meters < best.distance_meters => Some(candidate),
            Some(best) => Some(best),
            None => Some(candidate),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(stop_id: &str, distance_meters: f64) -> StopCandidate {
        StopCandidate {
            stop_id: stop_id.to_string(),
            name: format!("Stop {stop_id}"),
            location: GeoLocation::hartford(),
            distance_meters,
        }
    }

    #[test]
    fn test_empty_set_has_no_nearest() {
        assert_eq!(nearest_stop(Vec::new()), None);
    }

    #[test]
    fn test_single_candidate_wins() {
        let result = nearest_stop(vec![candidate("a", 120.0)]).expect("one candidate");
        assert_eq!(result.stop_id, "a");
    }

    #[test]
    fn test_minimum_distance_wins() {
        let result = nearest_stop(vec![
            candidate("a", 300.0),
            candidate("b", 45.5),
            candidate("c", 200.0),
        ])
        .expect("non-empty set");
        assert_eq!(result.stop_id, "b");
    }

    #[test]
    fn test_tie_keeps_first_occurrence() {
        let result = nearest_stop(vec![
            candidate("first", 50.0),
            candidate("second", 50.0),
            candidate("third", 50.0),
        ])
        .expect("non-empty set");
        assert_eq!(result.stop_id, "first");
    }

    #[test]
    fn test_zero_distance_is_valid() {
        let result = nearest_stop(vec![candidate("far", 800.0), candidate("here", 0.0)])
            .expect("non-empty set");
        assert_eq!(result.stop_id, "here");
    }

    #[test]
    fn test_display_rounds_distance() {
        let c = candidate("a", 123.7);
        assert_eq!(c.to_string(), "Stop a (124m)");
    }
}
