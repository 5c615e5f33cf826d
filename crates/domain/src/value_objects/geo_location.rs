//! Coordinate value object
//!
//! Every pipeline stage trades in these: the geocoder produces one, the
//! stop resolver and the departure scheduler take one as their query point.
//! Instances are immutable once built.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Mean Earth radius in meters, for great-circle distances
const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// A point on Earth in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    latitude: f64,
    longitude: f64,
}

/// A coordinate pair that was refused at construction
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("coordinates out of range: ({latitude}, {longitude})")]
pub struct InvalidCoordinates {
    /// The offered latitude
    pub latitude: f64,
    /// The offered longitude
    pub longitude: f64,
}

fn in_range(value: f64, limit: f64) -> bool {
    value.is_finite() && value.abs() <= limit
}

impl GeoLocation {
    /// Build a location, refusing out-of-range or non-finite degrees
    ///
    /// # Errors
    ///
    /// Latitude outside [-90, 90], longitude outside [-180, 180], and NaN
    /// or infinite values are all rejected.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, InvalidCoordinates> {
        if !in_range(latitude, 90.0) || !in_range(longitude, 180.0) {
            return Err(InvalidCoordinates {
                latitude,
                longitude,
            });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Build a location from values already known to be in range
    #[must_use]
    pub const fn new_unchecked(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Latitude in decimal degrees
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in decimal degrees
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Great-circle distance to `other` in meters, via the haversine formula
    #[must_use]
    pub fn distance_meters(&self, other: &Self) -> f64 {
        let half_dlat = ((other.latitude - self.latitude) / 2.0).to_radians();
        let half_dlon = ((other.longitude - self.longitude) / 2.0).to_radians();
        let cos_product = self.latitude.to_radians().cos() * other.latitude.to_radians().cos();

        let h = cos_product.mul_add(half_dlon.sin().powi(2), half_dlat.sin().powi(2));

        2.0 * EARTH_RADIUS_METERS * h.sqrt().clamp(0.0, 1.0).asin()
    }
}

impl fmt::Display for GeoLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.latitude, self.longitude)
    }
}

/// Reference points in the deployment region
impl GeoLocation {
    /// Downtown Hartford, the default demo origin
    #[must_use]
    pub const fn hartford() -> Self {
        Self::new_unchecked(41.7658, -72.6734)
    }

    /// New Haven Green
    #[must_use]
    pub const fn new_haven() -> Self {
        Self::new_unchecked(41.3083, -72.9279)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors_return_what_was_given() {
        let loc = GeoLocation::new(41.7658, -72.6734).expect("in range");
        assert!((loc.latitude() - 41.7658).abs() < f64::EPSILON);
        assert!((loc.longitude() + 72.6734).abs() < f64::EPSILON);
    }

    #[test]
    fn test_poles_and_antimeridian_are_accepted() {
        assert!(GeoLocation::new(90.0, 180.0).is_ok());
        assert!(GeoLocation::new(-90.0, -180.0).is_ok());
        assert!(GeoLocation::new(0.0, 0.0).is_ok());
    }

    #[test]
    fn test_out_of_range_degrees_are_refused() {
        assert!(GeoLocation::new(90.5, 0.0).is_err());
        assert!(GeoLocation::new(-90.5, 0.0).is_err());
        assert!(GeoLocation::new(0.0, 180.5).is_err());
        assert!(GeoLocation::new(0.0, -180.5).is_err());
    }

    #[test]
    fn test_non_finite_degrees_are_refused() {
        assert!(GeoLocation::new(f64::NAN, 0.0).is_err());
        assert!(GeoLocation::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_error_carries_the_offending_pair() {
        let err = GeoLocation::new(120.0, 7.0).unwrap_err();
        assert!((err.latitude - 120.0).abs() < f64::EPSILON);
        assert!((err.longitude - 7.0).abs() < f64::EPSILON);
        assert!(err.to_string().contains("120"));
    }

    #[test]
    fn test_display_keeps_six_decimals() {
        let loc = GeoLocation::hartford();
        assert_eq!(loc.to_string(), "(41.765800, -72.673400)");
    }

    #[test]
    fn test_distance_to_self_is_zero() {
        let loc = GeoLocation::new_haven();
        assert!(loc.distance_meters(&loc) < 0.001);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let a = GeoLocation::hartford();
        let b = GeoLocation::new_haven();
        assert!((a.distance_meters(&b) - b.distance_meters(&a)).abs() < 0.001);
    }

    #[test]
    fn test_hartford_to_new_haven_is_about_55km() {
        let distance = GeoLocation::hartford().distance_meters(&GeoLocation::new_haven());
        assert!((distance - 55_000.0).abs() < 3_000.0);
    }

    #[test]
    fn test_serde_roundtrip() {
        let loc = GeoLocation::new(41.3083, -72.9279).expect("in range");
        let json = serde_json::to_string(&loc).expect("serialize");
        let back: GeoLocation = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, loc);
    }
}
