//! Great-circle distance between coordinates.
//!
//! Miles are used for road-trip mileage and flight distance banding,
//! kilometres for nearest-airport lookups. NaN coordinates propagate as NaN;
//! callers must guard.

use serde::{Deserialize, Serialize};

/// Mean Earth radius in statute miles.
pub const EARTH_RADIUS_MILES: f64 = 3958.8;

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A (latitude, longitude) pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Unit for [`great_circle_distance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistanceUnit {
    Miles,
    Kilometers,
}

impl DistanceUnit {
    fn earth_radius(self) -> f64 {
        match self {
            Self::Miles => EARTH_RADIUS_MILES,
            Self::Kilometers => EARTH_RADIUS_KM,
        }
    }
}

/// Haversine distance between two points in the requested unit.
pub fn great_circle_distance(a: GeoPoint, b: GeoPoint, unit: DistanceUnit) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    unit.earth_radius() * 2.0 * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Haversine distance in miles.
pub fn haversine_miles(a: GeoPoint, b: GeoPoint) -> f64 {
    great_circle_distance(a, b, DistanceUnit::Miles)
}

/// Haversine distance in kilometres.
pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    great_circle_distance(a, b, DistanceUnit::Kilometers)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORF: GeoPoint = GeoPoint { lat: 36.8529, lon: -75.978 };
    const RIO: GeoPoint = GeoPoint { lat: -22.9068, lon: -43.1729 };

    #[test]
    fn test_zero_distance() {
        assert_eq!(haversine_miles(ORF, ORF), 0.0);
    }

    #[test]
    fn test_virginia_beach_to_rio() {
        let miles = haversine_miles(ORF, RIO);
        // Roughly 4,700 statute miles
        assert!(miles > 4600.0 && miles < 4800.0, "got {miles}");
        assert!(miles >= 4500.0, "should fall into the longest distance band");
    }

    #[test]
    fn test_units_are_consistent() {
        let miles = haversine_miles(ORF, RIO);
        let km = haversine_km(ORF, RIO);
        let ratio = km / miles;
        assert!((ratio - EARTH_RADIUS_KM / EARTH_RADIUS_MILES).abs() < 1e-9);
    }

    #[test]
    fn test_symmetric() {
        assert!((haversine_km(ORF, RIO) - haversine_km(RIO, ORF)).abs() < 1e-9);
    }

    #[test]
    fn test_nan_propagates() {
        let bad = GeoPoint::new(f64::NAN, 0.0);
        assert!(haversine_miles(bad, ORF).is_nan());
    }
}
