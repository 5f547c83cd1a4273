//! Road-trip distance and driving cost.

use tripcost_core::{Overrides, TripForm, haversine_miles};

/// Round-trip distance assumed when either endpoint has no coordinates.
pub const DEFAULT_ROAD_TRIP_MILES: f64 = 600.0;

/// Roads are this much longer than the great circle.
const DETOUR_FACTOR: f64 = 1.22;

/// One-way great-circle distance between the resolved endpoints.
pub fn route_distance_miles(form: &TripForm) -> Option<f64> {
    let origin = form.origin.geo_point()?;
    let destination = form.destination.geo_point()?;
    Some(haversine_miles(origin, destination))
}

/// Round-trip driving distance: the manual distance if set, else the route
/// distance there and back with detours, else 600 miles.
pub fn road_trip_distance_miles(form: &TripForm) -> f64 {
    form.overrides.road_trip_distance_miles.unwrap_or_else(|| {
        route_distance_miles(form)
            .map(|miles| miles * 2.0 * DETOUR_FACTOR)
            .unwrap_or(DEFAULT_ROAD_TRIP_MILES)
    })
}

/// Fuel, wear, and tolls for driving `distance_miles`.
pub fn road_trip_cost(overrides: &Overrides, distance_miles: f64) -> f64 {
    let fuel = distance_miles / overrides.road_trip_mpg.max(1.0)
        * overrides.road_trip_gas_price_per_gallon.max(0.0);
    let wear = distance_miles * overrides.road_trip_wear_per_mile.max(0.0);
    fuel + wear + overrides.road_trip_tolls_and_parking.max(0.0)
}

/// Road-trip transport cost for the form, before any total override.
pub fn road_trip_total(form: &TripForm) -> f64 {
    road_trip_cost(&form.overrides, road_trip_distance_miles(form))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tripcost_core::{LocationInput, LocationKind, LocationSource, ResolvedLocation, TripType};

    fn city(code: &str, lat: f64, lon: f64) -> LocationInput {
        LocationInput::resolved(ResolvedLocation {
            kind: LocationKind::City,
            label: code.into(),
            city_name: code.into(),
            country: "United States".into(),
            lat,
            lon,
            primary_iata: code.into(),
            alternate_iata: vec![],
            source: LocationSource::Dataset,
        })
    }

    #[test]
    fn test_default_distance_scenario() {
        let form = TripForm {
            trip_type: TripType::RoadTrip,
            ..Default::default()
        };
        assert_eq!(road_trip_distance_miles(&form), 600.0);
        // (600 / 26) * 3.80 + 600 * 0.12 + 45
        assert!((road_trip_total(&form) - 204.69).abs() < 0.01);
    }

    #[test]
    fn test_distance_from_coordinates() {
        let form = TripForm {
            origin: city("ORF", 36.8946, -76.2012),
            destination: city("RIC", 37.5052, -77.3197),
            ..Default::default()
        };
        let one_way = route_distance_miles(&form).unwrap();
        assert!(one_way > 60.0 && one_way < 80.0, "one way {one_way}");
        assert!((road_trip_distance_miles(&form) - one_way * 2.44).abs() < 1e-9);
    }

    #[test]
    fn test_manual_distance_wins() {
        let mut form = TripForm {
            origin: city("ORF", 36.8946, -76.2012),
            destination: city("RIC", 37.5052, -77.3197),
            ..Default::default()
        };
        form.overrides.road_trip_distance_miles = Some(250.0);
        assert_eq!(road_trip_distance_miles(&form), 250.0);
    }

    #[test]
    fn test_cost_clamps_parameters() {
        let overrides = Overrides {
            road_trip_mpg: 0.0,
            road_trip_gas_price_per_gallon: -1.0,
            road_trip_wear_per_mile: -0.5,
            road_trip_tolls_and_parking: -10.0,
            ..Default::default()
        };
        assert_eq!(road_trip_cost(&overrides, 100.0), 0.0);
    }
}
