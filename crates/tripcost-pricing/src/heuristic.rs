//! Offline estimate model.
//!
//! The terminal tier of every chain: pure arithmetic over the tariff tables,
//! so it always produces a positive total for a non-empty party.

use chrono::{Datelike, Utc};
use tripcost_core::{FlightEstimate, KID_FARE_MULTIPLIER, LodgingEstimate, PriceSource};

use crate::query::{FlightQuery, LodgingQuery};
use crate::tariffs::{Tier, adult_fare_floor, distance_band_factor};

/// Provider name for heuristic estimates.
pub const SMART_ESTIMATE_MODEL: &str = "Smart Estimate Model";

/// Provider name for the road-trip transport placeholder.
pub const ROAD_TRIP_COST_MODEL: &str = "Road Trip Cost Model";

const FLIGHT_DETAIL: &str = "Route tier baseline + distance band + seasonality + traveler mix";
const LODGING_DETAIL: &str = "Destination tier + occupancy factor + stay length";
const ROAD_TRIP_DETAIL: &str = "Fuel + wear + tolls/parking estimate from overrides and route distance";
const SANITY_FLOOR_SUFFIX: &str = "; adjusted with route-distance sanity floor";

/// Kids count as this fraction of an adult when sizing rooms.
const KID_OCCUPANCY_WEIGHT: f64 = 0.7;

/// Deterministic flight and lodging model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeuristicModel {
    /// Zero-based month for seasonality; `None` uses the current month
    month0: Option<u32>,
}

impl HeuristicModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pin the seasonal month (0 = January).
    pub fn with_month(mut self, month0: u32) -> Self {
        self.month0 = Some(month0 % 12);
        self
    }

    /// `1 + ((month0 % 6) - 2) * 0.03`, ranging from 0.94 to 1.09.
    pub fn seasonal_factor(&self) -> f64 {
        let month0 = self.month0.unwrap_or_else(|| Utc::now().month0());
        1.0 + (f64::from(month0 % 6) - 2.0) * 0.03
    }

    /// Heuristic round-trip fare for the party.
    pub fn flight(&self, query: &FlightQuery) -> FlightEstimate {
        let tier = Tier::for_code(&query.destination_code);
        let trip_factor = match query.length_days {
            d if d >= 10 => 1.08,
            d if d <= 4 => 0.92,
            _ => 1.0,
        };

        let base = tier.flight_base_fare()
            * trip_factor
            * self.seasonal_factor()
            * distance_band_factor(query.distance_miles);
        let adult_unit = base.max(adult_fare_floor(query.distance_miles));

        FlightEstimate::new(
            adult_unit * f64::from(query.adults),
            adult_unit * KID_FARE_MULTIPLIER * f64::from(query.kids),
            PriceSource::heuristic(SMART_ESTIMATE_MODEL, FLIGHT_DETAIL),
        )
    }

    /// Heuristic lodging cost for the stay.
    pub fn lodging(&self, query: &LodgingQuery) -> LodgingEstimate {
        let tier = Tier::for_code(&query.destination_code);
        let occupancy =
            ((f64::from(query.adults) + f64::from(query.kids) * KID_OCCUPANCY_WEIGHT) / 2.0).max(1.0);
        let nightly = tier.nightly_rate() * occupancy;

        LodgingEstimate::new(
            nightly,
            nightly * f64::from(query.nights),
            PriceSource::heuristic(SMART_ESTIMATE_MODEL, LODGING_DETAIL),
        )
    }
}

/// Zero-fare flight estimate standing in for road-trip transport.
///
/// The real road-trip cost is computed from the overrides when the budget is
/// assembled.
pub fn road_trip_placeholder() -> FlightEstimate {
    FlightEstimate::zero(PriceSource::heuristic(ROAD_TRIP_COST_MODEL, ROAD_TRIP_DETAIL))
}

/// Raise implausibly cheap fares to the route-distance floor.
///
/// When the fare per weighted traveler is under 90% of the floor, adult fares
/// become `floor × adults` and kid fares `floor × 0.74 × kids`.
pub fn apply_flight_sanity_floor(estimate: FlightEstimate, query: &FlightQuery) -> FlightEstimate {
    let floor = adult_fare_floor(query.distance_miles);
    if floor <= 0.0 {
        return estimate;
    }

    let per_weighted_traveler = estimate.total_fare / query.traveler_weight().max(1.0);
    if per_weighted_traveler >= floor * 0.9 {
        return estimate;
    }

    tracing::debug!(
        per_weighted_traveler,
        floor,
        source = %estimate.source.name,
        "flight estimate raised to sanity floor"
    );

    let detail = format!("{}{SANITY_FLOOR_SUFFIX}", estimate.source.detail);
    FlightEstimate::new(
        floor * f64::from(query.adults),
        floor * KID_FARE_MULTIPLIER * f64::from(query.kids),
        estimate.source.relabel(estimate.source.kind, detail),
    )
}
