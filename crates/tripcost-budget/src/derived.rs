//! Network-free recalculation from the last live snapshot.
//!
//! When only trivial inputs change (travelers, buffer, included categories)
//! the last fetched estimates are scaled instead of fetched again. Without a
//! snapshot the heuristic tier stands in.

use chrono::{NaiveDate, Utc};
use tripcost_core::{
    CalculationResult, FlightEstimate, KID_FARE_MULTIPLIER, LiveEstimateBasis, LiveEstimateSnapshot,
    LodgingEstimate, PriceSource, Result, SourceKind, TripForm, TripType,
};
use tripcost_pricing::{HeuristicModel, apply_flight_sanity_floor, road_trip_placeholder};
use tripcost_pricing::heuristic::SMART_ESTIMATE_MODEL;

use crate::calculator::build_budget_from_estimates;
use crate::duration::sample_dates;
use crate::queries::{flight_query, floor_query, lodging_query};
use crate::validation::validate_for_derived;

const DERIVED_DETAIL: &str = "Derived from last fetched pricing";
const DERIVED_SCALED_DETAIL: &str = "Derived from last fetched pricing (scaled per traveler)";
const WAITING_FOR_ROUTE: &str = "Waiting for route selection";
const WAITING_FOR_DESTINATION: &str = "Waiting for destination selection";

/// Recalculate a budget without network I/O.
///
/// `snapshot` and `basis` come from the last live calculation and should
/// only be passed while its route signature still matches the form.
pub fn calculate_trip_budget_derived(
    form: &TripForm,
    snapshot: Option<&LiveEstimateSnapshot>,
    basis: Option<&LiveEstimateBasis>,
    heuristic: &HeuristicModel,
) -> Result<CalculationResult> {
    calculate_trip_budget_derived_on(form, snapshot, basis, heuristic, Utc::now().date_naive())
}

/// Like [`calculate_trip_budget_derived`] with length-mode dates anchored to
/// `today`.
pub fn calculate_trip_budget_derived_on(
    form: &TripForm,
    snapshot: Option<&LiveEstimateSnapshot>,
    basis: Option<&LiveEstimateBasis>,
    heuristic: &HeuristicModel,
    today: NaiveDate,
) -> Result<CalculationResult> {
    let duration = validate_for_derived(form)?;
    let (depart, ret) = sample_dates(form, duration, today);

    let flight = match form.trip_type {
        TripType::Flight => derived_flight(form, duration.days, snapshot, basis, heuristic),
        TripType::RoadTrip => road_trip_placeholder(),
    };
    let lodging = derived_lodging(form, duration.nights, snapshot, heuristic);

    tracing::debug!(
        from_snapshot = snapshot.is_some(),
        scaled = basis.is_some(),
        "derived recalculation"
    );
    Ok(build_budget_from_estimates(form, flight, lodging, duration, &depart, &ret))
}

fn derived_flight(
    form: &TripForm,
    days: u32,
    snapshot: Option<&LiveEstimateSnapshot>,
    basis: Option<&LiveEstimateBasis>,
    heuristic: &HeuristicModel,
) -> FlightEstimate {
    let floor = floor_query(form, days);

    if let Some(snapshot) = snapshot {
        let cached = &snapshot.flight;
        let estimate = match basis {
            Some(basis) => {
                let adult_unit = if basis.adults > 0 {
                    cached.total_adult_fare / f64::from(basis.adults)
                } else {
                    0.0
                };
                let kid_unit = if basis.kids > 0 {
                    cached.total_kid_fare / f64::from(basis.kids)
                } else {
                    adult_unit * KID_FARE_MULTIPLIER
                };
                FlightEstimate::new(
                    adult_unit * f64::from(form.adults),
                    kid_unit * f64::from(form.kids),
                    cached.source.relabel(SourceKind::Heuristic, DERIVED_SCALED_DETAIL),
                )
            }
            None => FlightEstimate {
                source: cached.source.relabel(SourceKind::Heuristic, DERIVED_DETAIL),
                ..cached.clone()
            },
        };
        return apply_flight_sanity_floor(estimate, &floor);
    }

    match flight_query(form, days, "", "") {
        Some(query) => apply_flight_sanity_floor(heuristic.flight(&query), &floor),
        None => FlightEstimate::zero(PriceSource::heuristic(SMART_ESTIMATE_MODEL, WAITING_FOR_ROUTE)),
    }
}

/// Lodging is carried over unscaled; the nightly rate is assumed to hold
/// for a different party size.
fn derived_lodging(
    form: &TripForm,
    nights: u32,
    snapshot: Option<&LiveEstimateSnapshot>,
    heuristic: &HeuristicModel,
) -> LodgingEstimate {
    if let Some(snapshot) = snapshot {
        let cached = &snapshot.lodging;
        return LodgingEstimate {
            source: cached.source.relabel(SourceKind::Heuristic, DERIVED_DETAIL),
            ..cached.clone()
        };
    }

    match lodging_query(form, nights, "", "") {
        Some(query) => heuristic.lodging(&query),
        None => LodgingEstimate::new(
            0.0,
            0.0,
            PriceSource::heuristic(SMART_ESTIMATE_MODEL, WAITING_FOR_DESTINATION),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tripcost_core::{DurationMode, LocationInput, TripError};

    fn snapshot(adult_total: f64, kid_total: f64) -> LiveEstimateSnapshot {
        LiveEstimateSnapshot {
            flight: FlightEstimate::new(adult_total, kid_total, PriceSource::api("Amadeus Flight Offers API", "x")),
            lodging: LodgingEstimate::new(150.0, 900.0, PriceSource::api("Amadeus Hotel Offers API", "y")),
        }
    }

    fn form(adults: u32, kids: u32) -> TripForm {
        TripForm {
            duration_mode: DurationMode::Length,
            length_days: 7,
            length_nights: 6,
            adults,
            kids,
            ..Default::default()
        }
    }

    fn basis(adults: u32, kids: u32) -> LiveEstimateBasis {
        LiveEstimateBasis {
            adults,
            kids,
            days: 7,
            nights: 6,
        }
    }

    #[test]
    fn test_scales_linearly() {
        let snap = snapshot(800.0, 0.0);
        let result =
            calculate_trip_budget_derived(&form(4, 0), Some(&snap), Some(&basis(2, 0)), &HeuristicModel::new())
                .unwrap();
        let flight = &result.estimates.flight;
        assert_eq!(flight.total_fare, 1600.0);
        assert_eq!(flight.source.kind, SourceKind::Heuristic);
        assert_eq!(flight.source.detail, DERIVED_SCALED_DETAIL);
        assert_eq!(flight.source.name, "Amadeus Flight Offers API");
    }

    #[test]
    fn test_kid_unit_fallback() {
        let snap = snapshot(1000.0, 0.0);
        let result =
            calculate_trip_budget_derived(&form(2, 2), Some(&snap), Some(&basis(2, 0)), &HeuristicModel::new())
                .unwrap();
        let flight = &result.estimates.flight;
        assert_eq!(flight.total_adult_fare, 1000.0);
        assert!((flight.total_kid_fare - 2.0 * 500.0 * 0.74).abs() < 1e-9);
    }

    #[test]
    fn test_lodging_carried_unscaled() {
        let snap = snapshot(1000.0, 0.0);
        let result =
            calculate_trip_budget_derived(&form(6, 0), Some(&snap), Some(&basis(2, 0)), &HeuristicModel::new())
                .unwrap();
        let lodging = &result.estimates.lodging;
        assert_eq!(lodging.total_stay_cost, 900.0);
        assert_eq!(lodging.source.kind, SourceKind::Heuristic);
        assert_eq!(lodging.source.detail, DERIVED_DETAIL);
    }

    #[test]
    fn test_snapshot_without_basis() {
        let snap = snapshot(1000.0, 200.0);
        let result = calculate_trip_budget_derived(&form(5, 0), Some(&snap), None, &HeuristicModel::new()).unwrap();
        assert_eq!(result.estimates.flight.total_fare, 1200.0);
        assert_eq!(result.estimates.flight.source.detail, DERIVED_DETAIL);
    }

    #[test]
    fn test_waiting_for_selection() {
        let form = TripForm {
            origin: LocationInput::text("Norfolk"),
            destination: LocationInput::text("Rio"),
            ..form(2, 0)
        };
        let result = calculate_trip_budget_derived(&form, None, None, &HeuristicModel::new()).unwrap();
        assert_eq!(result.estimates.flight.total_fare, 0.0);
        assert_eq!(result.estimates.flight.source.detail, WAITING_FOR_ROUTE);
        assert_eq!(result.estimates.lodging.source.detail, WAITING_FOR_DESTINATION);
    }

    #[test]
    fn test_validates_travelers() {
        let err = calculate_trip_budget_derived(&form(0, 0), None, None, &HeuristicModel::new()).unwrap_err();
        assert!(matches!(err, TripError::NoTravelers { .. }));
    }
}
