//! Per-category cost preview.
//!
//! [`estimate_include_category_totals`] gives a figure for every include flag
//! from the form alone, using only the heuristic tier. It backs live feedback
//! while a form is edited, so it never touches the network. The `*_auto`
//! formulas are shared with the full calculator.

use tripcost_core::{IncludeCategoryTotals, TripForm, TripType};
use tripcost_pricing::{HeuristicModel, apply_flight_sanity_floor};

use crate::duration::trip_duration;
use crate::meals::meals_total;
use crate::overrides::{merge, merge_opt};
use crate::queries::{flight_query, lodging_query};
use crate::road_trip::road_trip_total;

/// Getting to and from the home airport.
pub fn airport_access_auto(travelers: u32) -> f64 {
    130.0 + 18.0 * f64::from(travelers)
}

/// Checked bags for the party.
pub fn baggage_auto(form: &TripForm) -> f64 {
    form.overrides.baggage_fee_per_traveler * f64::from(form.travelers())
}

pub fn rideshare_taxi_auto(nights: u32, travelers: u32) -> f64 {
    f64::from(nights) * 28.0 + f64::from(travelers) * 18.0
}

pub fn rental_car_auto(nights: u32, travelers: u32) -> f64 {
    f64::from(nights) * 52.0 + f64::from(travelers) * 16.0
}

/// Daily activity spend, adults and kids at their own rates.
pub fn activities_auto(form: &TripForm, days: u32) -> f64 {
    f64::from(days)
        * (f64::from(form.adults) * form.overrides.activities_adult_per_day
            + f64::from(form.kids) * form.overrides.activities_kid_per_day)
}

/// Flat misc fees plus a nightly component.
pub fn misc_fees_auto(form: &TripForm, nights: u32) -> f64 {
    form.overrides.misc_fees_flat + f64::from(nights) * 12.0
}

/// Preview every category total for the current form.
///
/// Everything is `None` until the trip length is known. Lodging needs a
/// destination code and flight transport needs both codes. Insurance is only
/// computed once every other included category and the transport total are
/// known.
pub fn estimate_include_category_totals(form: &TripForm, heuristic: &HeuristicModel) -> IncludeCategoryTotals {
    let Some(duration) = trip_duration(form) else {
        return IncludeCategoryTotals::default();
    };
    let (days, nights) = (duration.days, duration.nights);
    let travelers = form.travelers();
    let manual = &form.overrides;
    let road_trip = form.trip_type == TripType::RoadTrip;

    let airport_access = if road_trip {
        0.0
    } else {
        merge(manual.home_airport_total_override, airport_access_auto(travelers))
    };
    let baggage_fees = if road_trip {
        0.0
    } else {
        merge(manual.baggage_total_override, baggage_auto(form))
    };
    let rideshare_taxi = merge(manual.local_transport_total_override, rideshare_taxi_auto(nights, travelers));
    let rental_car = merge(manual.local_transport_total_override, rental_car_auto(nights, travelers));
    let meals = merge(manual.food_total_override, meals_total(form, days));
    let activities = merge(manual.activities_total_override, activities_auto(form, days));

    let lodging = merge_opt(
        manual.lodging_total_override,
        lodging_query(form, nights, "", "").map(|query| heuristic.lodging(&query).total_stay_cost),
    );

    let transport = if road_trip {
        Some(merge(manual.flights_total_override, road_trip_total(form)))
    } else {
        merge_opt(
            manual.flights_total_override,
            flight_query(form, days, "", "")
                .map(|query| apply_flight_sanity_floor(heuristic.flight(&query), &query).total_fare),
        )
    };
    let misc_fees = merge(manual.misc_fees_total_override, misc_fees_auto(form, nights));

    let mut totals = IncludeCategoryTotals {
        airport_access: Some(airport_access),
        baggage_fees: Some(baggage_fees),
        lodging,
        rideshare_taxi: Some(rideshare_taxi),
        rental_car: Some(rental_car),
        meals: Some(meals),
        activities: Some(activities),
        travel_insurance: None,
    };

    totals.travel_insurance = match manual.insurance_total_override {
        Some(value) => Some(value),
        None => insurable_subtotal(form, &totals, transport, misc_fees)
            .map(|subtotal| subtotal * manual.insurance_percent / 100.0),
    };

    totals
}

/// Sum of transport, misc fees, and included categories, if all are known.
fn insurable_subtotal(
    form: &TripForm,
    totals: &IncludeCategoryTotals,
    transport: Option<f64>,
    misc_fees: f64,
) -> Option<f64> {
    let include = &form.include_costs;
    let included = [
        (include.airport_access, totals.airport_access),
        (include.baggage_fees, totals.baggage_fees),
        (include.lodging, totals.lodging),
        (include.rideshare_taxi, totals.rideshare_taxi),
        (include.rental_car, totals.rental_car),
        (include.meals, totals.meals),
        (include.activities, totals.activities),
    ];

    let mut subtotal = transport? + misc_fees;
    for (enabled, total) in included {
        if enabled {
            subtotal += total?;
        }
    }
    Some(subtotal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tripcost_core::{DurationMode, IncludeCosts, LocationInput, LocationKind, LocationSource, ResolvedLocation};

    fn airport(code: &str, lat: f64, lon: f64) -> LocationInput {
        LocationInput::resolved(ResolvedLocation {
            kind: LocationKind::Airport,
            label: code.into(),
            city_name: code.into(),
            country: String::new(),
            lat,
            lon,
            primary_iata: code.into(),
            alternate_iata: vec![],
            source: LocationSource::Dataset,
        })
    }

    fn form() -> TripForm {
        TripForm {
            origin: airport("ORF", 36.8946, -76.2012),
            destination: airport("LIS", 38.7742, -9.1342),
            duration_mode: DurationMode::Length,
            length_days: 7,
            length_nights: 6,
            adults: 2,
            kids: 1,
            include_costs: IncludeCosts::all(),
            ..Default::default()
        }
    }

    fn model() -> HeuristicModel {
        HeuristicModel::new().with_month(4)
    }

    #[test]
    fn test_needs_duration() {
        let form = TripForm {
            length_days: 0,
            ..form()
        };
        assert_eq!(estimate_include_category_totals(&form, &model()), IncludeCategoryTotals::default());
    }

    #[test]
    fn test_flat_formulas() {
        let totals = estimate_include_category_totals(&form(), &model());
        assert_eq!(totals.airport_access, Some(130.0 + 18.0 * 3.0));
        assert_eq!(totals.baggage_fees, Some(60.0 * 3.0));
        assert_eq!(totals.rideshare_taxi, Some(6.0 * 28.0 + 3.0 * 18.0));
        assert_eq!(totals.rental_car, Some(6.0 * 52.0 + 3.0 * 16.0));
        assert_eq!(totals.activities, Some(7.0 * (2.0 * 55.0 + 35.0)));
        assert!(totals.lodging.unwrap() > 0.0);
        assert!(totals.travel_insurance.unwrap() > 0.0);
    }

    #[test]
    fn test_road_trip_zeroes_flight_only_categories() {
        let form = TripForm {
            trip_type: TripType::RoadTrip,
            ..form()
        };
        let totals = estimate_include_category_totals(&form, &model());
        assert_eq!(totals.airport_access, Some(0.0));
        assert_eq!(totals.baggage_fees, Some(0.0));
    }

    #[test]
    fn test_local_transport_override_applies_to_both() {
        let mut form = form();
        form.overrides.local_transport_total_override = Some(99.0);
        let totals = estimate_include_category_totals(&form, &model());
        assert_eq!(totals.rideshare_taxi, Some(99.0));
        assert_eq!(totals.rental_car, Some(99.0));
    }

    #[test]
    fn test_insurance_waits_for_lodging() {
        let form = TripForm {
            destination: LocationInput::text("Somewhere"),
            ..form()
        };
        let totals = estimate_include_category_totals(&form, &model());
        assert_eq!(totals.lodging, None);
        assert_eq!(totals.travel_insurance, None);
    }

    #[test]
    fn test_insurance_ignores_excluded_unknowns() {
        let mut form = TripForm {
            trip_type: TripType::RoadTrip,
            destination: LocationInput::text("Somewhere"),
            ..form()
        };
        form.include_costs.lodging = false;
        let totals = estimate_include_category_totals(&form, &model());
        assert_eq!(totals.lodging, None);
        assert!(totals.travel_insurance.is_some());
    }

    #[test]
    fn test_insurance_override() {
        let mut form = form();
        form.destination = LocationInput::text("Somewhere");
        form.overrides.insurance_total_override = Some(75.0);
        let totals = estimate_include_category_totals(&form, &model());
        assert_eq!(totals.travel_insurance, Some(75.0));
    }

    #[test]
    fn test_insurance_percent_of_included() {
        let mut form = TripForm {
            trip_type: TripType::RoadTrip,
            include_costs: IncludeCosts::none(),
            ..form()
        };
        form.overrides.road_trip_distance_miles = Some(600.0);
        let totals = estimate_include_category_totals(&form, &model());
        let expected = (road_trip_total(&form) + 55.0 + 6.0 * 12.0) * 0.05;
        assert!((totals.travel_insurance.unwrap() - expected).abs() < 1e-9);
    }
}
