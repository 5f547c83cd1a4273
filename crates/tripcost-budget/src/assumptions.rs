//! Human-readable assumptions attached to every result.

use tripcost_core::{PriceSource, TripForm, TripType};

use crate::overrides::active_overrides;

pub fn build_assumptions(form: &TripForm, flight_source: &PriceSource, lodging_source: &PriceSource) -> Vec<String> {
    let overrides = active_overrides(&form.overrides);
    let overrides_line = if overrides.is_empty() {
        "No manual category overrides applied.".to_string()
    } else {
        let list: Vec<String> = overrides
            .iter()
            .map(|(label, value)| format!("{label}: {value}"))
            .collect();
        format!("Manual cost overrides active for {}.", list.join(", "))
    };

    let model_line = match form.trip_type {
        TripType::RoadTrip => {
            let manual = &form.overrides;
            let distance = manual
                .road_trip_distance_miles
                .map(|miles| miles.to_string())
                .unwrap_or_else(|| "auto".to_string());
            format!(
                "Road trip model uses distance ({distance} miles), MPG {}, gas {}/gal, tolls/parking {}.",
                manual.road_trip_mpg, manual.road_trip_gas_price_per_gallon, manual.road_trip_tolls_and_parking
            )
        }
        TripType::Flight => "Flight model uses live API fares when available, then smart estimate fallback.".to_string(),
    };

    vec![
        format!("Trip type: {}.", form.trip_type),
        format!(
            "Adults: {}, kids: {} (kids meal/activity discounts applied).",
            form.adults, form.kids
        ),
        format!(
            "Resolved route: {} -> {}.",
            form.origin.primary_code().unwrap_or("-"),
            form.destination.primary_code().unwrap_or("-")
        ),
        format!("Included costs: {}.", form.include_costs.enabled().join(", ")),
        format!("Flight source: {} ({}).", flight_source.name, flight_source.kind),
        format!("Lodging source: {} ({}).", lodging_source.name, lodging_source.kind),
        overrides_line,
        model_line,
        "Length mode uses sampled median pricing over upcoming months when live API is available.".to_string(),
        format!(
            "Nights set to {} in length mode or derived from exact dates.",
            form.length_nights
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_flight_assumptions() {
        let form = TripForm::default();
        let flight = PriceSource::heuristic("Smart Estimate Model", "x");
        let lodging = PriceSource::api("Amadeus Hotel Offers API", "y");
        let lines = build_assumptions(&form, &flight, &lodging);

        assert_eq!(lines.len(), 10);
        assert_eq!(lines[0], "Trip type: Flight.");
        assert_eq!(lines[1], "Adults: 2, kids: 0 (kids meal/activity discounts applied).");
        assert_eq!(lines[2], "Resolved route: - -> -.");
        assert_eq!(lines[3], "Included costs: lodging, rideshareTaxi, meals.");
        assert_eq!(lines[4], "Flight source: Smart Estimate Model (heuristic).");
        assert_eq!(lines[5], "Lodging source: Amadeus Hotel Offers API (api).");
        assert_eq!(lines[6], "No manual category overrides applied.");
        assert_eq!(lines[9], "Nights set to 6 in length mode or derived from exact dates.");
    }

    #[test]
    fn test_road_trip_and_overrides() {
        let mut form = TripForm {
            trip_type: TripType::RoadTrip,
            ..Default::default()
        };
        form.overrides.food_total_override = Some(300.0);
        form.overrides.misc_fees_total_override = Some(12.5);
        let source = PriceSource::heuristic("Road Trip Cost Model", "x");
        let lines = build_assumptions(&form, &source, &source);

        assert_eq!(lines[0], "Trip type: Road trip.");
        assert_eq!(lines[6], "Manual cost overrides active for Food: 300, Misc fees: 12.5.");
        assert_eq!(
            lines[7],
            "Road trip model uses distance (auto miles), MPG 26, gas 3.8/gal, tolls/parking 45."
        );
    }
}
