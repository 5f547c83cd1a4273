//! Plain-text output.

use tripcost_budget::SessionOutcome;
use tripcost_budget::overrides::active_overrides;
use tripcost_budget::resolver::Suggestion;
use tripcost_core::{CalculationResult, IncludeCategoryTotals, MealsPreferenceEstimate, PriceSource, TripType};

fn money(value: f64) -> String {
    format!("${value:.2}")
}

fn optional_money(value: Option<f64>) -> String {
    value.map(money).unwrap_or_else(|| "needs more details".to_string())
}

fn source_line(label: &str, source: &PriceSource) -> String {
    format!("{label:<9} {} [{}] {}", source.name, source.kind, source.detail)
}

pub fn print_outcome(outcome: &SessionOutcome) {
    print_result(&outcome.result);
    println!();
    println!("Result: {}", outcome.origin);
    if outcome.degraded {
        println!("Some prices are estimates; live pricing was unavailable.");
    }
}

pub fn print_result(result: &CalculationResult) {
    let form = &result.form;
    println!(
        "{} -> {} ({}, {} days / {} nights, {} traveler{})",
        form.origin.code_or_text(),
        form.destination.code_or_text(),
        form.trip_type,
        result.days,
        result.nights,
        result.travelers,
        if result.travelers == 1 { "" } else { "s" },
    );
    println!();

    let b = &result.breakdown;
    for (label, value) in b.lines() {
        let hidden = match form.trip_type {
            TripType::Flight => label == "Road trip transport",
            TripType::RoadTrip => label == "Flights",
        };
        if !hidden {
            println!("  {label:<22} {:>12}", money(value));
        }
    }
    println!("  {:<22} {:>12}", "Subtotal", money(b.subtotal));
    println!("  {:<22} {:>12}", format!("Buffer ({}%)", form.buffer_percent), money(b.buffer));
    println!("  {:<22} {:>12}", "Total", money(b.total));
    println!();
    println!("  Per traveler {}   Per day {}", money(result.per_traveler), money(result.per_day));

    println!();
    println!("{}", source_line("Flights", &result.flight_source));
    println!("{}", source_line("Lodging", &result.lodging_source));

    let overrides = active_overrides(&form.overrides);
    if !overrides.is_empty() {
        println!();
        println!("Manual totals:");
        for (label, value) in overrides {
            println!("  {label}: {}", money(value));
        }
    }

    println!();
    println!("Assumptions:");
    for assumption in &result.assumptions {
        println!("  - {assumption}");
    }

    println!();
    if form.trip_type == TripType::Flight {
        println!("Flights:  {}", result.google_flights_url);
    }
    println!("Hotels:   {}", result.hotels_url);
    println!("Cars:     {}", result.car_rentals_url);
}

pub fn print_preview(totals: &IncludeCategoryTotals, meals: &MealsPreferenceEstimate) {
    let rows = [
        ("Airport access", totals.airport_access),
        ("Baggage fees", totals.baggage_fees),
        ("Lodging", totals.lodging),
        ("Rideshare / taxi", totals.rideshare_taxi),
        ("Rental car", totals.rental_car),
        ("Meals", totals.meals),
        ("Activities", totals.activities),
        ("Travel insurance", totals.travel_insurance),
    ];
    for (label, value) in rows {
        println!("  {label:<18} {:>20}", optional_money(value));
    }

    println!();
    println!(
        "Meals: {}% eating out ({}), {}% cooking in ({})",
        meals.eating_out_percent,
        optional_money(meals.eating_out_total),
        meals.cooking_in_percent,
        optional_money(meals.cooking_in_total),
    );
}

pub fn print_suggestions(suggestions: &[Suggestion]) {
    if suggestions.is_empty() {
        println!("No matching airports or cities.");
        return;
    }
    for suggestion in suggestions {
        let resolved = &suggestion.resolved;
        let alternates = if resolved.alternate_iata.is_empty() {
            String::new()
        } else {
            format!(" (also {})", resolved.alternate_iata.join(", "))
        };
        println!(
            "{:<4} {}{alternates}  [{}]",
            resolved.primary_iata, suggestion.primary_label, suggestion.secondary_label
        );
    }
}
