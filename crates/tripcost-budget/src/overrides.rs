//! Manual total overrides.
//!
//! A set override replaces the computed category total unconditionally,
//! including when the category is excluded or the computed value is unknown.

use tripcost_core::Overrides;

/// Override if set, else the computed value.
pub fn merge(override_total: Option<f64>, computed: f64) -> f64 {
    override_total.unwrap_or(computed)
}

/// Like [`merge`] for computed values that may be unknown.
pub fn merge_opt(override_total: Option<f64>, computed: Option<f64>) -> Option<f64> {
    override_total.or(computed)
}

/// Active total overrides with their display labels, in display order.
pub fn active_overrides(overrides: &Overrides) -> Vec<(&'static str, f64)> {
    [
        ("Home-airport", overrides.home_airport_total_override),
        ("Long-distance transport", overrides.flights_total_override),
        ("Baggage", overrides.baggage_total_override),
        ("Lodging", overrides.lodging_total_override),
        ("Local transport", overrides.local_transport_total_override),
        ("Food", overrides.food_total_override),
        ("Activities", overrides.activities_total_override),
        ("Misc fees", overrides.misc_fees_total_override),
        ("Insurance", overrides.insurance_total_override),
    ]
    .into_iter()
    .filter_map(|(label, value)| value.map(|v| (label, v)))
    .collect()
}
