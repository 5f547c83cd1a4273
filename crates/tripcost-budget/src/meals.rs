//! Eating-out vs. cooking-in meal blend.
//!
//! The meals preference is the share of meals cooked in. Eating out is priced
//! per traveler; cooking in is a shared kitchen cost for the whole party.

use tripcost_core::{MealsPreferenceEstimate, TripForm};
use tripcost_pricing::Tier;

use crate::duration::trip_duration;

/// Meal totals split by preference.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MealsComponents {
    pub eating_out_total: f64,
    pub cooking_in_total: f64,
    pub total: f64,
}

/// Share of meals cooked in, clamped to `[0, 1]`.
pub fn cooking_in_share(meals_preference: f64) -> f64 {
    if !meals_preference.is_finite() {
        return 0.0;
    }
    (meals_preference / 100.0).clamp(0.0, 1.0)
}

/// Blend meal costs for a stay of `days`.
pub fn meals_components(form: &TripForm, days: u32) -> MealsComponents {
    let rates = Tier::for_code(form.destination.primary_code().unwrap_or_default()).meal_rates();
    let cooking_in = cooking_in_share(form.meals_preference);
    let eating_out = 1.0 - cooking_in;
    let days = f64::from(days);

    let eating_out_total = rates.eat_out_adult * f64::from(form.travelers()) * days * eating_out;
    let cooking_in_total = rates.cook_in * days * cooking_in;

    MealsComponents {
        eating_out_total,
        cooking_in_total,
        total: eating_out_total + cooking_in_total,
    }
}

/// Blended meals total for a stay of `days`.
pub fn meals_total(form: &TripForm, days: u32) -> f64 {
    meals_components(form, days).total
}

/// Percentages and totals for the meals preference control.
///
/// Totals are `None` until the trip length is known.
pub fn estimate_meals_preference(form: &TripForm) -> MealsPreferenceEstimate {
    let cooking_in_percent = if form.meals_preference.is_finite() {
        form.meals_preference.round().clamp(0.0, 100.0) as u32
    } else {
        0
    };
    let eating_out_percent = 100 - cooking_in_percent;

    let components = trip_duration(form).map(|duration| meals_components(form, duration.days));

    MealsPreferenceEstimate {
        eating_out_percent,
        cooking_in_percent,
        eating_out_total: components.map(|c| c.eating_out_total),
        cooking_in_total: components.map(|c| c.cooking_in_total),
        total: components.map(|c| c.total),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tripcost_core::DurationMode;

    fn form(preference: f64) -> TripForm {
        TripForm {
            duration_mode: DurationMode::Length,
            length_days: 7,
            length_nights: 6,
            adults: 2,
            kids: 1,
            meals_preference: preference,
            ..Default::default()
        }
    }

    #[test]
    fn test_shares_sum_to_one() {
        for preference in [0.0, 12.5, 45.0, 99.9, 100.0] {
            let cooking = cooking_in_share(preference);
            assert!((cooking + (1.0 - cooking) - 1.0).abs() < 1e-12);
        }
        assert_eq!(cooking_in_share(-20.0), 0.0);
        assert_eq!(cooking_in_share(250.0), 1.0);
        assert_eq!(cooking_in_share(f64::NAN), 0.0);
    }

    #[test]
    fn test_extremes() {
        // Unresolved destination prices as the mid tier: 58 eat-out, 26 cook-in
        let all_out = meals_components(&form(0.0), 7);
        assert_eq!(all_out.cooking_in_total, 0.0);
        assert_eq!(all_out.eating_out_total, 58.0 * 3.0 * 7.0);

        let all_in = meals_components(&form(100.0), 7);
        assert_eq!(all_in.eating_out_total, 0.0);
        assert_eq!(all_in.cooking_in_total, 26.0 * 7.0);
    }

    #[test]
    fn test_preference_estimate() {
        let estimate = estimate_meals_preference(&form(44.6));
        assert_eq!(estimate.cooking_in_percent, 45);
        assert_eq!(estimate.eating_out_percent, 55);
        let total = estimate.total.unwrap();
        let parts = estimate.eating_out_total.unwrap() + estimate.cooking_in_total.unwrap();
        assert!((total - parts).abs() < 1e-9);
    }

    #[test]
    fn test_preference_estimate_without_duration() {
        let form = TripForm {
            length_days: 0,
            ..form(30.0)
        };
        let estimate = estimate_meals_preference(&form);
        assert_eq!(estimate.cooking_in_percent, 30);
        assert_eq!(estimate.total, None);
        assert_eq!(estimate.eating_out_total, None);
    }
}
