//! Destination tiers and their base rates.
//!
//! Tiers are a coarse proxy for destination cost of living. Codes outside the
//! table are priced as [`Tier::Mid`].

use serde::{Deserialize, Serialize};

/// Destination price bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Budget,
    Mid,
    Premium,
}

/// Known destination codes and their tier.
const DESTINATION_TIERS: &[(&str, Tier)] = &[
    ("BKK", Tier::Budget),
    ("MEX", Tier::Budget),
    ("CUN", Tier::Mid),
    ("LIS", Tier::Mid),
    ("BCN", Tier::Mid),
    ("ROM", Tier::Mid),
    ("LON", Tier::Premium),
    ("NYC", Tier::Premium),
    ("PAR", Tier::Premium),
    ("SFO", Tier::Premium),
    ("SYD", Tier::Premium),
];

/// Daily meal rates for a tier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MealRates {
    /// Eating out, per adult per day
    pub eat_out_adult: f64,
    /// Cooking in, per day for the whole party
    pub cook_in: f64,
}

impl Tier {
    /// Tier for a destination code, case-insensitive; unknown codes are `Mid`.
    pub fn for_code(code: &str) -> Self {
        let code = code.trim();
        DESTINATION_TIERS
            .iter()
            .find(|(known, _)| known.eq_ignore_ascii_case(code))
            .map(|(_, tier)| *tier)
            .unwrap_or(Tier::Mid)
    }

    /// Round-trip adult base fare.
    pub fn flight_base_fare(self) -> f64 {
        match self {
            Tier::Budget => 380.0,
            Tier::Mid => 610.0,
            Tier::Premium => 920.0,
        }
    }

    /// Nightly lodging rate for a double room.
    pub fn nightly_rate(self) -> f64 {
        match self {
            Tier::Budget => 110.0,
            Tier::Mid => 185.0,
            Tier::Premium => 285.0,
        }
    }

    pub fn meal_rates(self) -> MealRates {
        let (eat_out_adult, cook_in) = match self {
            Tier::Budget => (42.0, 20.0),
            Tier::Mid => (58.0, 26.0),
            Tier::Premium => (82.0, 34.0),
        };
        MealRates {
            eat_out_adult,
            cook_in,
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tier::Budget => write!(f, "budget"),
            Tier::Mid => write!(f, "mid"),
            Tier::Premium => write!(f, "premium"),
        }
    }
}

/// Usable distance: `None`, zero, and NaN all mean "unknown".
fn known_distance(distance_miles: Option<f64>) -> Option<f64> {
    distance_miles.filter(|d| d.is_finite() && *d > 0.0)
}

/// Fare multiplier for the route distance band.
pub fn distance_band_factor(distance_miles: Option<f64>) -> f64 {
    match known_distance(distance_miles) {
        Some(d) if d >= 4500.0 => 1.62,
        Some(d) if d >= 3500.0 => 1.45,
        Some(d) if d >= 2500.0 => 1.3,
        Some(d) if d >= 1500.0 => 1.14,
        _ => 1.0,
    }
}

/// Minimum plausible adult round-trip fare for the route distance.
///
/// Zero below 2500 miles or when the distance is unknown.
pub fn adult_fare_floor(distance_miles: Option<f64>) -> f64 {
    match known_distance(distance_miles) {
        Some(d) if d >= 4500.0 => 1200.0,
        Some(d) if d >= 3500.0 => 950.0,
        Some(d) if d >= 2500.0 => 750.0,
        _ => 0.0,
    }
}
