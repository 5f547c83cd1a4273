//! Shared type definitions used across tripcost crates.
//!
//! Everything here serializes with camelCase field names: that is the shape
//! of form files, cache entries, and the pricing-proxy wire format.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::dates::{add_days, format_date};
use crate::geo::GeoPoint;

/// Kid fares are priced at this fraction of the adult unit rate.
pub const KID_FARE_MULTIPLIER: f64 = 0.74;

// =============================================================================
// Trip form
// =============================================================================

/// How the traveler gets to the destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TripType {
    #[default]
    Flight,
    RoadTrip,
}

impl std::fmt::Display for TripType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Flight => write!(f, "Flight"),
            Self::RoadTrip => write!(f, "Road trip"),
        }
    }
}

/// How the trip duration is described.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DurationMode {
    /// Concrete depart/return dates
    #[default]
    Exact,
    /// A number of days/nights with no fixed dates
    Length,
}

/// Whether a resolved location is a single airport or a city/metro area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationKind {
    Airport,
    City,
}

/// Where a resolved location came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationSource {
    Dataset,
    Geocode,
}

/// A place the pricing engine can work with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedLocation {
    #[serde(rename = "type")]
    pub kind: LocationKind,
    pub label: String,
    pub city_name: String,
    pub country: String,
    pub lat: f64,
    pub lon: f64,
    pub primary_iata: String,
    #[serde(default)]
    pub alternate_iata: Vec<String>,
    pub source: LocationSource,
}

impl ResolvedLocation {
    /// Coordinates, if this location was geocoded.
    ///
    /// Zero or non-finite coordinates mean "no coordinates".
    pub fn geo_point(&self) -> Option<GeoPoint> {
        let usable = |v: f64| v.is_finite() && v != 0.0;
        (usable(self.lat) && usable(self.lon)).then(|| GeoPoint::new(self.lat, self.lon))
    }
}

/// A location field as typed by the user, plus its resolution if any.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct LocationInput {
    pub display_text: String,
    #[serde(default)]
    pub resolved: Option<ResolvedLocation>,
}

impl LocationInput {
    /// Unresolved free-text input.
    pub fn text(display_text: impl Into<String>) -> Self {
        Self {
            display_text: display_text.into(),
            resolved: None,
        }
    }

    /// Input that is already resolved.
    pub fn resolved(location: ResolvedLocation) -> Self {
        Self {
            display_text: location.label.clone(),
            resolved: Some(location),
        }
    }

    /// The primary airport code, the sole gate for "a usable location".
    pub fn primary_code(&self) -> Option<&str> {
        self.resolved
            .as_ref()
            .map(|r| r.primary_iata.as_str())
            .filter(|code| !code.is_empty())
    }

    /// Resolved code, falling back to the trimmed display text.
    pub fn code_or_text(&self) -> String {
        self.primary_code()
            .map(str::to_string)
            .unwrap_or_else(|| self.display_text.trim().to_string())
    }

    /// City name for search links, falling back to the display text.
    pub fn city_or_text(&self) -> &str {
        self.resolved
            .as_ref()
            .map(|r| r.city_name.as_str())
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.display_text)
    }

    pub fn geo_point(&self) -> Option<GeoPoint> {
        self.resolved.as_ref().and_then(ResolvedLocation::geo_point)
    }
}

/// Per-category include flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IncludeCosts {
    pub airport_access: bool,
    pub baggage_fees: bool,
    pub lodging: bool,
    pub rideshare_taxi: bool,
    pub rental_car: bool,
    pub meals: bool,
    pub activities: bool,
    pub travel_insurance: bool,
}

impl Default for IncludeCosts {
    fn default() -> Self {
        Self {
            airport_access: false,
            baggage_fees: false,
            lodging: true,
            rideshare_taxi: true,
            rental_car: false,
            meals: true,
            activities: false,
            travel_insurance: false,
        }
    }
}

impl IncludeCosts {
    /// Nothing included.
    pub fn none() -> Self {
        Self {
            airport_access: false,
            baggage_fees: false,
            lodging: false,
            rideshare_taxi: false,
            rental_car: false,
            meals: false,
            activities: false,
            travel_insurance: false,
        }
    }

    /// Everything included.
    pub fn all() -> Self {
        Self {
            airport_access: true,
            baggage_fees: true,
            lodging: true,
            rideshare_taxi: true,
            rental_car: true,
            meals: true,
            activities: true,
            travel_insurance: true,
        }
    }

    /// Flags paired with their wire names, in canonical order.
    pub fn entries(&self) -> [(&'static str, bool); 8] {
        [
            ("airportAccess", self.airport_access),
            ("baggageFees", self.baggage_fees),
            ("lodging", self.lodging),
            ("rideshareTaxi", self.rideshare_taxi),
            ("rentalCar", self.rental_car),
            ("meals", self.meals),
            ("activities", self.activities),
            ("travelInsurance", self.travel_insurance),
        ]
    }

    /// Wire names of the enabled categories.
    pub fn enabled(&self) -> Vec<&'static str> {
        self.entries()
            .into_iter()
            .filter_map(|(name, on)| on.then_some(name))
            .collect()
    }

    /// Set a flag by wire name or a short alias. Returns false for unknown names.
    pub fn set(&mut self, name: &str, value: bool) -> bool {
        let slot = match name.trim().to_ascii_lowercase().replace(['-', '_'], "").as_str() {
            "airportaccess" | "airport" => &mut self.airport_access,
            "baggagefees" | "baggage" => &mut self.baggage_fees,
            "lodging" | "hotel" => &mut self.lodging,
            "ridesharetaxi" | "rideshare" | "taxi" => &mut self.rideshare_taxi,
            "rentalcar" | "rental" => &mut self.rental_car,
            "meals" | "food" => &mut self.meals,
            "activities" => &mut self.activities,
            "travelinsurance" | "insurance" => &mut self.travel_insurance,
            _ => return false,
        };
        *slot = value;
        true
    }
}

/// Manual rates and totals. `None` totals mean "use the computed value".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Overrides {
    pub hotel_nightly: f64,
    pub meal_adult_per_day: f64,
    pub meal_kid_per_day: f64,
    pub activities_adult_per_day: f64,
    pub activities_kid_per_day: f64,
    pub insurance_percent: f64,
    pub baggage_fee_per_traveler: f64,
    pub airport_food_per_traveler_travel_day: f64,
    pub misc_fees_flat: f64,
    pub home_airport_total_override: Option<f64>,
    pub flights_total_override: Option<f64>,
    pub baggage_total_override: Option<f64>,
    pub lodging_total_override: Option<f64>,
    pub local_transport_total_override: Option<f64>,
    pub food_total_override: Option<f64>,
    pub activities_total_override: Option<f64>,
    pub misc_fees_total_override: Option<f64>,
    pub insurance_total_override: Option<f64>,
    pub road_trip_distance_miles: Option<f64>,
    pub road_trip_mpg: f64,
    pub road_trip_gas_price_per_gallon: f64,
    pub road_trip_tolls_and_parking: f64,
    pub road_trip_wear_per_mile: f64,
}

impl Default for Overrides {
    fn default() -> Self {
        Self {
            hotel_nightly: 210.0,
            meal_adult_per_day: 62.0,
            meal_kid_per_day: 42.0,
            activities_adult_per_day: 55.0,
            activities_kid_per_day: 35.0,
            insurance_percent: 5.0,
            baggage_fee_per_traveler: 60.0,
            airport_food_per_traveler_travel_day: 24.0,
            misc_fees_flat: 55.0,
            home_airport_total_override: None,
            flights_total_override: None,
            baggage_total_override: None,
            lodging_total_override: None,
            local_transport_total_override: None,
            food_total_override: None,
            activities_total_override: None,
            misc_fees_total_override: None,
            insurance_total_override: None,
            road_trip_distance_miles: None,
            road_trip_mpg: 26.0,
            road_trip_gas_price_per_gallon: 3.8,
            road_trip_tolls_and_parking: 45.0,
            road_trip_wear_per_mile: 0.12,
        }
    }
}

/// The full trip request as edited by the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TripForm {
    pub origin: LocationInput,
    pub destination: LocationInput,
    pub trip_type: TripType,
    pub duration_mode: DurationMode,
    pub depart_date: String,
    pub return_date: String,
    pub length_days: u32,
    pub length_nights: u32,
    pub adults: u32,
    pub kids: u32,
    /// Share of meals cooked in, 0 (always eat out) to 100 (always cook)
    pub meals_preference: f64,
    pub include_costs: IncludeCosts,
    pub buffer_percent: f64,
    pub overrides: Overrides,
}

impl Default for TripForm {
    fn default() -> Self {
        let today = Utc::now().date_naive();
        let depart = add_days(today, 14);
        let ret = add_days(depart, 7);

        Self {
            origin: LocationInput::default(),
            destination: LocationInput::default(),
            trip_type: TripType::Flight,
            duration_mode: DurationMode::Exact,
            depart_date: format_date(depart),
            return_date: format_date(ret),
            length_days: 7,
            length_nights: 6,
            adults: 2,
            kids: 0,
            meals_preference: 45.0,
            include_costs: IncludeCosts::default(),
            buffer_percent: 12.0,
            overrides: Overrides::default(),
        }
    }
}

impl TripForm {
    /// Total headcount, saturating at `u32::MAX`.
    pub fn travelers(&self) -> u32 {
        self.adults.saturating_add(self.kids)
    }
}

// =============================================================================
// Pricing
// =============================================================================

/// Confidence class of a price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Live pricing from a proxy or third-party API
    Api,
    /// Deterministic offline estimate (degraded confidence)
    Heuristic,
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Api => write!(f, "api"),
            Self::Heuristic => write!(f, "heuristic"),
        }
    }
}

/// Where an estimate came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceSource {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: SourceKind,
    pub detail: String,
    pub updated_at: DateTime<Utc>,
}

impl PriceSource {
    pub fn api(name: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: SourceKind::Api,
            detail: detail.into(),
            updated_at: Utc::now(),
        }
    }

    pub fn heuristic(name: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: SourceKind::Heuristic,
            detail: detail.into(),
            updated_at: Utc::now(),
        }
    }

    pub fn is_heuristic(&self) -> bool {
        self.kind == SourceKind::Heuristic
    }

    /// Same provider name, relabelled with a new kind and detail.
    pub fn relabel(&self, kind: SourceKind, detail: impl Into<String>) -> Self {
        Self {
            name: self.name.clone(),
            kind,
            detail: detail.into(),
            updated_at: Utc::now(),
        }
    }
}

/// Round-trip fare estimate for the whole party.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightEstimate {
    pub total_adult_fare: f64,
    pub total_kid_fare: f64,
    pub total_fare: f64,
    pub source: PriceSource,
}

impl FlightEstimate {
    /// Build an estimate whose total is the sum of the adult and kid fares.
    pub fn new(total_adult_fare: f64, total_kid_fare: f64, source: PriceSource) -> Self {
        Self {
            total_adult_fare,
            total_kid_fare,
            total_fare: total_adult_fare + total_kid_fare,
            source,
        }
    }

    /// A zero-cost estimate, used as a placeholder for road trips.
    pub fn zero(source: PriceSource) -> Self {
        Self::new(0.0, 0.0, source)
    }

    /// True when the total is a finite positive number.
    pub fn is_usable(&self) -> bool {
        self.total_fare.is_finite() && self.total_fare > 0.0
    }
}

/// Lodging estimate for the stay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LodgingEstimate {
    pub nightly_rate: f64,
    pub total_stay_cost: f64,
    pub source: PriceSource,
}

impl LodgingEstimate {
    pub fn new(nightly_rate: f64, total_stay_cost: f64, source: PriceSource) -> Self {
        Self {
            nightly_rate,
            total_stay_cost,
            source,
        }
    }

    /// True when the total is a finite positive number.
    pub fn is_usable(&self) -> bool {
        self.total_stay_cost.is_finite() && self.total_stay_cost > 0.0
    }
}

// =============================================================================
// Results
// =============================================================================

/// Resolved trip length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripDuration {
    pub days: u32,
    pub nights: u32,
}

/// One amount per cost category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdown {
    pub home_airport: f64,
    pub flights: f64,
    pub road_trip_transport: f64,
    pub baggage_fees: f64,
    pub lodging: f64,
    pub local_transportation: f64,
    pub food: f64,
    pub activities: f64,
    pub misc_fees: f64,
    pub insurance: f64,
    pub subtotal: f64,
    pub buffer: f64,
    pub total: f64,
}

impl CostBreakdown {
    /// Sum of every category except insurance.
    pub fn subtotal_before_insurance(&self) -> f64 {
        self.home_airport
            + self.flights
            + self.road_trip_transport
            + self.baggage_fees
            + self.lodging
            + self.local_transportation
            + self.food
            + self.activities
            + self.misc_fees
    }

    /// Category lines paired with display labels, in display order.
    pub fn lines(&self) -> [(&'static str, f64); 10] {
        [
            ("Home airport", self.home_airport),
            ("Flights", self.flights),
            ("Road trip transport", self.road_trip_transport),
            ("Baggage fees", self.baggage_fees),
            ("Lodging", self.lodging),
            ("Local transportation", self.local_transportation),
            ("Food", self.food),
            ("Activities", self.activities),
            ("Misc fees", self.misc_fees),
            ("Insurance", self.insurance),
        ]
    }
}

/// The estimates a live calculation fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveEstimateSnapshot {
    pub flight: FlightEstimate,
    pub lodging: LodgingEstimate,
}

/// Traveler and day counts that produced a [`LiveEstimateSnapshot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveEstimateBasis {
    pub adults: u32,
    pub kids: u32,
    pub days: u32,
    pub nights: u32,
}

/// A complete budget calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    pub key: String,
    pub form: TripForm,
    pub days: u32,
    pub nights: u32,
    pub travelers: u32,
    pub per_traveler: f64,
    pub per_day: f64,
    pub breakdown: CostBreakdown,
    pub assumptions: Vec<String>,
    pub flight_source: PriceSource,
    pub lodging_source: PriceSource,
    pub google_flights_url: String,
    pub hotels_url: String,
    pub car_rentals_url: String,
    pub generated_at: DateTime<Utc>,
    pub estimates: LiveEstimateSnapshot,
}

impl CalculationResult {
    /// Basis for scaling this result's estimates later.
    pub fn basis(&self) -> LiveEstimateBasis {
        LiveEstimateBasis {
            adults: self.form.adults,
            kids: self.form.kids,
            days: self.days,
            nights: self.nights,
        }
    }

    /// True when either major estimate came from a heuristic.
    pub fn is_degraded(&self) -> bool {
        self.flight_source.is_heuristic() || self.lodging_source.is_heuristic()
    }
}

/// Live per-category preview; `None` means "needs more details".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct IncludeCategoryTotals {
    pub airport_access: Option<f64>,
    pub baggage_fees: Option<f64>,
    pub lodging: Option<f64>,
    pub rideshare_taxi: Option<f64>,
    pub rental_car: Option<f64>,
    pub meals: Option<f64>,
    pub activities: Option<f64>,
    pub travel_insurance: Option<f64>,
}

/// Eating-out vs. cooking-in split of the meals budget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealsPreferenceEstimate {
    pub eating_out_percent: u32,
    pub cooking_in_percent: u32,
    pub eating_out_total: Option<f64>,
    pub cooking_in_total: Option<f64>,
    pub total: Option<f64>,
}
