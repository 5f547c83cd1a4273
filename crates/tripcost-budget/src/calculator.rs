//! Live budget calculation.
//!
//! [`BudgetCalculator::calculate`] validates the form, fetches flight and
//! lodging estimates concurrently through the [`EstimateChain`], and folds
//! them into a [`CalculationResult`] with [`build_budget_from_estimates`].
//! Provider failures never surface here; the chain always falls back to the
//! heuristic tier.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::{debug, info, instrument};
use tripcost_core::{
    CalculationResult, CostBreakdown, FlightEstimate, LiveEstimateSnapshot, LodgingEstimate, Result, TripDuration,
    TripError, TripForm, TripType,
};
use tripcost_pricing::{EstimateChain, HeuristicModel, PricingConfig, road_trip_placeholder};

use crate::assumptions::build_assumptions;
use crate::cache::make_cache_key;
use crate::categories::{
    activities_auto, airport_access_auto, baggage_auto, misc_fees_auto, rental_car_auto, rideshare_taxi_auto,
};
use crate::duration::sample_dates;
use crate::links::{car_rentals_url, google_flights_url, hotels_url};
use crate::meals::meals_total;
use crate::overrides::merge;
use crate::queries::{flight_query, lodging_query};
use crate::road_trip::road_trip_total;
use crate::validation::validate_for_calculation;

/// Orchestrates live pricing for a trip form.
#[derive(Debug, Clone)]
pub struct BudgetCalculator {
    chain: Arc<EstimateChain>,
}

impl BudgetCalculator {
    pub fn new(chain: EstimateChain) -> Self {
        Self {
            chain: Arc::new(chain),
        }
    }

    /// Calculator over the configured proxy and Amadeus tiers.
    pub fn from_config(config: &PricingConfig) -> Result<Self> {
        let chain = EstimateChain::from_config(config).map_err(|e| TripError::ConfigValidation {
            message: e.to_string(),
        })?;
        Ok(Self::new(chain))
    }

    /// Calculator that only uses the heuristic tier.
    pub fn offline() -> Self {
        Self::new(EstimateChain::heuristic_only())
    }

    pub fn chain(&self) -> &EstimateChain {
        &self.chain
    }

    pub fn heuristic(&self) -> &HeuristicModel {
        self.chain.heuristic()
    }

    /// Calculate a full budget with live pricing.
    ///
    /// Fails before any network I/O when the form has no travelers,
    /// unresolved location codes, or no usable duration.
    pub async fn calculate(&self, form: &TripForm) -> Result<CalculationResult> {
        self.calculate_on(form, Utc::now().date_naive()).await
    }

    /// Like [`calculate`](Self::calculate) with length-mode dates anchored
    /// to `today`.
    #[instrument(level = "debug", skip_all, fields(trip_type = %form.trip_type))]
    pub async fn calculate_on(&self, form: &TripForm, today: NaiveDate) -> Result<CalculationResult> {
        let duration = validate_for_calculation(form)?;
        let (depart, ret) = sample_dates(form, duration, today);

        let lodging_query = lodging_query(form, duration.nights, &depart, &ret)
            .ok_or_else(|| TripError::internal("destination code vanished after validation"))?;
        let flight_query = match form.trip_type {
            TripType::Flight => Some(
                flight_query(form, duration.days, &depart, &ret)
                    .ok_or_else(|| TripError::internal("route codes vanished after validation"))?,
            ),
            TripType::RoadTrip => None,
        };

        debug!(
            days = duration.days,
            nights = duration.nights,
            depart = %depart,
            ret = %ret,
            "fetching estimates"
        );

        let lodging_task = {
            let chain = Arc::clone(&self.chain);
            tokio::spawn(async move { chain.lodging_estimate(&lodging_query).await })
        };
        let flight_task = {
            let chain = Arc::clone(&self.chain);
            tokio::spawn(async move {
                match flight_query {
                    Some(query) => chain.flight_estimate(&query).await,
                    None => road_trip_placeholder(),
                }
            })
        };

        let (flight, lodging) = tokio::try_join!(flight_task, lodging_task).map_err(|e| {
            TripError::live_prices_unavailable(format!("estimate task failed: {e}"))
        })?;

        let result = build_budget_from_estimates(form, flight, lodging, duration, &depart, &ret);
        info!(
            total = result.breakdown.total,
            flight_source = %result.flight_source.name,
            lodging_source = %result.lodging_source.name,
            degraded = result.is_degraded(),
            "budget calculated"
        );
        Ok(result)
    }
}

/// Assemble a full result from already-resolved estimates.
///
/// Categories outside the include flags contribute 0, a set total override
/// replaces its category unconditionally, and misc fees always apply.
pub fn build_budget_from_estimates(
    form: &TripForm,
    flight: FlightEstimate,
    lodging: LodgingEstimate,
    duration: TripDuration,
    depart: &str,
    ret: &str,
) -> CalculationResult {
    let TripDuration { days, nights } = duration;
    let manual = &form.overrides;
    let include = &form.include_costs;
    let travelers = form.travelers();
    let flight_trip = form.trip_type == TripType::Flight;

    let gated = |enabled: bool, value: f64| if enabled { value } else { 0.0 };

    let home_airport = merge(
        manual.home_airport_total_override,
        gated(flight_trip && include.airport_access, airport_access_auto(travelers)),
    );
    let flights = if flight_trip {
        merge(manual.flights_total_override, flight.total_fare)
    } else {
        0.0
    };
    let road_trip_transport = if flight_trip {
        0.0
    } else {
        merge(manual.flights_total_override, road_trip_total(form))
    };
    let baggage_fees = merge(
        manual.baggage_total_override,
        gated(flight_trip && include.baggage_fees, baggage_auto(form)),
    );
    let lodging_total = merge(manual.lodging_total_override, gated(include.lodging, lodging.total_stay_cost));
    let local_transportation = merge(
        manual.local_transport_total_override,
        gated(include.rideshare_taxi, rideshare_taxi_auto(nights, travelers))
            + gated(include.rental_car, rental_car_auto(nights, travelers)),
    );
    let food = merge(manual.food_total_override, gated(include.meals, meals_total(form, days)));
    let activities = merge(
        manual.activities_total_override,
        gated(include.activities, activities_auto(form, days)),
    );
    let misc_fees = merge(manual.misc_fees_total_override, misc_fees_auto(form, nights));

    let mut breakdown = CostBreakdown {
        home_airport,
        flights,
        road_trip_transport,
        baggage_fees,
        lodging: lodging_total,
        local_transportation,
        food,
        activities,
        misc_fees,
        ..Default::default()
    };

    let subtotal_no_insurance = breakdown.subtotal_before_insurance();
    breakdown.insurance = merge(
        manual.insurance_total_override,
        gated(
            include.travel_insurance,
            subtotal_no_insurance * manual.insurance_percent / 100.0,
        ),
    );
    breakdown.subtotal = subtotal_no_insurance + breakdown.insurance;
    breakdown.buffer = breakdown.subtotal * form.buffer_percent / 100.0;
    breakdown.total = breakdown.subtotal + breakdown.buffer;

    let per_traveler = breakdown.total / f64::from(travelers.max(1));
    let per_day = breakdown.total / f64::from(days.max(1));

    CalculationResult {
        key: make_cache_key(form),
        form: form.clone(),
        days,
        nights,
        travelers,
        per_traveler,
        per_day,
        breakdown,
        assumptions: build_assumptions(form, &flight.source, &lodging.source),
        flight_source: flight.source.clone(),
        lodging_source: lodging.source.clone(),
        google_flights_url: google_flights_url(form, depart, ret),
        hotels_url: hotels_url(form, depart, ret),
        car_rentals_url: car_rentals_url(form, depart, ret),
        generated_at: Utc::now(),
        estimates: LiveEstimateSnapshot { flight, lodging },
    }
}
