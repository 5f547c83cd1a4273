//! # tripcost-core
//!
//! Core types, errors, and utilities for the tripcost budget estimator.
//!
//! This crate provides:
//! - [`TripError`] - Error taxonomy shared by all tripcost crates
//! - [`logging`] - Tracing setup and log file locations
//! - [`types`] - The trip form, estimates, and calculation results
//! - [`geo`] - Great-circle distance
//! - [`dates`] - ISO date helpers
//!
//! ## Example
//!
//! ```no_run
//! use tripcost_core::{TripError, TripForm, logging};
//!
//! fn main() -> tripcost_core::Result<()> {
//!     let _guard = logging::init_logging(None, false)?;
//!
//!     let form = TripForm::default();
//!     if form.travelers() == 0 {
//!         return Err(TripError::NoTravelers { adults: 0, kids: 0 });
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod dates;
pub mod error;
pub mod geo;
pub mod logging;
pub mod types;

// Re-export main types for convenience
pub use error::{LocationField, Result, TripError};
pub use geo::{DistanceUnit, GeoPoint, great_circle_distance, haversine_km, haversine_miles};
pub use logging::{LogGuard, init_logging};
pub use types::{
    CalculationResult, CostBreakdown, DurationMode, FlightEstimate, IncludeCategoryTotals,
    IncludeCosts, KID_FARE_MULTIPLIER, LiveEstimateBasis, LiveEstimateSnapshot, LocationInput,
    LocationKind, LocationSource, LodgingEstimate, MealsPreferenceEstimate, Overrides,
    PriceSource, ResolvedLocation, SourceKind, TripDuration, TripForm, TripType,
};
