//! # tripcost-budget
//!
//! Turns a [`TripForm`](tripcost_core::TripForm) into an itemized trip budget.
//!
//! - [`BudgetCalculator`] - validates, fetches flight and lodging estimates
//!   concurrently, and assembles the breakdown
//! - [`calculate_trip_budget_derived`] - network-free recalculation from the
//!   last live snapshot
//! - [`estimate_include_category_totals`] - per-category preview for the
//!   include toggles
//! - [`ResultCache`] - TTL cache keyed by pricing-relevant form fields
//! - [`TripSession`] - location resolution, caching, and snapshots wired
//!   together
//!
//! ## Example
//!
//! ```no_run
//! use tripcost_budget::{BudgetCalculator, ResultCache, TripSession};
//! use tripcost_core::{LocationInput, TripForm};
//!
//! #[tokio::main]
//! async fn main() -> tripcost_core::Result<()> {
//!     let mut session = TripSession::new(BudgetCalculator::offline(), Some(ResultCache::default()));
//!     let form = TripForm {
//!         origin: LocationInput::text("Norfolk"),
//!         destination: LocationInput::text("Lisbon"),
//!         ..Default::default()
//!     };
//!
//!     let outcome = session.calculate(&form, false).await?;
//!     println!("total {:.2} ({})", outcome.result.breakdown.total, outcome.origin);
//!     Ok(())
//! }
//! ```

pub mod assumptions;
pub mod cache;
pub mod calculator;
pub mod categories;
pub mod config;
pub mod derived;
pub mod duration;
pub mod links;
pub mod meals;
pub mod overrides;
pub mod queries;
pub mod resolver;
pub mod road_trip;
pub mod session;
pub mod snapshot;
pub mod validation;

pub use cache::{ResultCache, make_cache_key};
pub use calculator::{BudgetCalculator, build_budget_from_estimates};
pub use categories::estimate_include_category_totals;
pub use config::{BudgetConfig, CacheConfig};
pub use derived::calculate_trip_budget_derived;
pub use meals::{MealsComponents, estimate_meals_preference};
pub use resolver::{CatalogResolver, LocationResolver};
pub use session::{ResultOrigin, SessionOutcome, TripSession};
pub use snapshot::{SnapshotStore, live_signature};
