//! # tripcost-pricing
//!
//! Flight and lodging estimates for the tripcost budget estimator.
//!
//! Each cost axis is served by a ranked fallback chain:
//!
//! 1. [`ProxyClient`] - a configured travel pricing proxy
//! 2. [`AmadeusClient`] - Amadeus flight and hotel offers (client credentials)
//! 3. [`HeuristicModel`] - deterministic tariff-table model, always succeeds
//!
//! [`EstimateChain`] asks each tier in order and keeps the first finite,
//! positive total. Tier failures are logged and never returned.
//!
//! ## Example
//!
//! ```no_run
//! use tripcost_pricing::{EstimateChain, FlightQuery, PricingConfig};
//!
//! #[tokio::main]
//! async fn main() -> tripcost_pricing::Result<()> {
//!     let mut config = PricingConfig::default();
//!     config.apply_env_overrides();
//!     let chain = EstimateChain::from_config(&config)?;
//!
//!     let query = FlightQuery {
//!         origin_code: "ORF".into(),
//!         destination_code: "LIS".into(),
//!         depart_date: "2026-10-30".into(),
//!         return_date: "2026-11-06".into(),
//!         adults: 2,
//!         kids: 0,
//!         length_mode: false,
//!         length_days: 7,
//!         distance_miles: Some(3650.0),
//!     };
//!     let estimate = chain.flight_estimate(&query).await;
//!     println!("{:.2} from {}", estimate.total_fare, estimate.source.name);
//!     Ok(())
//! }
//! ```

mod amount;

pub mod amadeus;
pub mod amadeus_types;
pub mod config;
pub mod error;
pub mod heuristic;
pub mod provider;
pub mod proxy;
pub mod query;
pub mod tariffs;

// Re-export main types
pub use amadeus::AmadeusClient;
pub use config::{AmadeusConfig, PricingConfig, ProxyConfig};
pub use error::{PricingError, Result};
pub use heuristic::{HeuristicModel, apply_flight_sanity_floor, road_trip_placeholder};
pub use provider::{EstimateChain, FlightSource, LodgingSource, StaticSource};
pub use proxy::ProxyClient;
pub use query::{FlightQuery, LodgingQuery};
pub use tariffs::{MealRates, Tier, adult_fare_floor, distance_band_factor};
