//! Pluggable estimate sources and the fallback chain that ranks them.
//!
//! This module defines the [`FlightSource`] and [`LodgingSource`] traits, one
//! per cost axis, and [`EstimateChain`], which asks each configured source in
//! order and accepts the first finite, positive total.
//!
//! ## Implementations
//!
//! - [`ProxyClient`] - Configured travel pricing proxy (see [`proxy`](crate::proxy))
//! - [`AmadeusClient`] - Amadeus flight and hotel offers (see [`amadeus`](crate::amadeus))
//! - [`StaticSource`] - Fixed responses for testing
//!
//! The [`HeuristicModel`] is not a source: the chain owns it as the terminal
//! tier, so estimates never fail.
//!
//! ## Example
//!
//! ```no_run
//! use tripcost_pricing::{EstimateChain, PricingConfig, LodgingQuery};
//!
//! # async fn example() -> tripcost_pricing::Result<()> {
//! let chain = EstimateChain::from_config(&PricingConfig::default())?;
//! let query = LodgingQuery {
//!     destination_code: "LIS".into(),
//!     check_in: "2026-10-30".into(),
//!     check_out: "2026-11-06".into(),
//!     adults: 2,
//!     kids: 0,
//!     nights: 6,
//! };
//! let estimate = chain.lodging_estimate(&query).await;
//! println!("{} via {}", estimate.total_stay_cost, estimate.source.name);
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tracing::{debug, warn};
use tripcost_core::{FlightEstimate, LodgingEstimate, log_price_source};

use crate::amadeus::AmadeusClient;
use crate::config::PricingConfig;
use crate::error::{PricingError, Result};
use crate::heuristic::{HeuristicModel, apply_flight_sanity_floor};
use crate::proxy::ProxyClient;
use crate::query::{FlightQuery, LodgingQuery};

/// A live source of flight estimates.
///
/// Return `Ok(None)` when the source has nothing to offer (unconfigured, no
/// offers) and `Err` for failures. Both make the chain move on.
#[async_trait]
pub trait FlightSource: Send + Sync {
    /// Source name for logging.
    fn name(&self) -> &str;

    async fn flight_estimate(&self, query: &FlightQuery) -> Result<Option<FlightEstimate>>;
}

/// A live source of lodging estimates. Same contract as [`FlightSource`].
#[async_trait]
pub trait LodgingSource: Send + Sync {
    /// Source name for logging.
    fn name(&self) -> &str;

    async fn lodging_estimate(&self, query: &LodgingQuery) -> Result<Option<LodgingEstimate>>;
}

/// Ordered try-chain over estimate sources with a heuristic terminal tier.
#[derive(Clone)]
pub struct EstimateChain {
    flight_sources: Vec<Arc<dyn FlightSource>>,
    lodging_sources: Vec<Arc<dyn LodgingSource>>,
    heuristic: HeuristicModel,
}

impl EstimateChain {
    /// A chain with no live sources.
    pub fn new(heuristic: HeuristicModel) -> Self {
        Self {
            flight_sources: Vec::new(),
            lodging_sources: Vec::new(),
            heuristic,
        }
    }

    /// A chain that only ever uses the heuristic model.
    pub fn heuristic_only() -> Self {
        Self::new(HeuristicModel::default())
    }

    /// Build the proxy → Amadeus → heuristic chain.
    ///
    /// Tiers without configuration stay in the chain and answer `Ok(None)`
    /// without touching the network.
    pub fn from_config(config: &PricingConfig) -> Result<Self> {
        let proxy = Arc::new(ProxyClient::from_config(&config.proxy)?);
        let amadeus = Arc::new(AmadeusClient::from_config(&config.amadeus)?);

        debug!(
            proxy = proxy.is_configured(),
            amadeus = amadeus.has_credentials(),
            "estimate chain configured"
        );

        Ok(Self::heuristic_only()
            .with_flight_source(proxy.clone())
            .with_lodging_source(proxy)
            .with_flight_source(amadeus.clone())
            .with_lodging_source(amadeus))
    }

    /// Append a flight source after the existing ones.
    pub fn with_flight_source(mut self, source: Arc<dyn FlightSource>) -> Self {
        self.flight_sources.push(source);
        self
    }

    /// Append a lodging source after the existing ones.
    pub fn with_lodging_source(mut self, source: Arc<dyn LodgingSource>) -> Self {
        self.lodging_sources.push(source);
        self
    }

    pub fn heuristic(&self) -> &HeuristicModel {
        &self.heuristic
    }

    /// Names of the live flight sources, in order.
    pub fn flight_source_names(&self) -> Vec<&str> {
        self.flight_sources.iter().map(|s| s.name()).collect()
    }

    /// Names of the live lodging sources, in order.
    pub fn lodging_source_names(&self) -> Vec<&str> {
        self.lodging_sources.iter().map(|s| s.name()).collect()
    }

    /// First usable flight estimate, with the route-distance sanity floor
    /// applied whichever tier answered.
    pub async fn flight_estimate(&self, query: &FlightQuery) -> FlightEstimate {
        for source in &self.flight_sources {
            match source.flight_estimate(query).await {
                Ok(Some(estimate)) if estimate.is_usable() => {
                    let estimate = apply_flight_sanity_floor(estimate, query);
                    log_price_source!("flight", estimate.source, total = estimate.total_fare);
                    return estimate;
                }
                Ok(Some(estimate)) => {
                    debug!(source = source.name(), total = estimate.total_fare, "flight estimate not usable");
                }
                Ok(None) => debug!(source = source.name(), "flight source skipped"),
                Err(e) => log_tier_failure("flight", source.name(), &e),
            }
        }

        let estimate = apply_flight_sanity_floor(self.heuristic.flight(query), query);
        log_price_source!("flight", estimate.source, total = estimate.total_fare);
        estimate
    }

    /// First usable lodging estimate.
    pub async fn lodging_estimate(&self, query: &LodgingQuery) -> LodgingEstimate {
        for source in &self.lodging_sources {
            match source.lodging_estimate(query).await {
                Ok(Some(estimate)) if estimate.is_usable() => {
                    log_price_source!("lodging", estimate.source, total = estimate.total_stay_cost);
                    return estimate;
                }
                Ok(Some(estimate)) => {
                    debug!(source = source.name(), total = estimate.total_stay_cost, "lodging estimate not usable");
                }
                Ok(None) => debug!(source = source.name(), "lodging source skipped"),
                Err(e) => log_tier_failure("lodging", source.name(), &e),
            }
        }

        let estimate = self.heuristic.lodging(query);
        log_price_source!("lodging", estimate.source, total = estimate.total_stay_cost);
        estimate
    }
}

impl Default for EstimateChain {
    fn default() -> Self {
        Self::heuristic_only()
    }
}

impl std::fmt::Debug for EstimateChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EstimateChain")
            .field("flight_sources", &self.flight_source_names())
            .field("lodging_sources", &self.lodging_source_names())
            .field("heuristic", &self.heuristic)
            .finish()
    }
}

fn log_tier_failure(axis: &str, source: &str, error: &PricingError) {
    if error.is_network_error() {
        warn!(axis, source, error = %error, "pricing tier unreachable, falling back");
    } else {
        debug!(axis, source, error = %error, "pricing tier failed, falling back");
    }
}

// ============ Static Source (testing) ============

/// Source that returns fixed responses and counts calls.
pub struct StaticSource {
    name: String,
    flight: Option<FlightEstimate>,
    lodging: Option<LodgingEstimate>,
    fail: bool,
    calls: AtomicUsize,
}

impl StaticSource {
    /// A source that has nothing to offer.
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            flight: None,
            lodging: None,
            fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    /// A source whose every call fails.
    pub fn failing(name: impl Into<String>) -> Self {
        Self {
            fail: true,
            ..Self::empty(name)
        }
    }

    pub fn with_flight(mut self, estimate: FlightEstimate) -> Self {
        self.flight = Some(estimate);
        self
    }

    pub fn with_lodging(mut self, estimate: LodgingEstimate) -> Self {
        self.lodging = Some(estimate);
        self
    }

    /// Number of estimate calls received.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn respond<T: Clone>(&self, value: &Option<T>) -> Result<Option<T>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(PricingError::invalid_response("static source", format!("{} failed", self.name)));
        }
        Ok(value.clone())
    }
}

#[async_trait]
impl FlightSource for StaticSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn flight_estimate(&self, _query: &FlightQuery) -> Result<Option<FlightEstimate>> {
        self.respond(&self.flight)
    }
}

#[async_trait]
impl LodgingSource for StaticSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn lodging_estimate(&self, _query: &LodgingQuery) -> Result<Option<LodgingEstimate>> {
        self.respond(&self.lodging)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tripcost_core::{PriceSource, SourceKind};

    fn flight_query(distance: Option<f64>) -> FlightQuery {
        FlightQuery {
            origin_code: "ORF".into(),
            destination_code: "LIS".into(),
            depart_date: "2026-10-30".into(),
            return_date: "2026-11-06".into(),
            adults: 2,
            kids: 0,
            length_mode: false,
            length_days: 7,
            distance_miles: distance,
        }
    }

    fn lodging_query() -> LodgingQuery {
        LodgingQuery {
            destination_code: "LIS".into(),
            check_in: "2026-10-30".into(),
            check_out: "2026-11-06".into(),
            adults: 2,
            kids: 0,
            nights: 6,
        }
    }

    #[tokio::test]
    async fn test_heuristic_only_chain() {
        let chain = EstimateChain::heuristic_only();
        let flight = chain.flight_estimate(&flight_query(None)).await;
        let lodging = chain.lodging_estimate(&lodging_query()).await;

        assert!(flight.is_usable());
        assert!(lodging.is_usable());
        assert_eq!(flight.source.kind, SourceKind::Heuristic);
        assert_eq!(lodging.source.kind, SourceKind::Heuristic);
    }

    #[tokio::test]
    async fn test_first_usable_source_wins() {
        let first = Arc::new(
            StaticSource::empty("first")
                .with_flight(FlightEstimate::new(900.0, 0.0, PriceSource::api("first", "live"))),
        );
        let second = Arc::new(
            StaticSource::empty("second")
                .with_flight(FlightEstimate::new(700.0, 0.0, PriceSource::api("second", "live"))),
        );
        let chain = EstimateChain::heuristic_only()
            .with_flight_source(first.clone())
            .with_flight_source(second.clone());

        let estimate = chain.flight_estimate(&flight_query(None)).await;
        assert_eq!(estimate.source.name, "first");
        assert_eq!(first.calls(), 1);
        assert_eq!(second.calls(), 0, "later tiers are not consulted");
    }

    #[tokio::test]
    async fn test_failures_and_unusable_totals_fall_through() {
        let failing = Arc::new(StaticSource::failing("broken"));
        let zero = Arc::new(
            StaticSource::empty("zero")
                .with_lodging(LodgingEstimate::new(0.0, 0.0, PriceSource::api("zero", "live"))),
        );
        let nan = Arc::new(
            StaticSource::empty("nan")
                .with_lodging(LodgingEstimate::new(f64::NAN, f64::NAN, PriceSource::api("nan", "live"))),
        );
        let chain = EstimateChain::heuristic_only()
            .with_lodging_source(failing.clone())
            .with_lodging_source(zero.clone())
            .with_lodging_source(nan.clone());

        let estimate = chain.lodging_estimate(&lodging_query()).await;
        assert_eq!(estimate.source.kind, SourceKind::Heuristic);
        assert_eq!(failing.calls() + zero.calls() + nan.calls(), 3);
    }

    #[tokio::test]
    async fn test_sanity_floor_applies_to_live_tiers() {
        let cheap = Arc::new(
            StaticSource::empty("cheap")
                .with_flight(FlightEstimate::new(300.0, 0.0, PriceSource::api("cheap", "live"))),
        );
        let chain = EstimateChain::heuristic_only().with_flight_source(cheap);

        let estimate = chain.flight_estimate(&flight_query(Some(3600.0))).await;
        assert_eq!(estimate.total_fare, 1900.0);
        assert_eq!(estimate.source.kind, SourceKind::Api);
        assert!(estimate.source.detail.ends_with("adjusted with route-distance sanity floor"));
    }

    #[test]
    fn test_from_default_config() {
        let chain = EstimateChain::from_config(&PricingConfig::default()).unwrap();
        assert_eq!(chain.flight_source_names(), vec!["pricing proxy", "amadeus"]);
        assert_eq!(chain.lodging_source_names(), vec!["pricing proxy", "amadeus"]);
    }
}
