//! Caller-side calculation flow.
//!
//! A [`TripSession`] resolves locations, consults the result cache, runs the
//! live calculation, and remembers the last live estimates so cheap edits
//! (travelers, buffer, include flags) can be recalculated without network
//! I/O.

use std::sync::Arc;

use tracing::{debug, info, warn};
use tripcost_core::{CalculationResult, LocationField, LocationInput, Result, TripError, TripForm};

use crate::cache::{ResultCache, make_cache_key};
use crate::calculator::BudgetCalculator;
use crate::derived::calculate_trip_budget_derived;
use crate::resolver::{CatalogResolver, LocationResolver};
use crate::snapshot::SnapshotStore;
use crate::validation::{validate_for_calculation, validate_travelers};

/// Where a session result came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultOrigin {
    Cached,
    Live,
}

impl std::fmt::Display for ResultOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cached => write!(f, "cached"),
            Self::Live => write!(f, "live"),
        }
    }
}

/// A calculation result and how it was obtained.
#[derive(Debug, Clone)]
pub struct SessionOutcome {
    pub result: CalculationResult,
    pub origin: ResultOrigin,
    /// Either estimate came from the heuristic tier
    pub degraded: bool,
}

impl SessionOutcome {
    fn new(result: CalculationResult, origin: ResultOrigin) -> Self {
        let degraded = result.is_degraded();
        Self {
            result,
            origin,
            degraded,
        }
    }
}

pub struct TripSession {
    calculator: BudgetCalculator,
    cache: Option<ResultCache>,
    snapshots: SnapshotStore,
    resolver: Arc<dyn LocationResolver>,
}

impl std::fmt::Debug for TripSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TripSession")
            .field("calculator", &self.calculator)
            .field("cache", &self.cache)
            .field("snapshots", &self.snapshots)
            .finish_non_exhaustive()
    }
}

impl TripSession {
    /// Session using the built-in airport catalog. `cache` of `None`
    /// disables result caching.
    pub fn new(calculator: BudgetCalculator, cache: Option<ResultCache>) -> Self {
        Self {
            calculator,
            cache,
            snapshots: SnapshotStore::new(),
            resolver: Arc::new(CatalogResolver::new()),
        }
    }

    pub fn with_resolver(mut self, resolver: Arc<dyn LocationResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn calculator(&self) -> &BudgetCalculator {
        &self.calculator
    }

    pub fn cache(&self) -> Option<&ResultCache> {
        self.cache.as_ref()
    }

    pub fn cache_mut(&mut self) -> Option<&mut ResultCache> {
        self.cache.as_mut()
    }

    pub fn snapshots(&self) -> &SnapshotStore {
        &self.snapshots
    }

    /// Full calculation.
    ///
    /// Unless `force_refresh` is set, an unexpired cached result for the same
    /// pricing inputs is returned instead of fetching. Either way the
    /// result's estimates become the snapshot for [`recalculate`](Self::recalculate).
    pub async fn calculate(&mut self, form: &TripForm, force_refresh: bool) -> Result<SessionOutcome> {
        validate_travelers(form)?;
        let form = self.resolve_locations(form).await?;
        validate_for_calculation(&form)?;

        let key = make_cache_key(&form);
        if !force_refresh
            && let Some(cache) = &self.cache
            && let Some(hit) = cache.get(&key)
        {
            let result = hit.clone();
            info!(total = result.breakdown.total, "serving cached budget");
            self.snapshots.record(&form, &result);
            return Ok(SessionOutcome::new(result, ResultOrigin::Cached));
        }

        let result = self.calculator.calculate(&form).await?;

        if let Some(cache) = &mut self.cache {
            cache.put(key, result.clone());
            if let Err(e) = cache.save() {
                warn!(error = %e, "failed to persist result cache");
            }
        }
        self.snapshots.record(&form, &result);
        Ok(SessionOutcome::new(result, ResultOrigin::Live))
    }

    /// Network-free recalculation.
    ///
    /// `form` should carry resolved locations (for example the `form` of a
    /// previous result). The stored snapshot is only used while the route
    /// and dates still match it; otherwise the heuristic tier stands in.
    pub fn recalculate(&self, form: &TripForm) -> Result<CalculationResult> {
        let recorded = self.snapshots.lookup(form);
        debug!(snapshot_hit = recorded.is_some(), "recalculating from snapshot");
        let (snapshot, basis) = recorded.unzip();
        calculate_trip_budget_derived(form, snapshot, basis, self.calculator.heuristic())
    }

    async fn resolve_locations(&self, form: &TripForm) -> Result<TripForm> {
        let mut resolved = form.clone();
        resolved.origin = self.resolve_field(&form.origin, LocationField::Origin).await?;
        resolved.destination = self.resolve_field(&form.destination, LocationField::Destination).await?;
        Ok(resolved)
    }

    /// Blank input is left for validation to report as a missing code.
    async fn resolve_field(&self, input: &LocationInput, field: LocationField) -> Result<LocationInput> {
        if input.primary_code().is_some() || input.display_text.trim().is_empty() {
            return Ok(input.clone());
        }
        self.resolver
            .resolve(input)
            .await
            .ok_or_else(|| TripError::unresolved(field, input.display_text.trim()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tripcost_core::{DurationMode, SourceKind};

    fn form(origin: &str, destination: &str) -> TripForm {
        TripForm {
            origin: LocationInput::text(origin),
            destination: LocationInput::text(destination),
            duration_mode: DurationMode::Length,
            length_days: 5,
            length_nights: 4,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_unresolved_destination() {
        let mut session = TripSession::new(BudgetCalculator::offline(), None);
        let err = session.calculate(&form("Norfolk", "qqxzv 9999"), false).await.unwrap_err();
        match err {
            TripError::UnresolvedLocation { field, input } => {
                assert_eq!(field, LocationField::Destination);
                assert_eq!(input, "qqxzv 9999");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_zero_travelers_rejected_before_resolving() {
        let mut session = TripSession::new(BudgetCalculator::offline(), None);
        let mut trip = form("Norfolk", "qqxzv 9999");
        trip.adults = 0;
        trip.kids = 0;
        let err = session.calculate(&trip, false).await.unwrap_err();
        assert!(matches!(err, TripError::NoTravelers { adults: 0, kids: 0 }));
    }

    #[tokio::test]
    async fn test_blank_location_is_missing_code() {
        let mut session = TripSession::new(BudgetCalculator::offline(), None);
        let err = session.calculate(&form("", "Lisbon"), false).await.unwrap_err();
        assert!(matches!(err, TripError::MissingLocationCodes { origin: true, destination: false }));
    }

    #[tokio::test]
    async fn test_cache_hit_on_second_call() {
        let mut session = TripSession::new(BudgetCalculator::offline(), Some(ResultCache::new(600)));
        let first = session.calculate(&form("Norfolk", "Lisbon"), false).await.unwrap();
        assert_eq!(first.origin, ResultOrigin::Live);
        assert!(first.degraded);
        assert_eq!(first.result.form.destination.primary_code(), Some("LIS"));

        let second = session.calculate(&form("Norfolk", "Lisbon"), false).await.unwrap();
        assert_eq!(second.origin, ResultOrigin::Cached);
        assert_eq!(second.result.breakdown.total, first.result.breakdown.total);

        let forced = session.calculate(&form("Norfolk", "Lisbon"), true).await.unwrap();
        assert_eq!(forced.origin, ResultOrigin::Live);
    }

    #[tokio::test]
    async fn test_recalculate_uses_snapshot() {
        let mut session = TripSession::new(BudgetCalculator::offline(), None);
        let outcome = session.calculate(&form("Norfolk", "Lisbon"), false).await.unwrap();

        let mut edited = outcome.result.form.clone();
        edited.buffer_percent = 0.0;
        let derived = session.recalculate(&edited).unwrap();
        assert_eq!(derived.estimates.flight.total_fare, outcome.result.estimates.flight.total_fare);
        assert_eq!(derived.flight_source.kind, SourceKind::Heuristic);
        assert!(derived.flight_source.detail.starts_with("Derived from last fetched pricing"));
        assert!(derived.breakdown.total < outcome.result.breakdown.total);
    }
}
