//! The last live estimates and the route they belong to.
//!
//! A snapshot is only reused while the form's live signature (route, dates,
//! trip type) matches the one it was recorded under.

use serde::Serialize;
use tracing::{debug, warn};
use tripcost_core::{CalculationResult, DurationMode, LiveEstimateBasis, LiveEstimateSnapshot, TripForm, TripType};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SignatureFields<'a> {
    origin: String,
    destination: String,
    trip_type: TripType,
    duration_mode: DurationMode,
    depart_date: &'a str,
    return_date: &'a str,
    length_days: u32,
    length_nights: u32,
}

/// Identity of the route and dates a live fetch was made for.
pub fn live_signature(form: &TripForm) -> String {
    let fields = SignatureFields {
        origin: form.origin.code_or_text(),
        destination: form.destination.code_or_text(),
        trip_type: form.trip_type,
        duration_mode: form.duration_mode,
        depart_date: &form.depart_date,
        return_date: &form.return_date,
        length_days: form.length_days,
        length_nights: form.length_nights,
    };
    serde_json::to_string(&fields).unwrap_or_else(|e| {
        warn!(error = %e, "live signature serialization failed");
        format!("{fields:?}")
    })
}

#[derive(Debug, Clone)]
struct Recorded {
    signature: String,
    snapshot: LiveEstimateSnapshot,
    basis: LiveEstimateBasis,
}

/// Holds at most one snapshot with its basis.
#[derive(Debug, Clone, Default)]
pub struct SnapshotStore {
    recorded: Option<Recorded>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember the estimates behind a live (or cached live) result.
    ///
    /// `form` is the form the result was requested with; its signature gates
    /// later reuse.
    pub fn record(&mut self, form: &TripForm, result: &CalculationResult) {
        let signature = live_signature(form);
        debug!(signature = %signature, "live snapshot recorded");
        self.recorded = Some(Recorded {
            signature,
            snapshot: result.estimates.clone(),
            basis: result.basis(),
        });
    }

    /// Snapshot and basis, if recorded under the form's current signature.
    pub fn lookup(&self, form: &TripForm) -> Option<(&LiveEstimateSnapshot, &LiveEstimateBasis)> {
        let recorded = self.recorded.as_ref()?;
        if recorded.signature == live_signature(form) {
            Some((&recorded.snapshot, &recorded.basis))
        } else {
            None
        }
    }

    pub fn invalidate(&mut self) {
        self.recorded = None;
    }

    pub fn is_empty(&self) -> bool {
        self.recorded.is_none()
    }
}
