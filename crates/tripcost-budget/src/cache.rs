//! Result cache keyed by the pricing-relevant form fields.
//!
//! Entries expire a fixed time after they were written. The cache lives in
//! memory and can be mirrored to a JSON file so results survive between CLI
//! runs. Lookups are explicit: the calculator never consults the cache itself.
//!
//! ```no_run
//! use tripcost_budget::cache::{ResultCache, make_cache_key};
//! use tripcost_core::TripForm;
//!
//! # fn example(result: tripcost_core::CalculationResult) -> tripcost_core::Result<()> {
//! let mut cache = ResultCache::open("/tmp/tripcost-cache.json", 1800)?;
//! let key = make_cache_key(&TripForm::default());
//! if cache.get(&key).is_none() {
//!     cache.put(key, result);
//!     cache.save()?;
//! }
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use tripcost_core::{CalculationResult, DurationMode, IncludeCosts, Overrides, Result, TripError, TripForm, TripType};

use crate::config::{CacheConfig, DEFAULT_CACHE_TTL_SECS};

/// Form fields that affect pricing, with short names to keep keys compact.
#[derive(Debug, Serialize)]
struct CacheKeyFields<'a> {
    o: &'a str,
    d: &'a str,
    tt: TripType,
    m: DurationMode,
    dd: &'a str,
    rd: &'a str,
    ld: u32,
    ln: u32,
    a: u32,
    k: u32,
    ic: &'a IncludeCosts,
    b: f64,
    ov: &'a Overrides,
}

/// Canonical cache key for a form.
///
/// Locations contribute their resolved code, or the raw text while
/// unresolved. The meals preference is not part of the key.
pub fn make_cache_key(form: &TripForm) -> String {
    let fields = CacheKeyFields {
        o: form.origin.primary_code().unwrap_or(&form.origin.display_text),
        d: form.destination.primary_code().unwrap_or(&form.destination.display_text),
        tt: form.trip_type,
        m: form.duration_mode,
        dd: &form.depart_date,
        rd: &form.return_date,
        ld: form.length_days,
        ln: form.length_nights,
        a: form.adults,
        k: form.kids,
        ic: &form.include_costs,
        b: form.buffer_percent,
        ov: &form.overrides,
    };
    serde_json::to_string(&fields).unwrap_or_else(|e| {
        warn!(error = %e, "cache key serialization failed");
        format!("{fields:?}")
    })
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CacheEntry {
    written_at: DateTime<Utc>,
    result: CalculationResult,
}

/// TTL-bound calculation cache.
#[derive(Debug)]
pub struct ResultCache {
    entries: HashMap<String, CacheEntry>,
    ttl: TimeDelta,
    path: Option<PathBuf>,
}

impl Default for ResultCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_TTL_SECS)
    }
}

impl ResultCache {
    /// In-memory cache.
    pub fn new(ttl_secs: u64) -> Self {
        Self {
            entries: HashMap::new(),
            ttl: i64::try_from(ttl_secs)
                .ok()
                .and_then(TimeDelta::try_seconds)
                .unwrap_or(TimeDelta::MAX),
            path: None,
        }
    }

    /// Cache mirrored to `path`, loading any entries already there.
    ///
    /// A missing file starts empty. An unreadable or corrupt file is logged
    /// and replaced on the next save.
    pub fn open(path: impl Into<PathBuf>, ttl_secs: u64) -> Result<Self> {
        let path = path.into();
        let mut cache = Self::new(ttl_secs);
        cache.entries = load_entries(&path)?;
        cache.path = Some(path);
        Ok(cache)
    }

    /// Cache as described by configuration.
    pub fn from_config(config: &CacheConfig) -> Result<Self> {
        Self::open(config.resolved_path()?, config.ttl_secs)
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn ttl(&self) -> TimeDelta {
        self.ttl
    }

    /// Unexpired result for `key`.
    pub fn get(&self, key: &str) -> Option<&CalculationResult> {
        self.get_at(key, Utc::now())
    }

    /// Unexpired result for `key` as of `now`.
    pub fn get_at(&self, key: &str, now: DateTime<Utc>) -> Option<&CalculationResult> {
        let entry = self.entries.get(key)?;
        if now - entry.written_at < self.ttl {
            Some(&entry.result)
        } else {
            debug!(key_len = key.len(), "cache entry expired");
            None
        }
    }

    /// Store a result, replacing any previous entry for `key`.
    pub fn put(&mut self, key: impl Into<String>, result: CalculationResult) {
        self.put_at(key, result, Utc::now());
    }

    pub fn put_at(&mut self, key: impl Into<String>, result: CalculationResult, written_at: DateTime<Utc>) {
        self.entries.insert(key.into(), CacheEntry { written_at, result });
    }

    /// Drop expired entries, returning how many were removed.
    pub fn prune(&mut self) -> usize {
        let now = Utc::now();
        let ttl = self.ttl;
        let before = self.entries.len();
        self.entries.retain(|_, entry| now - entry.written_at < ttl);
        before - self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of stored entries, expired or not.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Write entries to the backing file. No-op for in-memory caches.
    pub fn save(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| TripError::DirectoryCreation {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let json = serde_json::to_string(&self.entries)
            .map_err(|e| TripError::json_parse("serialize result cache", e))?;
        std::fs::write(path, json).map_err(|e| TripError::io("write cache", path, e))?;
        debug!(path = %path.display(), entries = self.entries.len(), "result cache saved");
        Ok(())
    }
}

fn load_entries(path: &Path) -> Result<HashMap<String, CacheEntry>> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(HashMap::new()),
        Err(e) => return Err(TripError::io("read cache", path, e)),
    };

    match serde_json::from_str(&content) {
        Ok(entries) => Ok(entries),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "ignoring corrupt result cache");
            Ok(HashMap::new())
        }
    }
}
