//! Top-level tripcost configuration.
//!
//! Loaded from `~/.tripcost/config.yaml` (or `--config`). Every field has a
//! default, so a missing file or a partial file is fine:
//!
//! ```yaml
//! pricing:
//!   proxy:
//!     base_url: https://pricing.example.com
//!   amadeus:
//!     client_id_env: AMADEUS_CLIENT_ID
//!     client_secret_env: AMADEUS_CLIENT_SECRET
//! cache:
//!   ttl_secs: 1800
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tripcost_core::logging::tripcost_home;
use tripcost_core::{Result, TripError};
use tripcost_pricing::PricingConfig;

/// Default result cache lifetime: 30 minutes.
pub const DEFAULT_CACHE_TTL_SECS: u64 = 30 * 60;

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BudgetConfig {
    /// Live pricing tiers
    pub pricing: PricingConfig,

    /// Result cache
    pub cache: CacheConfig,
}

/// Result cache configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Whether results are cached at all
    pub enabled: bool,

    /// Entry lifetime from write time
    pub ttl_secs: u64,

    /// Persistence file; `None` uses `~/.tripcost/cache.json`
    pub path: Option<PathBuf>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl_secs: DEFAULT_CACHE_TTL_SECS,
            path: None,
        }
    }
}

impl CacheConfig {
    /// Resolved persistence path.
    pub fn resolved_path(&self) -> Result<PathBuf> {
        match &self.path {
            Some(path) => Ok(path.clone()),
            None => Ok(tripcost_home()?.join("cache.json")),
        }
    }
}

impl BudgetConfig {
    /// Default config file location (`~/.tripcost/config.yaml`).
    pub fn default_path() -> Result<PathBuf> {
        Ok(tripcost_home()?.join("config.yaml"))
    }

    /// Load configuration.
    ///
    /// With an explicit `path` the file must exist. Without one, the default
    /// location is used if present and built-in defaults otherwise.
    /// Environment overrides are applied and the result is validated.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_yaml(path)?,
            None => {
                let default = Self::default_path()?;
                if default.exists() {
                    Self::from_yaml(&default)?
                } else {
                    tracing::debug!(path = %default.display(), "no config file, using defaults");
                    Self::default()
                }
            }
        };

        config.pricing.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Parse a YAML config file without env overrides or validation.
    pub fn from_yaml(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                TripError::ConfigNotFound {
                    path: path.to_path_buf(),
                    source: Some(e),
                }
            } else {
                TripError::io("read config", path, e)
            }
        })?;

        serde_yaml::from_str(&content).map_err(|e| TripError::ConfigInvalid {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        self.pricing
            .validate()
            .map_err(|e| TripError::ConfigValidation {
                message: e.to_string(),
            })?;

        if self.cache.enabled && self.cache.ttl_secs == 0 {
            return Err(TripError::ConfigValidation {
                message: "cache.ttl_secs must be greater than zero when the cache is enabled".into(),
            });
        }
        Ok(())
    }
}
