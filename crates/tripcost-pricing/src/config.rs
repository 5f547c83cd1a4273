//! Configuration for the live pricing tiers.

use serde::{Deserialize, Serialize};

use crate::error::{PricingError, Result};

/// Environment variable that overrides [`ProxyConfig::base_url`].
pub const PROXY_BASE_URL_ENV: &str = "TRIPCOST_PROXY_BASE_URL";

/// Default Amadeus self-service endpoint.
pub const AMADEUS_TEST_BASE_URL: &str = "https://test.api.amadeus.com";

/// Pricing configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    /// Pricing-proxy tier
    pub proxy: ProxyConfig,

    /// Direct Amadeus tier
    pub amadeus: AmadeusConfig,
}

impl PricingConfig {
    /// Apply environment variable overrides.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var(PROXY_BASE_URL_ENV)
            && !url.trim().is_empty()
        {
            tracing::debug!(url = %url, "proxy base URL overridden from environment");
            self.proxy.base_url = Some(url.trim().to_string());
        }
    }

    /// Validate endpoint URLs and timeouts.
    pub fn validate(&self) -> Result<()> {
        if let Some(url) = &self.proxy.base_url {
            validate_url("pricing.proxy.base_url", url)?;
        }
        validate_url("pricing.amadeus.base_url", &self.amadeus.base_url)?;

        if self.proxy.timeout_secs == 0 {
            return Err(PricingError::Config(
                "pricing.proxy.timeout_secs must be greater than zero".into(),
            ));
        }
        if self.amadeus.timeout_secs == 0 {
            return Err(PricingError::Config(
                "pricing.amadeus.timeout_secs must be greater than zero".into(),
            ));
        }
        Ok(())
    }

    /// Set the proxy base URL.
    pub fn with_proxy(mut self, base_url: impl Into<String>) -> Self {
        self.proxy.base_url = Some(base_url.into());
        self
    }
}

fn validate_url(field: &str, url: &str) -> Result<()> {
    let parsed = reqwest::Url::parse(url)
        .map_err(|e| PricingError::Config(format!("{field} is not a valid URL ({url}): {e}")))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(PricingError::Config(format!(
            "{field} must use http or https, got '{}'",
            parsed.scheme()
        )));
    }
    Ok(())
}

/// Pricing-proxy configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxyConfig {
    /// Proxy base URL; the tier is skipped when unset
    pub base_url: Option<String>,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_secs: 10,
        }
    }
}

impl ProxyConfig {
    /// Full URL for an estimate path, or `None` if no proxy is configured.
    pub fn endpoint(&self, path: &str) -> Option<String> {
        let base = self.base_url.as_deref()?.trim();
        if base.is_empty() {
            return None;
        }
        Some(format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/')))
    }
}

/// Amadeus configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AmadeusConfig {
    /// API base URL
    pub base_url: String,

    /// Client ID (takes precedence over `client_id_env`)
    pub client_id: Option<String>,

    /// Client secret (takes precedence over `client_secret_env`)
    pub client_secret: Option<String>,

    /// Environment variable holding the client ID
    pub client_id_env: String,

    /// Environment variable holding the client secret
    pub client_secret_env: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for AmadeusConfig {
    fn default() -> Self {
        Self {
            base_url: AMADEUS_TEST_BASE_URL.to_string(),
            client_id: None,
            client_secret: None,
            client_id_env: "AMADEUS_CLIENT_ID".to_string(),
            client_secret_env: "AMADEUS_CLIENT_SECRET".to_string(),
            timeout_secs: 15,
        }
    }
}

impl AmadeusConfig {
    /// Resolve the client credential pair from config, then environment.
    ///
    /// Returns `None` unless both halves are present and non-empty.
    pub fn credentials(&self) -> Option<(String, String)> {
        let pick = |explicit: &Option<String>, env: &str| {
            explicit
                .clone()
                .or_else(|| std::env::var(env).ok())
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let id = pick(&self.client_id, &self.client_id_env)?;
        let secret = pick(&self.client_secret, &self.client_secret_env)?;
        Some((id, secret))
    }
}
