//! Travel pricing proxy tier.
//!
//! The proxy fronts commercial fare and hotel APIs behind two endpoints:
//!
//! - `POST {base}/flights/estimate` with a [`FlightQuery`] body
//! - `POST {base}/lodging/estimate` with a [`LodgingQuery`] body
//!
//! Responses are loosely typed: amounts may be numbers or numeric strings,
//! and `provider`/`detail`/`updatedAt` are optional.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tokio::time::Duration;
use tracing::debug;
use tripcost_core::{FlightEstimate, LodgingEstimate, PriceSource, SourceKind};

use crate::amount::{amount_field, text_field};
use crate::config::ProxyConfig;
use crate::error::{PricingError, Result};
use crate::provider::{FlightSource, LodgingSource};
use crate::query::{FlightQuery, LodgingQuery};

const SOURCE_NAME: &str = "pricing proxy";

const DEFAULT_FLIGHT_PROVIDER: &str = "Travel Proxy (Amadeus/Duffel)";
const DEFAULT_FLIGHT_DETAIL: &str = "Live route pricing from configured travel proxy";
const DEFAULT_LODGING_PROVIDER: &str = "Travel Proxy (Amadeus/Expedia Rapid)";
const DEFAULT_LODGING_DETAIL: &str = "Live hotel pricing from configured travel proxy";

/// Client for the configured pricing proxy.
pub struct ProxyClient {
    config: ProxyConfig,
    client: reqwest::Client,
}

impl ProxyClient {
    /// Create a proxy client from config.
    pub fn from_config(config: &ProxyConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| PricingError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            config: config.clone(),
            client,
        })
    }

    /// Whether a proxy endpoint is configured.
    pub fn is_configured(&self) -> bool {
        self.config.endpoint("").is_some()
    }

    /// POST the query and return the JSON body, or `None` when unconfigured.
    async fn post<Q: Serialize + Sync>(&self, path: &str, query: &Q) -> Result<Option<Value>> {
        let Some(url) = self.config.endpoint(path) else {
            return Ok(None);
        };

        debug!(url = %url, "requesting proxy estimate");

        let response = self.client.post(&url).json(query).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(PricingError::from_http_status(status, &body));
        }

        let body: Value = response.json().await?;
        if !body.is_object() {
            return Err(PricingError::invalid_response(SOURCE_NAME, "expected a JSON object"));
        }
        Ok(Some(body))
    }
}

/// Source metadata from a proxy response, with defaults for absent fields.
fn proxy_source(body: &Value, default_name: &str, default_detail: &str) -> PriceSource {
    let updated_at = text_field(body, "updatedAt")
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(Utc::now);

    PriceSource {
        name: text_field(body, "provider").unwrap_or(default_name).to_string(),
        kind: SourceKind::Api,
        detail: text_field(body, "detail").unwrap_or(default_detail).to_string(),
        updated_at,
    }
}

/// Parse a flight estimate response.
///
/// `totalFare` is taken as reported, not recomputed from the split.
pub fn parse_flight_response(body: &Value) -> FlightEstimate {
    FlightEstimate {
        total_adult_fare: amount_field(body, &["totalAdultFare", "totalFare"], 0.0),
        total_kid_fare: amount_field(body, &["totalKidFare"], 0.0),
        total_fare: amount_field(body, &["totalFare"], 0.0),
        source: proxy_source(body, DEFAULT_FLIGHT_PROVIDER, DEFAULT_FLIGHT_DETAIL),
    }
}

/// Parse a lodging estimate response.
pub fn parse_lodging_response(body: &Value) -> LodgingEstimate {
    LodgingEstimate::new(
        amount_field(body, &["nightlyRate"], 0.0),
        amount_field(body, &["totalStayCost"], 0.0),
        proxy_source(body, DEFAULT_LODGING_PROVIDER, DEFAULT_LODGING_DETAIL),
    )
}

#[async_trait]
impl FlightSource for ProxyClient {
    fn name(&self) -> &str {
        SOURCE_NAME
    }

    async fn flight_estimate(&self, query: &FlightQuery) -> Result<Option<FlightEstimate>> {
        let body = self.post("flights/estimate", query).await?;
        Ok(body.as_ref().map(parse_flight_response))
    }
}

#[async_trait]
impl LodgingSource for ProxyClient {
    fn name(&self) -> &str {
        SOURCE_NAME
    }

    async fn lodging_estimate(&self, query: &LodgingQuery) -> Result<Option<LodgingEstimate>> {
        let body = self.post("lodging/estimate", query).await?;
        Ok(body.as_ref().map(parse_lodging_response))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_flight_defaults() {
        let estimate = parse_flight_response(&json!({ "totalFare": 1500 }));
        assert_eq!(estimate.total_adult_fare, 1500.0, "adult fare falls back to totalFare");
        assert_eq!(estimate.total_kid_fare, 0.0);
        assert_eq!(estimate.total_fare, 1500.0);
        assert_eq!(estimate.source.name, DEFAULT_FLIGHT_PROVIDER);
        assert_eq!(estimate.source.detail, DEFAULT_FLIGHT_DETAIL);
        assert_eq!(estimate.source.kind, SourceKind::Api);
    }

    #[test]
    fn test_parse_flight_full() {
        let estimate = parse_flight_response(&json!({
            "totalAdultFare": "1200.50",
            "totalKidFare": 450,
            "totalFare": "1650.50",
            "provider": "Duffel",
            "detail": "cheapest refundable",
            "updatedAt": "2026-10-01T12:00:00Z"
        }));
        assert_eq!(estimate.total_adult_fare, 1200.5);
        assert_eq!(estimate.total_fare, 1650.5);
        assert_eq!(estimate.source.name, "Duffel");
        assert_eq!(estimate.source.updated_at.to_rfc3339(), "2026-10-01T12:00:00+00:00");
    }

    #[test]
    fn test_parse_lodging_missing_totals_is_unusable() {
        let estimate = parse_lodging_response(&json!({ "provider": "Rapid" }));
        assert!(!estimate.is_usable());
        assert_eq!(estimate.source.name, "Rapid");
        assert_eq!(estimate.source.detail, DEFAULT_LODGING_DETAIL);
    }

    #[tokio::test]
    async fn test_unconfigured_proxy_skips() {
        let proxy = ProxyClient::from_config(&ProxyConfig::default()).unwrap();
        assert!(!proxy.is_configured());

        let query = LodgingQuery {
            destination_code: "LIS".into(),
            check_in: String::new(),
            check_out: String::new(),
            adults: 1,
            kids: 0,
            nights: 2,
        };
        assert!(proxy.lodging_estimate(&query).await.unwrap().is_none());
    }
}
