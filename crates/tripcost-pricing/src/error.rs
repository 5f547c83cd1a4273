//! Error types for the pricing tiers.
//!
//! These errors never reach callers of [`EstimateChain`](crate::EstimateChain):
//! a failing tier is logged and the chain falls through to the next one.

use thiserror::Error;

/// Result type alias for pricing operations.
pub type Result<T> = std::result::Result<T, PricingError>;

/// Pricing tier errors.
#[derive(Debug, Error)]
pub enum PricingError {
    /// Transport-level failure (connect, timeout, TLS)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success HTTP status from a pricing API
    #[error("API returned HTTP {status}: {body}")]
    Api { status: u16, body: String },

    /// Client credentials are absent
    #[error("{provider} credentials are not configured")]
    MissingCredentials { provider: &'static str },

    /// Response body did not have the expected shape
    #[error("Invalid response from {provider}: {message}")]
    InvalidResponse {
        provider: &'static str,
        message: String,
    },

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid provider configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl PricingError {
    /// Check if this error is a network-related error.
    pub fn is_network_error(&self) -> bool {
        match self {
            PricingError::Http(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            PricingError::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Check if the API rejected our credentials.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, PricingError::Api { status: 401 | 403, .. })
    }

    /// Classify an HTTP status code and response body.
    pub fn from_http_status(status: u16, body: &str) -> Self {
        // Error pages can be large; keep the log line readable.
        let body: String = body.chars().take(300).collect();
        PricingError::Api { status, body }
    }

    /// Shorthand for [`PricingError::InvalidResponse`].
    pub fn invalid_response(provider: &'static str, message: impl Into<String>) -> Self {
        PricingError::InvalidResponse {
            provider,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_http_status_truncates_body() {
        let body = "x".repeat(1000);
        match PricingError::from_http_status(502, &body) {
            PricingError::Api { status, body } => {
                assert_eq!(status, 502);
                assert_eq!(body.len(), 300);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_classification() {
        assert!(PricingError::from_http_status(503, "").is_network_error());
        assert!(!PricingError::from_http_status(400, "").is_network_error());
        assert!(PricingError::from_http_status(401, "").is_auth_error());
        assert!(!PricingError::MissingCredentials { provider: "Amadeus" }.is_network_error());
    }

    #[test]
    fn test_display() {
        let err = PricingError::MissingCredentials { provider: "Amadeus" };
        assert_eq!(err.to_string(), "Amadeus credentials are not configured");
    }
}
