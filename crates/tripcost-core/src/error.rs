//! Error types for tripcost operations.
//!
//! This module defines [`TripError`], the error enum shared by every tripcost
//! crate. Errors fall into three groups:
//! - validation errors, raised before any network I/O
//! - terminal calculation failures, surfaced as a single retryable condition
//! - configuration and I/O errors around the engine (config file, cache file)
//!
//! Pricing-tier failures are not represented here: they are absorbed by the
//! estimate chain in `tripcost-pricing` and never reach the caller.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using [`TripError`].
pub type Result<T> = std::result::Result<T, TripError>;

/// Which location field of the trip form an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationField {
    /// "Leaving from"
    Origin,
    /// "Going to"
    Destination,
}

impl std::fmt::Display for LocationField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Origin => write!(f, "Leaving from"),
            Self::Destination => write!(f, "Going to"),
        }
    }
}

/// Error type for all tripcost operations.
#[derive(Debug, Error)]
pub enum TripError {
    // =========================================================================
    // Validation Errors
    // =========================================================================
    /// Origin and/or destination have no resolved airport code
    #[error("Missing resolved airport codes (origin: {origin}, destination: {destination})")]
    MissingLocationCodes { origin: bool, destination: bool },

    /// Free-text location could not be resolved to a place with an airport
    #[error("Choose a place from the list for '{field}'")]
    UnresolvedLocation { field: LocationField, input: String },

    /// No travelers on the trip
    #[error("At least one traveler is required (adults: {adults}, kids: {kids})")]
    NoTravelers { adults: u32, kids: u32 },

    /// Exact-date trip with missing, malformed, or reversed dates
    #[error("Invalid travel dates: depart '{depart}', return '{ret}'")]
    InvalidDates { depart: String, ret: String },

    /// Length-mode trip with a non-positive day count
    #[error("Invalid trip length: {days} days")]
    InvalidTripLength { days: u32 },

    // =========================================================================
    // Calculation Errors
    // =========================================================================
    /// The concurrent estimate fetch failed unexpectedly
    #[error("Couldn't fetch live prices right now: {message}")]
    LivePricesUnavailable { message: String },

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Configuration file not found
    #[error("Configuration not found at {path}")]
    ConfigNotFound {
        path: PathBuf,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Configuration file is invalid YAML
    #[error("Invalid configuration at {path}: {message}")]
    ConfigInvalid { path: PathBuf, message: String },

    /// Configuration validation failed
    #[error("Configuration validation failed: {message}")]
    ConfigValidation { message: String },

    // =========================================================================
    // I/O Errors
    // =========================================================================
    /// Generic I/O error with context
    #[error("I/O error {operation}: {path}")]
    Io {
        operation: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Directory creation failed
    #[error("Failed to create directory: {path}")]
    DirectoryCreation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON parsing error
    #[error("JSON parse error in {context}: {message}")]
    JsonParse {
        context: String,
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    // =========================================================================
    // Internal Errors
    // =========================================================================
    /// Internal error (bug in tripcost)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl TripError {
    /// Create a MissingLocationCodes error from which codes are present.
    pub fn missing_codes(has_origin: bool, has_destination: bool) -> Self {
        Self::MissingLocationCodes {
            origin: !has_origin,
            destination: !has_destination,
        }
    }

    /// Create an UnresolvedLocation error
    pub fn unresolved(field: LocationField, input: impl Into<String>) -> Self {
        Self::UnresolvedLocation {
            field,
            input: input.into(),
        }
    }

    /// Create a LivePricesUnavailable error
    pub fn live_prices_unavailable(message: impl Into<String>) -> Self {
        Self::LivePricesUnavailable {
            message: message.into(),
        }
    }

    /// Create an I/O error
    pub fn io(operation: impl Into<String>, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            operation: operation.into(),
            path: path.into(),
            source,
        }
    }

    /// Create a JSON parse error
    pub fn json_parse(context: impl Into<String>, source: serde_json::Error) -> Self {
        Self::JsonParse {
            context: context.into(),
            message: source.to_string(),
            source: Some(source),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    // =========================================================================
    // Error classification helpers
    // =========================================================================

    /// Returns true if this error was raised by input validation.
    ///
    /// Validation errors happen before any network I/O and must be shown to
    /// the user next to the offending field.
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            Self::MissingLocationCodes { .. }
                | Self::UnresolvedLocation { .. }
                | Self::NoTravelers { .. }
                | Self::InvalidDates { .. }
                | Self::InvalidTripLength { .. }
        )
    }

    /// Returns true if the user can simply retry the same request.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::LivePricesUnavailable { .. })
    }

    /// Returns true if this is a configuration error
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::ConfigNotFound { .. } | Self::ConfigInvalid { .. } | Self::ConfigValidation { .. }
        )
    }

    /// Returns actionable guidance for the user
    pub fn guidance(&self) -> Option<&'static str> {
        match self {
            Self::MissingLocationCodes { .. } | Self::UnresolvedLocation { .. } => {
                Some("Pick a city or airport with a known airport code, e.g. 'ORF' or 'Rio de Janeiro'")
            }
            Self::NoTravelers { .. } => Some("Please set origin, destination, and at least one traveler."),
            Self::InvalidDates { .. } => Some("Check your dates and try again."),
            Self::InvalidTripLength { .. } => Some("Enter a trip length (days)."),
            Self::LivePricesUnavailable { .. } => {
                Some("Try again in a moment; previously cached results are still valid")
            }
            Self::ConfigInvalid { .. } => Some("Check YAML syntax in ~/.tripcost/config.yaml"),
            _ => None,
        }
    }
}
