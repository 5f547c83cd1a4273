//! Logging infrastructure for tripcost.
//!
//! Structured logging using the `tracing` ecosystem:
//!
//! - JSON lines written to `~/.tripcost/logs/tripcost.log.<date>` (rotated daily)
//! - Human-readable console output on stderr
//! - `--verbose` switches the default level from INFO to DEBUG
//!
//! `RUST_LOG` takes precedence over the defaults when set.
//!
//! ## Example
//!
//! ```no_run
//! use tripcost_core::logging;
//!
//! let _guard = logging::init_logging(None, false).expect("logging init");
//!
//! tracing::info!("tripcost started");
//! tracing::debug!(origin = "ORF", destination = "GIG", "calculating budget");
//! ```

use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

use crate::error::{Result, TripError};

/// Guard that must be held to ensure log flushing on shutdown.
///
/// Keep this guard alive for the lifetime of the application.
pub struct LogGuard {
    _file_guard: Option<WorkerGuard>,
}

/// Initialize the tripcost logging system.
///
/// # Arguments
///
/// * `log_dir` - Optional custom log directory. Defaults to `~/.tripcost/logs/`
/// * `verbose` - If true, sets log level to DEBUG. Otherwise uses INFO.
///
/// # Returns
///
/// A [`LogGuard`] that must be held for the application lifetime so that
/// buffered file logs are flushed on shutdown.
pub fn init_logging(log_dir: Option<PathBuf>, verbose: bool) -> Result<LogGuard> {
    let log_dir = match log_dir {
        Some(dir) => dir,
        None => default_log_dir()?,
    };

    std::fs::create_dir_all(&log_dir).map_err(|e| TripError::DirectoryCreation {
        path: log_dir.clone(),
        source: e,
    })?;

    let file_appender = tracing_appender::rolling::daily(&log_dir, "tripcost.log");
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let default_level = if verbose { "debug" } else { "info" };
    // Crate targets use underscores; `tripcost` covers the binary and the
    // `tripcost::pricing` source log.
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(
            ["tripcost", "tripcost_core", "tripcost_pricing", "tripcost_budget"]
                .map(|target| format!("{target}={default_level}"))
                .join(","),
        )
    });

    let file_layer = fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false)
        .json()
        .with_span_events(FmtSpan::CLOSE)
        .with_current_span(true)
        .with_span_list(true);

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_target(verbose)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(verbose)
        .with_line_number(verbose)
        .compact();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer)
        .init();

    tracing::debug!(log_dir = %log_dir.display(), verbose, "logging initialized");

    Ok(LogGuard {
        _file_guard: Some(file_guard),
    })
}

/// Initialize minimal console-only logging for testing.
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}

/// Get the tripcost home directory (`~/.tripcost`).
pub fn tripcost_home() -> Result<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| TripError::Internal {
        message: "home directory could not be determined".into(),
    })?;

    Ok(home.join(".tripcost"))
}

/// Get the default log directory path.
///
/// Returns `~/.tripcost/logs/`
pub fn default_log_dir() -> Result<PathBuf> {
    Ok(tripcost_home()?.join("logs"))
}

/// Log which pricing tier produced an estimate.
///
/// # Example
///
/// ```ignore
/// log_price_source!("flight", &estimate.source);
/// log_price_source!("lodging", &estimate.source, total = estimate.total_stay_cost);
/// ```
#[macro_export]
macro_rules! log_price_source {
    ($axis:expr, $source:expr) => {
        tracing::info!(
            target: "tripcost::pricing",
            axis = $axis,
            source = %$source.name,
            kind = %$source.kind,
            "price source selected"
        )
    };
    ($axis:expr, $source:expr, $($field:tt)*) => {
        tracing::info!(
            target: "tripcost::pricing",
            axis = $axis,
            source = %$source.name,
            kind = %$source.kind,
            $($field)*,
            "price source selected"
        )
    };
}
