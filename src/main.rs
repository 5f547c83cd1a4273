//! tripcost - trip budget estimator
//!
//! Estimates the full cost of a trip from a handful of inputs, using live
//! pricing when a proxy or Amadeus credentials are configured and a
//! deterministic heuristic model otherwise.
//!
//! ## Usage
//!
//! ```bash
//! # Full budget for exact dates
//! tripcost estimate --from Norfolk --to "Rio de Janeiro" --depart 2026-11-02 --return 2026-11-09
//!
//! # Week-long road trip, no network
//! tripcost preview --from RIC --to BNA --road-trip --days 7
//!
//! # Catalog lookup
//! tripcost resolve lisbon
//!
//! # With verbose logging and a custom log directory
//! tripcost -v --log-dir /path/to/logs/ estimate --to LIS
//! ```

mod cli;
mod report;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};
use tripcost_budget::{
    BudgetCalculator, BudgetConfig, CatalogResolver, LocationResolver, ResultCache, TripSession,
    estimate_include_category_totals, estimate_meals_preference,
};
use tripcost_core::{LogGuard, TripError, TripForm, init_logging};
use tripcost_pricing::HeuristicModel;

use crate::cli::{CacheCommands, Cli, Commands, TripArgs};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let _guard = match setup_logging(&cli) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            return ExitCode::from(1);
        }
    };

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("tripcost error: {:#}", e);
            eprintln!("Error: {:#}", e);
            if let Some(guidance) = e.downcast_ref::<TripError>().and_then(TripError::guidance) {
                eprintln!("{guidance}");
            }
            ExitCode::from(1)
        }
    }
}

/// Set up logging based on CLI arguments.
fn setup_logging(cli: &Cli) -> tripcost_core::Result<LogGuard> {
    init_logging(cli.log_dir.clone(), cli.verbose > 0)
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Estimate {
            trip,
            refresh,
            no_cache,
            json,
        } => estimate(cli.config.as_deref(), &trip, refresh, no_cache, json).await,
        Commands::Preview { trip, json } => preview(&trip, json).await,
        Commands::Resolve { text, limit } => {
            report::print_suggestions(&CatalogResolver::new().suggestions(&text, limit));
            Ok(())
        }
        Commands::Cache { action } => cache(cli.config.as_deref(), action),
    }
}

async fn estimate(
    config_path: Option<&std::path::Path>,
    trip: &TripArgs,
    refresh: bool,
    no_cache: bool,
    json: bool,
) -> anyhow::Result<()> {
    let config = BudgetConfig::load(config_path)?;
    let form = trip.to_form()?;

    let calculator = BudgetCalculator::from_config(&config.pricing)?;
    let cache = if no_cache || !config.cache.enabled {
        None
    } else {
        Some(ResultCache::from_config(&config.cache)?)
    };
    let mut session = TripSession::new(calculator, cache);

    info!(refresh, cached = session.cache().is_some(), "running estimate");
    let outcome = session.calculate(&form, refresh).await?;

    if json {
        let rendered = serde_json::to_string_pretty(&outcome.result).context("Failed to render result")?;
        println!("{rendered}");
    } else {
        report::print_outcome(&outcome);
    }
    Ok(())
}

async fn preview(trip: &TripArgs, json: bool) -> anyhow::Result<()> {
    let form = resolve_offline(trip.to_form()?).await;
    let heuristic = HeuristicModel::new();

    let totals = estimate_include_category_totals(&form, &heuristic);
    let meals = estimate_meals_preference(&form);

    if json {
        let rendered = serde_json::to_string_pretty(&serde_json::json!({
            "totals": totals,
            "meals": meals,
        }))
        .context("Failed to render preview")?;
        println!("{rendered}");
    } else {
        report::print_preview(&totals, &meals);
    }
    Ok(())
}

/// Resolve what the catalog can; the preview reports the rest as missing.
async fn resolve_offline(mut form: TripForm) -> TripForm {
    let resolver = CatalogResolver::new();
    if let Some(origin) = resolver.resolve(&form.origin).await {
        form.origin = origin;
    }
    if let Some(destination) = resolver.resolve(&form.destination).await {
        form.destination = destination;
    }
    form
}

fn cache(config_path: Option<&std::path::Path>, action: CacheCommands) -> anyhow::Result<()> {
    let config = BudgetConfig::load(config_path)?;
    let mut cache = ResultCache::from_config(&config.cache)?;
    let path = config.cache.resolved_path()?;

    match action {
        CacheCommands::Clear => {
            let removed = cache.len();
            cache.clear();
            cache.save()?;
            println!("Removed {removed} cached result(s) from {}", path.display());
        }
        CacheCommands::Prune => {
            let removed = cache.prune();
            cache.save()?;
            println!("Pruned {removed} expired result(s); {} remain", cache.len());
        }
    }
    Ok(())
}
