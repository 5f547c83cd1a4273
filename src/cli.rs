//! Command-line arguments.

use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};
use tripcost_core::{DurationMode, IncludeCosts, LocationInput, TripForm, TripType};

/// Trip budget estimator
///
/// Blends live flight and hotel pricing with heuristic fallbacks into an
/// itemized trip budget.
#[derive(Parser, Debug)]
#[command(name = "tripcost")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging (increases log level)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Directory for log files (defaults to ~/.tripcost/logs/)
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    /// Configuration file (defaults to ~/.tripcost/config.yaml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Calculate a full budget with live pricing
    Estimate {
        #[command(flatten)]
        trip: TripArgs,

        /// Ignore cached results and fetch again
        #[arg(long)]
        refresh: bool,

        /// Neither read nor write the result cache
        #[arg(long)]
        no_cache: bool,

        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Preview per-category totals without network access
    Preview {
        #[command(flatten)]
        trip: TripArgs,

        /// Print the preview as JSON
        #[arg(long)]
        json: bool,
    },

    /// Look up airports and cities in the built-in catalog
    Resolve {
        /// City name, airport name, or IATA code
        text: String,

        /// Maximum number of suggestions
        #[arg(short = 'n', long, default_value_t = 5)]
        limit: usize,
    },

    /// Maintain the result cache file
    Cache {
        #[command(subcommand)]
        action: CacheCommands,
    },
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheCommands {
    /// Remove every cached result
    Clear,

    /// Remove expired results
    Prune,
}

/// Trip form options shared by `estimate` and `preview`.
#[derive(Args, Debug, Clone, Default)]
pub struct TripArgs {
    /// JSON trip form to start from; other options override its fields
    #[arg(long)]
    pub form: Option<PathBuf>,

    /// Where the trip starts (city, airport, or IATA code)
    #[arg(long = "from")]
    pub origin: Option<String>,

    /// Where the trip goes
    #[arg(long = "to")]
    pub destination: Option<String>,

    /// Departure date (YYYY-MM-DD)
    #[arg(long)]
    pub depart: Option<String>,

    /// Return date (YYYY-MM-DD)
    #[arg(long = "return")]
    pub return_date: Option<String>,

    /// Trip length in days, instead of exact dates
    #[arg(long, conflicts_with_all = ["depart", "return_date"])]
    pub days: Option<u32>,

    /// Nights of lodging (defaults to days - 1)
    #[arg(long, conflicts_with_all = ["depart", "return_date"])]
    pub nights: Option<u32>,

    #[arg(long)]
    pub adults: Option<u32>,

    #[arg(long)]
    pub kids: Option<u32>,

    /// Drive instead of fly
    #[arg(long)]
    pub road_trip: bool,

    /// Categories to include, comma separated (or "all", "none")
    #[arg(long, value_delimiter = ',')]
    pub include: Option<Vec<String>>,

    /// Share of meals cooked in, 0-100
    #[arg(long)]
    pub meals_preference: Option<f64>,

    /// Contingency buffer percentage
    #[arg(long)]
    pub buffer: Option<f64>,

    /// Road-trip distance in miles (defaults to the route distance)
    #[arg(long)]
    pub distance: Option<f64>,

    /// Road-trip fuel economy
    #[arg(long)]
    pub mpg: Option<f64>,

    /// Road-trip gas price per gallon
    #[arg(long)]
    pub gas_price: Option<f64>,

    /// Road-trip tolls and parking total
    #[arg(long)]
    pub tolls: Option<f64>,
}

impl TripArgs {
    /// Build the trip form: defaults, then `--form`, then individual flags.
    pub fn to_form(&self) -> anyhow::Result<TripForm> {
        let mut form = match &self.form {
            Some(path) => read_form(path)?,
            None => TripForm::default(),
        };

        if let Some(origin) = &self.origin {
            form.origin = LocationInput::text(origin);
        }
        if let Some(destination) = &self.destination {
            form.destination = LocationInput::text(destination);
        }

        if self.depart.is_some() || self.return_date.is_some() {
            form.duration_mode = DurationMode::Exact;
        }
        if let Some(depart) = &self.depart {
            form.depart_date = depart.clone();
        }
        if let Some(ret) = &self.return_date {
            form.return_date = ret.clone();
        }

        if self.days.is_some() || self.nights.is_some() {
            form.duration_mode = DurationMode::Length;
        }
        if let Some(days) = self.days {
            form.length_days = days;
            form.length_nights = days.saturating_sub(1).max(1);
        }
        if let Some(nights) = self.nights {
            form.length_nights = nights;
        }

        if let Some(adults) = self.adults {
            form.adults = adults;
        }
        if let Some(kids) = self.kids {
            form.kids = kids;
        }
        if self.road_trip {
            form.trip_type = TripType::RoadTrip;
        }
        if let Some(include) = &self.include {
            form.include_costs = parse_include(include)?;
        }
        if let Some(preference) = self.meals_preference {
            form.meals_preference = preference;
        }
        if let Some(buffer) = self.buffer {
            form.buffer_percent = buffer;
        }

        let overrides = &mut form.overrides;
        if self.distance.is_some() {
            overrides.road_trip_distance_miles = self.distance;
        }
        if let Some(mpg) = self.mpg {
            overrides.road_trip_mpg = mpg;
        }
        if let Some(price) = self.gas_price {
            overrides.road_trip_gas_price_per_gallon = price;
        }
        if let Some(tolls) = self.tolls {
            overrides.road_trip_tolls_and_parking = tolls;
        }

        Ok(form)
    }
}

fn read_form(path: &Path) -> anyhow::Result<TripForm> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read trip form {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Invalid trip form {}", path.display()))
}

fn parse_include(names: &[String]) -> anyhow::Result<IncludeCosts> {
    let mut include = IncludeCosts::none();
    for name in names.iter().map(|n| n.trim()).filter(|n| !n.is_empty()) {
        match name {
            "all" => include = IncludeCosts::all(),
            "none" => include = IncludeCosts::none(),
            _ if include.set(name, true) => {}
            _ => bail!("Unknown cost category '{name}'"),
        }
    }
    Ok(include)
}
