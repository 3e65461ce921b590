//! Command-line interface for the Waymark itinerary engine.
//!
//! Three subcommands read an itinerary (a JSON array of places in visiting
//! order) and print pretty JSON to stdout:
//!
//! - `distance` estimates the travel distance, falling back to great-circle
//!   distances for segments the routing service cannot resolve.
//! - `budget` prices the itinerary under one tier, or every tier with
//!   `--compare`.
//! - `stats` summarises the places and prints the flat-rate budget summary.
//!
//! Options can come from CLI flags, configuration files, or `WAYMARK_*`
//! environment variables.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod budget;
mod distance;
mod error;
mod files;
mod routing;
mod stats;

pub use error::CliError;

use budget::{BudgetArgs, run_budget};
use distance::{DistanceArgs, run_distance};
use stats::{StatsArgs, run_stats};

const ARG_ITINERARY: &str = "itinerary";
const ARG_OSRM_BASE_URL: &str = "osrm-base-url";
const ARG_PROFILE: &str = "profile";
const ARG_SEGMENT_TIMEOUT_SECS: &str = "segment-timeout-secs";
const ARG_OVERALL_TIMEOUT_SECS: &str = "overall-timeout-secs";
const ARG_MAX_CONCURRENT_SEGMENTS: &str = "max-concurrent-segments";
const ARG_START_LAT: &str = "start-lat";
const ARG_START_LON: &str = "start-lon";
const ARG_TIER: &str = "tier";
const ARG_COMPARE: &str = "compare";
const ARG_GROUP_SIZE: &str = "group-size";
const ARG_DISTANCE_KM: &str = "distance-km";
const ARG_TIERS: &str = "tiers";
const ENV_DISTANCE_ITINERARY: &str = "WAYMARK_CMDS_DISTANCE_ITINERARY";
const ENV_BUDGET_ITINERARY: &str = "WAYMARK_CMDS_BUDGET_ITINERARY";
const ENV_BUDGET_TIER: &str = "WAYMARK_CMDS_BUDGET_TIER";
const ENV_STATS_ITINERARY: &str = "WAYMARK_CMDS_STATS_ITINERARY";

/// Run the Waymark CLI with the current process arguments and environment.
///
/// # Errors
///
/// Returns a [`CliError`] describing the first failure: argument parsing,
/// configuration merging, input loading, engine validation, or output.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Distance(args) => run_distance(args),
        Command::Budget(args) => run_budget(args),
        Command::Stats(args) => run_stats(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "waymark",
    about = "Travel distance and budget estimates for itineraries",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Estimate the travel distance along an itinerary.
    Distance(DistanceArgs),
    /// Price an itinerary under one or all budget tiers.
    Budget(BudgetArgs),
    /// Summarise an itinerary's places.
    Stats(StatsArgs),
}

#[cfg(test)]
mod tests;
