//! `stats` command: summarise an itinerary's places.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use waymark_core::{DefaultBudgetSummary, EngineConfig, ItineraryAggregator, ItineraryStats};

use crate::files::{load_itinerary, require_existing, write_json};
use crate::{ARG_ITINERARY, CliError, ENV_STATS_ITINERARY};

/// CLI arguments for the `stats` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Count an itinerary's places by category and state, total \
                 their entrance fees and visit hours, and print the flat-rate \
                 budget summary with its percentage split.",
    about = "Summarise an itinerary's places"
)]
#[ortho_config(prefix = "WAYMARK")]
pub(crate) struct StatsArgs {
    /// Path to a JSON array of places.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) itinerary: Option<Utf8PathBuf>,
}

impl StatsArgs {
    pub(crate) fn into_config(self) -> Result<StatsCommandConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        StatsCommandConfig::try_from(merged)
    }
}

/// Resolved `stats` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct StatsCommandConfig {
    pub(crate) itinerary: Utf8PathBuf,
}

impl TryFrom<StatsArgs> for StatsCommandConfig {
    type Error = CliError;

    fn try_from(args: StatsArgs) -> Result<Self, Self::Error> {
        let itinerary = args.itinerary.ok_or(CliError::MissingArgument {
            field: ARG_ITINERARY,
            env: ENV_STATS_ITINERARY,
        })?;
        Ok(Self { itinerary })
    }
}

/// Output of the `stats` command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StatsReport {
    pub(crate) stats: ItineraryStats,
    pub(crate) default_budget: DefaultBudgetSummary,
}

pub(crate) fn run_stats(args: StatsArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_stats_with(args, &mut stdout)
}

pub(crate) fn run_stats_with(args: StatsArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    require_existing(&config.itinerary, ARG_ITINERARY)?;
    let places = load_itinerary(&config.itinerary)?;
    let engine = EngineConfig::default();
    let aggregator = ItineraryAggregator::from_config(&engine);
    let report = StatsReport {
        stats: aggregator.compute_stats(&places)?,
        default_budget: aggregator.compute_default_budget_summary(&places)?,
    };
    write_json(writer, &report)
}
