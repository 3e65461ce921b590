//! `distance` command: estimate the travel distance along an itinerary.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::files::{load_itinerary, require_existing, write_json};
use crate::routing::{
    HttpRouteProviderBuilder, RouteProviderBuilder, RoutingConfig, RoutingOptions,
    estimate_distance,
};
use crate::{
    ARG_ITINERARY, ARG_MAX_CONCURRENT_SEGMENTS, ARG_OSRM_BASE_URL, ARG_OVERALL_TIMEOUT_SECS,
    ARG_PROFILE, ARG_SEGMENT_TIMEOUT_SECS, ARG_START_LAT, ARG_START_LON, CliError,
    ENV_DISTANCE_ITINERARY,
};

/// CLI arguments for the `distance` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Estimate the travel distance along an itinerary by asking an \
                 OSRM instance for each consecutive leg. Legs the service \
                 cannot resolve in time fall back to the great-circle \
                 distance, and the result is then marked as not exact.",
    about = "Estimate the travel distance along an itinerary"
)]
#[ortho_config(prefix = "WAYMARK")]
pub(crate) struct DistanceArgs {
    /// Path to a JSON array of places in visiting order.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) itinerary: Option<Utf8PathBuf>,
    /// Base URL for the OSRM server (e.g. `http://localhost:5000`).
    #[arg(long = ARG_OSRM_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) osrm_base_url: Option<String>,
    /// OSRM routing profile (defaults to `driving`).
    #[arg(long = ARG_PROFILE, value_name = "name")]
    #[serde(default)]
    pub(crate) profile: Option<String>,
    /// Seconds allowed for each leg before it falls back.
    #[arg(long = ARG_SEGMENT_TIMEOUT_SECS, value_name = "secs")]
    #[serde(default)]
    pub(crate) segment_timeout_secs: Option<u64>,
    /// Seconds allowed for the whole estimate.
    #[arg(long = ARG_OVERALL_TIMEOUT_SECS, value_name = "secs")]
    #[serde(default)]
    pub(crate) overall_timeout_secs: Option<u64>,
    /// Most legs looked up at once (defaults to 8).
    #[arg(long = ARG_MAX_CONCURRENT_SEGMENTS, value_name = "count")]
    #[serde(default)]
    pub(crate) max_concurrent_segments: Option<usize>,
    /// Latitude of a starting point visited before the first place.
    #[arg(long = ARG_START_LAT, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) start_lat: Option<f64>,
    /// Longitude of the starting point.
    #[arg(long = ARG_START_LON, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) start_lon: Option<f64>,
}

impl DistanceArgs {
    pub(crate) fn into_config(self) -> Result<DistanceCommandConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        DistanceCommandConfig::try_from(merged)
    }
}

/// Resolved `distance` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct DistanceCommandConfig {
    pub(crate) itinerary: Utf8PathBuf,
    pub(crate) routing: RoutingConfig,
}

impl DistanceCommandConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        require_existing(&self.itinerary, ARG_ITINERARY)
    }
}

impl TryFrom<DistanceArgs> for DistanceCommandConfig {
    type Error = CliError;

    fn try_from(args: DistanceArgs) -> Result<Self, Self::Error> {
        let itinerary = args.itinerary.ok_or(CliError::MissingArgument {
            field: ARG_ITINERARY,
            env: ENV_DISTANCE_ITINERARY,
        })?;
        let routing = RoutingConfig::try_from(RoutingOptions {
            osrm_base_url: args.osrm_base_url,
            profile: args.profile,
            segment_timeout_secs: args.segment_timeout_secs,
            overall_timeout_secs: args.overall_timeout_secs,
            max_concurrent_segments: args.max_concurrent_segments,
            start_lat: args.start_lat,
            start_lon: args.start_lon,
        })?;
        Ok(Self { itinerary, routing })
    }
}

pub(crate) fn run_distance(args: DistanceArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_distance_with(args, &HttpRouteProviderBuilder, &mut stdout)
}

pub(crate) fn run_distance_with(
    args: DistanceArgs,
    builder: &dyn RouteProviderBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    let places = load_itinerary(&config.itinerary)?;
    let engine = config.routing.engine_config();
    let result = estimate_distance(&places, &config.routing, &engine, builder)?;
    write_json(writer, &result)
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<DistanceCommandConfig, CliError> {
    let merged = DistanceArgs::merge_from_layers(layers).map_err(CliError::from)?;
    DistanceCommandConfig::try_from(merged)
}
