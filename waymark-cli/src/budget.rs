//! `budget` command: price an itinerary under one or all budget tiers.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use waymark_core::{BudgetModel, BudgetTier, EngineConfig, InputError, TierBudget};

use crate::files::{load_itinerary, load_tiers, require_existing, write_json};
use crate::routing::{
    HttpRouteProviderBuilder, RouteProviderBuilder, RoutingConfig, RoutingOptions,
    estimate_distance,
};
use crate::{
    ARG_COMPARE, ARG_DISTANCE_KM, ARG_GROUP_SIZE, ARG_ITINERARY, ARG_MAX_CONCURRENT_SEGMENTS,
    ARG_OSRM_BASE_URL, ARG_OVERALL_TIMEOUT_SECS, ARG_PROFILE, ARG_SEGMENT_TIMEOUT_SECS,
    ARG_START_LAT, ARG_START_LON, ARG_TIER, ARG_TIERS, CliError, ENV_BUDGET_ITINERARY,
    ENV_BUDGET_TIER,
};

/// Group size used when none is configured.
pub(crate) const DEFAULT_GROUP_SIZE: u32 = 1;

/// CLI arguments for the `budget` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Price an itinerary under a budget tier. The travel distance \
                 is taken from --distance-km when given, otherwise it is \
                 estimated through OSRM exactly as the distance command does. \
                 Tiers default to budget, moderate and luxury; supply \
                 --tiers to load a custom table.",
    about = "Price an itinerary under one or all budget tiers"
)]
#[ortho_config(prefix = "WAYMARK")]
pub(crate) struct BudgetArgs {
    /// Path to a JSON array of places in visiting order.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) itinerary: Option<Utf8PathBuf>,
    /// Identifier of the tier to price, e.g. `moderate`.
    #[arg(long = ARG_TIER, value_name = "id")]
    #[serde(default)]
    pub(crate) tier: Option<String>,
    /// Price every tier instead of a single one.
    #[arg(long = ARG_COMPARE)]
    #[serde(default)]
    pub(crate) compare: bool,
    /// Number of travellers sharing the trip.
    #[arg(long = ARG_GROUP_SIZE, value_name = "count")]
    #[serde(default)]
    pub(crate) group_size: Option<u32>,
    /// Use this distance instead of asking the routing service.
    #[arg(long = ARG_DISTANCE_KM, value_name = "km")]
    #[serde(default)]
    pub(crate) distance_km: Option<f64>,
    /// Path to a JSON array of tiers, cheapest first.
    #[arg(long = ARG_TIERS, value_name = "path")]
    #[serde(default)]
    pub(crate) tiers: Option<Utf8PathBuf>,
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

impl BudgetArgs {
    pub(crate) fn into_config(self) -> Result<BudgetCommandConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        BudgetCommandConfig::try_from(merged)
    }
}

/// Which tiers to price.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TierSelection {
    /// The tier with this id, matched ignoring case.
    Single(String),
    /// Every tier in the table, cheapest first.
    All,
}

/// Resolved `budget` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct BudgetCommandConfig {
    pub(crate) itinerary: Utf8PathBuf,
    pub(crate) selection: TierSelection,
    pub(crate) group_size: u32,
    /// Fixed distance; when absent the distance is routed.
    pub(crate) distance_km: Option<f64>,
    pub(crate) tiers: Option<Utf8PathBuf>,
    pub(crate) routing: RoutingConfig,
}

impl BudgetCommandConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        require_existing(&self.itinerary, ARG_ITINERARY)?;
        if let Some(tiers) = &self.tiers {
            require_existing(tiers, ARG_TIERS)?;
        }
        Ok(())
    }
}

impl TryFrom<BudgetArgs> for BudgetCommandConfig {
    type Error = CliError;

    fn try_from(args: BudgetArgs) -> Result<Self, Self::Error> {
        let itinerary = args.itinerary.ok_or(CliError::MissingArgument {
            field: ARG_ITINERARY,
            env: ENV_BUDGET_ITINERARY,
        })?;
        let selection = match (args.tier, args.compare) {
            (Some(_), true) => {
                return Err(CliError::ConflictingOptions {
                    first: ARG_TIER,
                    second: ARG_COMPARE,
                });
            }
            (Some(tier), false) => TierSelection::Single(tier),
            (None, true) => TierSelection::All,
            (None, false) => {
                return Err(CliError::MissingArgument {
                    field: ARG_TIER,
                    env: ENV_BUDGET_TIER,
                });
            }
        };
        let routing = RoutingConfig::try_from(RoutingOptions {
            osrm_base_url: args.osrm_base_url,
            profile: args.profile,
            segment_timeout_secs: args.segment_timeout_secs,
            overall_timeout_secs: args.overall_timeout_secs,
            max_concurrent_segments: args.max_concurrent_segments,
            start_lat: args.start_lat,
            start_lon: args.start_lon,
        })?;
        let group_size = args.group_size.unwrap_or(DEFAULT_GROUP_SIZE);
        if group_size == 0 {
            return Err(CliError::Input(InputError::ZeroGroupSize));
        }
        if let Some(value) = args.distance_km
            && (!value.is_finite() || value < 0.0)
        {
            return Err(CliError::Input(InputError::InvalidDistance { value }));
        }
        Ok(Self {
            itinerary,
            selection,
            group_size,
            distance_km: args.distance_km,
            tiers: args.tiers,
            routing,
        })
    }
}

/// Output of the `budget` command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BudgetReport {
    /// Distance the transport costs were priced on.
    pub(crate) distance_km: f64,
    /// `false` when any leg fell back to the great-circle estimate.
    pub(crate) distance_exact: bool,
    pub(crate) group_size: u32,
    /// One entry per priced tier, cheapest first.
    pub(crate) budgets: Vec<TierBudget>,
}

pub(crate) fn run_budget(args: BudgetArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_budget_with(args, &HttpRouteProviderBuilder, &mut stdout)
}

pub(crate) fn run_budget_with(
    args: BudgetArgs,
    builder: &dyn RouteProviderBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let report = execute_budget(args, builder)?;
    write_json(writer, &report)
}

fn execute_budget(
    args: BudgetArgs,
    builder: &dyn RouteProviderBuilder,
) -> Result<BudgetReport, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    let places = load_itinerary(&config.itinerary)?;
    let base = config.routing.engine_config();
    let engine = match &config.tiers {
        Some(path) => base.with_tiers(load_tiers(path)?),
        None => base,
    };
    let tier = resolve_tier(&engine, &config.selection)?;
    BudgetModel::validate_request(&places, config.group_size)?;
    let (distance_km, distance_exact) = match config.distance_km {
        Some(km) => (km, true),
        None => {
            let routed = estimate_distance(&places, &config.routing, &engine, builder)?;
            (routed.total_km, routed.exact)
        }
    };
    let model = BudgetModel::from_config(&engine);
    let budgets = match tier {
        Some(tier) => {
            let breakdown = model.compute_budget(&places, distance_km, tier, config.group_size)?;
            vec![TierBudget {
                tier_id: tier.id.clone(),
                tier_name: tier.name.clone(),
                breakdown,
            }]
        }
        None => model.compare_tiers(&places, distance_km, config.group_size)?,
    };
    Ok(BudgetReport {
        distance_km,
        distance_exact,
        group_size: config.group_size,
        budgets,
    })
}

/// Look up the selected tier; `None` prices every tier.
fn resolve_tier<'a>(
    engine: &'a EngineConfig,
    selection: &TierSelection,
) -> Result<Option<&'a BudgetTier>, InputError> {
    match selection {
        TierSelection::All => Ok(None),
        TierSelection::Single(id) => engine
            .tiers
            .get(id)
            .map(Some)
            .ok_or_else(|| InputError::UnknownTier { id: id.clone() }),
    }
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<BudgetCommandConfig, CliError> {
    let merged = BudgetArgs::merge_from_layers(layers).map_err(CliError::from)?;
    BudgetCommandConfig::try_from(merged)
}
