//! Routing options shared by the `distance` and `budget` commands.

use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;

use log::debug;
use waymark_core::{
    DEFAULT_MAX_CONCURRENT_SEGMENTS, DistanceConfig, DistanceEstimator, DistanceResult,
    EngineConfig, InputError, Place, RouteProvider, Waypoint, waypoints_from_places,
};
use waymark_data::{HttpRouteProvider, HttpRouteProviderConfig};

use crate::{
    ARG_MAX_CONCURRENT_SEGMENTS, ARG_OVERALL_TIMEOUT_SECS, ARG_SEGMENT_TIMEOUT_SECS, ARG_START_LAT,
    ARG_START_LON, CliError,
};

/// Per-segment budget used when none is configured.
pub(crate) const DEFAULT_SEGMENT_TIMEOUT_SECS: u64 = 10;

/// Routing options as merged from flags, files and the environment.
#[derive(Debug, Clone, Default)]
pub(crate) struct RoutingOptions {
    pub(crate) osrm_base_url: Option<String>,
    pub(crate) profile: Option<String>,
    pub(crate) segment_timeout_secs: Option<u64>,
    pub(crate) overall_timeout_secs: Option<u64>,
    pub(crate) max_concurrent_segments: Option<usize>,
    pub(crate) start_lat: Option<f64>,
    pub(crate) start_lon: Option<f64>,
}

/// Resolved routing configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RoutingConfig {
    /// Base URL for the OSRM route service.
    pub(crate) osrm_base_url: String,
    /// OSRM profile, e.g. `driving`.
    pub(crate) profile: String,
    pub(crate) segment_timeout: Duration,
    pub(crate) overall_timeout: Option<Duration>,
    pub(crate) max_concurrent_segments: NonZeroUsize,
    /// Optional first waypoint ahead of the itinerary's places.
    pub(crate) start: Option<Waypoint>,
}

impl RoutingConfig {
    pub(crate) fn distance_config(&self) -> DistanceConfig {
        let config = DistanceConfig::default()
            .with_segment_timeout(self.segment_timeout)
            .with_max_concurrent_segments(self.max_concurrent_segments);
        match self.overall_timeout {
            Some(timeout) => config.with_overall_timeout(timeout),
            None => config,
        }
    }

    /// Engine configuration carrying these routing budgets.
    pub(crate) fn engine_config(&self) -> EngineConfig {
        EngineConfig::default().with_distance(self.distance_config())
    }

    fn provider_config(&self) -> HttpRouteProviderConfig {
        HttpRouteProviderConfig::new(self.osrm_base_url.clone())
            .with_profile(self.profile.clone())
            .with_timeout(self.segment_timeout)
    }
}

impl TryFrom<RoutingOptions> for RoutingConfig {
    type Error = CliError;

    fn try_from(options: RoutingOptions) -> Result<Self, Self::Error> {
        let defaults = HttpRouteProviderConfig::default();
        let segment_timeout = whole_seconds(
            options
                .segment_timeout_secs
                .unwrap_or(DEFAULT_SEGMENT_TIMEOUT_SECS),
            ARG_SEGMENT_TIMEOUT_SECS,
        )?;
        let overall_timeout = options
            .overall_timeout_secs
            .map(|secs| whole_seconds(secs, ARG_OVERALL_TIMEOUT_SECS))
            .transpose()?;
        let max_concurrent_segments = match options.max_concurrent_segments {
            Some(limit) => NonZeroUsize::new(limit).ok_or(CliError::ZeroConcurrency {
                field: ARG_MAX_CONCURRENT_SEGMENTS,
            })?,
            None => DEFAULT_MAX_CONCURRENT_SEGMENTS,
        };
        let start = resolve_start(options.start_lat, options.start_lon)?;

        Ok(Self {
            osrm_base_url: options.osrm_base_url.unwrap_or(defaults.base_url),
            profile: options.profile.unwrap_or(defaults.profile),
            segment_timeout,
            overall_timeout,
            max_concurrent_segments,
            start,
        })
    }
}

fn whole_seconds(secs: u64, field: &'static str) -> Result<Duration, CliError> {
    if secs == 0 {
        return Err(CliError::ZeroTimeout { field });
    }
    Ok(Duration::from_secs(secs))
}

fn resolve_start(lat: Option<f64>, lon: Option<f64>) -> Result<Option<Waypoint>, CliError> {
    match (lat, lon) {
        (None, None) => Ok(None),
        (Some(latitude), Some(longitude)) => Waypoint::new(latitude, longitude)
            .map(Some)
            .map_err(|source| CliError::Input(InputError::InvalidStart(source))),
        (Some(_), None) => Err(CliError::IncompleteStart {
            missing: ARG_START_LON,
        }),
        (None, Some(_)) => Err(CliError::IncompleteStart {
            missing: ARG_START_LAT,
        }),
    }
}

/// Builds the route provider for a command invocation.
pub(crate) trait RouteProviderBuilder {
    fn build(&self, config: &RoutingConfig) -> Result<Arc<dyn RouteProvider>, CliError>;
}

/// Talks to the configured OSRM instance over HTTP.
pub(crate) struct HttpRouteProviderBuilder;

impl RouteProviderBuilder for HttpRouteProviderBuilder {
    fn build(&self, config: &RoutingConfig) -> Result<Arc<dyn RouteProvider>, CliError> {
        let provider = HttpRouteProvider::with_config(config.provider_config()).map_err(
            |source| CliError::BuildRouteProvider {
                base_url: config.osrm_base_url.clone(),
                source,
            },
        )?;
        Ok(Arc::new(provider))
    }
}

/// Estimate the distance along `places`, preceded by the configured start,
/// within the routing budgets of `engine`.
pub(crate) fn estimate_distance(
    places: &[Place],
    routing: &RoutingConfig,
    engine: &EngineConfig,
    builder: &dyn RouteProviderBuilder,
) -> Result<DistanceResult, CliError> {
    let waypoints = waypoints_from_places(places, routing.start)?;
    let provider = builder.build(routing)?;
    let estimator = DistanceEstimator::from_config(provider, engine);
    let result = estimator.compute_route_distance_blocking(&waypoints)?;
    debug!(
        "estimated {:.3} km over {} waypoints ({} fallback segments)",
        result.total_km,
        waypoints.len(),
        result.fallback_count()
    );
    Ok(result)
}
