//! Concurrent per-segment route resolution with geodesic fallback.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use log::{debug, warn};
use thiserror::Error;
use tokio::runtime::{Builder, Handle, RuntimeFlavor};
use tokio::sync::{Semaphore, mpsc};
use tokio::task::JoinSet;

use super::{DistanceConfig, DistanceResult, SegmentDistance, SegmentSource};
use crate::{
    EngineConfig, RouteError, RouteProvider, Waypoint, compute_geodesic_segment,
    polyline_length_km,
};

/// Outcome reported by a segment task over the result channel.
type SegmentOutcome = (usize, Result<f64, RouteError>);

/// Errors from [`DistanceEstimator::compute_route_distance_blocking`].
#[derive(Debug, Error)]
pub enum BlockingError {
    /// Building a private Tokio runtime failed.
    #[error("failed to build Tokio runtime: {0}")]
    Runtime(#[source] std::io::Error),
    /// The caller is already inside a `current_thread` runtime, which cannot
    /// be blocked on.
    #[error("cannot block inside a current_thread Tokio runtime; await compute_route_distance instead")]
    CurrentThreadRuntime,
}

/// Estimate travel distance along an ordered list of waypoints.
///
/// Every consecutive pair is looked up as an independent Tokio task with its
/// own timeout; at most `max_concurrent_segments` lookups run at once. Results are collected over a channel; pairs that fail, time
/// out, return no geometry, or are still pending when the overall budget
/// elapses fall back to the geodesic distance between their endpoints.
/// Waypoints are never reordered.
///
/// # Examples
///
/// ```
/// use waymark_core::test_support::FailingRouteProvider;
/// use waymark_core::{DistanceConfig, DistanceEstimator, Waypoint, compute_geodesic_segment};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), waymark_core::WaypointError> {
/// let estimator = DistanceEstimator::new(FailingRouteProvider::default(), DistanceConfig::default());
/// let a = Waypoint::new(12.97, 77.59)?;
/// let b = Waypoint::new(12.30, 76.64)?;
///
/// let result = estimator.compute_route_distance(&[a, b]).await;
/// assert!(!result.exact);
/// assert_eq!(result.total_km, compute_geodesic_segment(a, b));
/// # Ok(())
/// # }
/// ```
pub struct DistanceEstimator<P: RouteProvider + ?Sized + 'static> {
    provider: Arc<P>,
    config: DistanceConfig,
}

impl<P: RouteProvider + ?Sized + 'static> std::fmt::Debug for DistanceEstimator<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DistanceEstimator")
            .field("provider", &"<dyn RouteProvider>")
            .field("config", &self.config)
            .finish()
    }
}

impl<P: RouteProvider + 'static> DistanceEstimator<P> {
    /// Wrap `provider` with the given time budgets.
    pub fn new(provider: P, config: DistanceConfig) -> Self {
        Self::from_shared(Arc::new(provider), config)
    }
}

impl<P: RouteProvider + ?Sized + 'static> DistanceEstimator<P> {
    /// Build an estimator over a provider shared with other components.
    pub const fn from_shared(provider: Arc<P>, config: DistanceConfig) -> Self {
        Self { provider, config }
    }

    /// Build an estimator with the routing budgets of the engine
    /// configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use std::time::Duration;
    /// use waymark_core::test_support::StraightLineRouteProvider;
    /// use waymark_core::{DistanceConfig, DistanceEstimator, EngineConfig};
    ///
    /// let engine = EngineConfig::default()
    ///     .with_distance(DistanceConfig::default().with_overall_timeout(Duration::from_secs(3)));
    /// let estimator = DistanceEstimator::from_config(Arc::new(StraightLineRouteProvider), &engine);
    /// assert_eq!(estimator.config(), &engine.distance);
    /// ```
    #[must_use]
    pub const fn from_config(provider: Arc<P>, config: &EngineConfig) -> Self {
        Self::from_shared(provider, config.distance)
    }

    /// The time budgets in force.
    #[must_use]
    pub const fn config(&self) -> &DistanceConfig {
        &self.config
    }

    /// Compute the total travel distance along `waypoints`.
    ///
    /// Fewer than two waypoints yield a zero, exact result. Provider failures
    /// never surface as errors; they only clear the `exact` flag.
    ///
    /// Must be awaited from within a Tokio runtime because segment lookups
    /// are spawned as tasks.
    pub async fn compute_route_distance(&self, waypoints: &[Waypoint]) -> DistanceResult {
        let pairs: Vec<(Waypoint, Waypoint)> = waypoints
            .windows(2)
            .filter_map(|window| match window {
                [from, to] => Some((*from, *to)),
                _ => None,
            })
            .collect();
        if pairs.is_empty() {
            return DistanceResult::empty();
        }

        let mut resolved: Vec<Option<Result<f64, RouteError>>> = vec![None; pairs.len()];
        let mut tasks = self.spawn_segments(&pairs, &mut resolved).await;
        tasks.abort_all();

        let segments = pairs
            .iter()
            .zip(resolved)
            .enumerate()
            .map(|(index, (&(from, to), outcome))| settle_segment(index, from, to, outcome))
            .collect();
        let result = DistanceResult::from_segments(segments);
        debug!(
            "resolved {} segments ({} fallback), total {:.3} km",
            pairs.len(),
            result.fallback_count(),
            result.total_km
        );
        result
    }

    /// Blocking wrapper around [`Self::compute_route_distance`] for
    /// synchronous callers.
    ///
    /// Inside a multi-threaded Tokio runtime the current runtime is reused via
    /// [`tokio::task::block_in_place`]. Outside any runtime a private
    /// `current_thread` runtime is built for the call.
    ///
    /// # Errors
    ///
    /// Returns [`BlockingError::CurrentThreadRuntime`] when called from a
    /// `current_thread` runtime, and [`BlockingError::Runtime`] when a private
    /// runtime cannot be built.
    pub fn compute_route_distance_blocking(
        &self,
        waypoints: &[Waypoint],
    ) -> Result<DistanceResult, BlockingError> {
        let future = self.compute_route_distance(waypoints);
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                Ok(tokio::task::block_in_place(|| handle.block_on(future)))
            }
            Ok(_) => Err(BlockingError::CurrentThreadRuntime),
            Err(_) => {
                let runtime = Builder::new_current_thread()
                    .enable_all()
                    .build()
                    .map_err(BlockingError::Runtime)?;
                Ok(runtime.block_on(future))
            }
        }
    }

    /// Spawn one lookup task per pair and collect their outcomes into
    /// `resolved` until every task has reported or the overall budget
    /// elapses. Returns the task set so stragglers can be aborted.
    async fn spawn_segments(
        &self,
        pairs: &[(Waypoint, Waypoint)],
        resolved: &mut [Option<Result<f64, RouteError>>],
    ) -> JoinSet<()> {
        let (sender, mut receiver) = mpsc::channel::<SegmentOutcome>(pairs.len());
        let permits = Arc::new(Semaphore::new(self.config.max_concurrent_segments.get()));
        let mut tasks = JoinSet::new();
        for (index, &(from, to)) in pairs.iter().enumerate() {
            let provider = Arc::clone(&self.provider);
            let segment_sender = sender.clone();
            let segment_permits = Arc::clone(&permits);
            let segment_timeout = self.config.segment_timeout;
            tasks.spawn(async move {
                let Ok(_permit) = segment_permits.acquire_owned().await else {
                    return;
                };
                let outcome = lookup_segment(provider.as_ref(), from, to, segment_timeout).await;
                if segment_sender.send((index, outcome)).await.is_err() {
                    debug!("segment {index} finished after the overall budget elapsed");
                }
            });
        }
        drop(sender);

        let collect = async {
            while let Some((index, outcome)) = receiver.recv().await {
                if let Some(slot) = resolved.get_mut(index) {
                    *slot = Some(outcome);
                }
            }
        };
        run_with_budget(self.config.overall_timeout, collect).await;
        tasks
    }
}

/// Drive `collect` to completion or until `budget` elapses.
async fn run_with_budget(budget: Option<Duration>, collect: impl Future<Output = ()>) {
    match budget {
        Some(limit) => {
            if tokio::time::timeout(limit, collect).await.is_err() {
                warn!(
                    "overall routing budget of {} ms elapsed; pending segments fall back",
                    limit.as_millis()
                );
            }
        }
        None => collect.await,
    }
}

/// Ask the provider for one segment and measure the returned geometry.
async fn lookup_segment<P: RouteProvider + ?Sized>(
    provider: &P,
    from: Waypoint,
    to: Waypoint,
    timeout: Duration,
) -> Result<f64, RouteError> {
    let geometry = tokio::time::timeout(timeout, provider.route_geometry(from, to))
        .await
        .map_err(|_| RouteError::Timeout {
            timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
        })??;
    if geometry.0.len() < 2 {
        return Err(RouteError::EmptyGeometry);
    }
    if geometry
        .coords()
        .any(|coord| Waypoint::from_coord(*coord).is_err())
    {
        return Err(RouteError::InvalidGeometry);
    }
    Ok(polyline_length_km(&geometry))
}

/// Turn a collected outcome into a segment, falling back when the lookup
/// failed or never reported.
fn settle_segment(
    index: usize,
    from: Waypoint,
    to: Waypoint,
    outcome: Option<Result<f64, RouteError>>,
) -> SegmentDistance {
    match outcome {
        Some(Ok(km)) => SegmentDistance {
            from_index: index,
            km,
            source: SegmentSource::Network,
        },
        Some(Err(error)) => {
            warn!("segment {index} fell back to geodesic distance: {error}");
            fallback_segment(index, from, to)
        }
        None => {
            warn!("segment {index} did not resolve in time; using geodesic distance");
            fallback_segment(index, from, to)
        }
    }
}

fn fallback_segment(index: usize, from: Waypoint, to: Waypoint) -> SegmentDistance {
    SegmentDistance {
        from_index: index,
        km: compute_geodesic_segment(from, to),
        source: SegmentSource::Fallback,
    }
}
