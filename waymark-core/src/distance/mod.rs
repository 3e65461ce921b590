//! Travel-distance estimation over an ordered list of waypoints.
//!
//! Each consecutive waypoint pair is resolved through a
//! [`RouteProvider`](crate::RouteProvider). When the provider fails, times
//! out or returns no geometry, that pair alone falls back to the geodesic
//! distance between its endpoints. The [`DistanceResult::exact`] flag records
//! whether every pair came from the road network.

mod estimator;

use std::num::NonZeroUsize;
use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{InputError, Place, Waypoint};

pub use estimator::{BlockingError, DistanceEstimator};

/// Default time budget for a single segment lookup.
pub const DEFAULT_SEGMENT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default cap on segment lookups in flight at once.
pub const DEFAULT_MAX_CONCURRENT_SEGMENTS: NonZeroUsize = match NonZeroUsize::new(8) {
    Some(limit) => limit,
    None => NonZeroUsize::MIN,
};

/// How a segment's distance was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum SegmentSource {
    /// Summed along a road-network polyline.
    Network,
    /// Direct great-circle distance between the endpoints.
    Fallback,
}

/// Distance of one consecutive waypoint pair.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct SegmentDistance {
    /// Index of the segment's first waypoint.
    pub from_index: usize,
    /// Segment length in kilometres.
    pub km: f64,
    /// Whether the length came from the network or the fallback.
    pub source: SegmentSource,
}

/// Total travel distance for a route.
///
/// # Examples
/// ```
/// use waymark_core::DistanceResult;
///
/// let result = DistanceResult::empty();
/// assert_eq!(result.total_km, 0.0);
/// assert!(result.exact);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct DistanceResult {
    /// Sum of all segment lengths in kilometres.
    pub total_km: f64,
    /// `true` only if every segment was resolved by the road network.
    pub exact: bool,
    /// Per-segment detail in waypoint order.
    pub segments: Vec<SegmentDistance>,
}

impl DistanceResult {
    /// Result for a route with fewer than two waypoints.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            total_km: 0.0,
            exact: true,
            segments: Vec::new(),
        }
    }

    /// Build a result from segments listed in waypoint order.
    #[must_use]
    pub fn from_segments(segments: Vec<SegmentDistance>) -> Self {
        let total_km = segments
            .iter()
            .fold(0.0, |total, segment| total + segment.km);
        let exact = segments
            .iter()
            .all(|segment| segment.source == SegmentSource::Network);
        Self {
            total_km,
            exact,
            segments,
        }
    }

    /// Number of segments that fell back to the geodesic estimate.
    #[must_use]
    pub fn fallback_count(&self) -> usize {
        self.segments
            .iter()
            .filter(|segment| segment.source == SegmentSource::Fallback)
            .count()
    }
}

/// Time budgets and the concurrency cap applied by [`DistanceEstimator`].
///
/// # Examples
/// ```
/// use std::num::NonZeroUsize;
/// use std::time::Duration;
/// use waymark_core::DistanceConfig;
///
/// let config = DistanceConfig::default()
///     .with_segment_timeout(Duration::from_secs(5))
///     .with_overall_timeout(Duration::from_secs(20))
///     .with_max_concurrent_segments(NonZeroUsize::MIN);
/// assert_eq!(config.overall_timeout, Some(Duration::from_secs(20)));
/// assert_eq!(config.max_concurrent_segments.get(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DistanceConfig {
    /// Budget for each segment lookup.
    pub segment_timeout: Duration,
    /// Budget for the whole computation. Segments still pending when it
    /// elapses fall back to the geodesic estimate.
    pub overall_timeout: Option<Duration>,
    /// Most segment lookups allowed in flight at once. The per-segment
    /// budget starts once a lookup is admitted; the overall budget also
    /// covers time spent queued.
    pub max_concurrent_segments: NonZeroUsize,
}

impl Default for DistanceConfig {
    fn default() -> Self {
        Self {
            segment_timeout: DEFAULT_SEGMENT_TIMEOUT,
            overall_timeout: None,
            max_concurrent_segments: DEFAULT_MAX_CONCURRENT_SEGMENTS,
        }
    }
}

impl DistanceConfig {
    /// Set the per-segment budget.
    #[must_use]
    pub const fn with_segment_timeout(mut self, timeout: Duration) -> Self {
        self.segment_timeout = timeout;
        self
    }

    /// Set the overall budget.
    #[must_use]
    pub const fn with_overall_timeout(mut self, timeout: Duration) -> Self {
        self.overall_timeout = Some(timeout);
        self
    }

    /// Set the cap on lookups in flight at once.
    #[must_use]
    pub const fn with_max_concurrent_segments(mut self, limit: NonZeroUsize) -> Self {
        self.max_concurrent_segments = limit;
        self
    }
}

/// Build the ordered waypoint list for an itinerary.
///
/// When `start` is supplied it becomes the first waypoint, followed by the
/// places in the order given. Any place with invalid coordinates rejects the
/// whole request.
///
/// # Examples
/// ```
/// use waymark_core::{Place, Waypoint, waypoints_from_places};
///
/// let places = vec![Place::new("a", "Fort", 26.98, 75.85)];
/// let start = Waypoint::new(26.91, 75.78)?;
///
/// let waypoints = waypoints_from_places(&places, Some(start))?;
/// assert_eq!(waypoints.len(), 2);
/// assert_eq!(waypoints.first(), Some(&start));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn waypoints_from_places(
    places: &[Place],
    start: Option<Waypoint>,
) -> Result<Vec<Waypoint>, InputError> {
    let mut waypoints = Vec::with_capacity(places.len() + usize::from(start.is_some()));
    waypoints.extend(start);
    for (index, place) in places.iter().enumerate() {
        let waypoint =
            Waypoint::try_from(place).map_err(|source| InputError::InvalidPlaceCoordinates {
                index,
                id: place.id.clone(),
                source,
            })?;
        waypoints.push(waypoint);
    }
    Ok(waypoints)
}
