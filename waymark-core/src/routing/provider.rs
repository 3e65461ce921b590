//! Route provider trait and the polyline alias it returns.

use async_trait::async_trait;
use geo::LineString;

use super::error::RouteError;
use crate::Waypoint;

/// Ordered road-path vertices from one waypoint to the next.
pub type RouteGeometry = LineString<f64>;

/// Fetch the road-network path between two waypoints.
///
/// Implementations return the polyline of the path, starting near `from`
/// and ending near `to`. Distances are derived from the geometry rather than
/// from any total reported by the service.
///
/// Providers must be `Send + Sync` so the estimator can query several
/// segments concurrently.
///
/// # Examples
///
/// ```rust
/// use async_trait::async_trait;
/// use geo::LineString;
/// use waymark_core::{RouteError, RouteGeometry, RouteProvider, Waypoint};
///
/// struct StraightLine;
///
/// #[async_trait]
/// impl RouteProvider for StraightLine {
///     async fn route_geometry(
///         &self,
///         from: Waypoint,
///         to: Waypoint,
///     ) -> Result<RouteGeometry, RouteError> {
///         Ok(LineString::from(vec![from.location(), to.location()]))
///     }
/// }
/// ```
#[async_trait]
pub trait RouteProvider: Send + Sync {
    /// Return the road path from `from` to `to`.
    async fn route_geometry(
        &self,
        from: Waypoint,
        to: Waypoint,
    ) -> Result<RouteGeometry, RouteError>;
}
