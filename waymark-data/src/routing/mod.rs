//! HTTP route providers for road-network distance.
//!
//! [`HttpRouteProvider`] implements [`waymark_core::RouteProvider`] against
//! the OSRM Route API. Each call asks for the full GeoJSON geometry of the
//! fastest route between two waypoints; the estimator in `waymark-core`
//! measures the polyline and falls back to geodesic distance on any error.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use waymark_core::{DistanceConfig, DistanceEstimator, Waypoint};
//! use waymark_data::routing::{HttpRouteProvider, HttpRouteProviderConfig};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = HttpRouteProviderConfig::new("http://localhost:5000")
//!     .with_profile("driving")
//!     .with_timeout(Duration::from_secs(5));
//! let provider = HttpRouteProvider::with_config(config)?;
//! let estimator = DistanceEstimator::new(provider, DistanceConfig::default());
//!
//! let waypoints = [Waypoint::new(18.52, 73.85)?, Waypoint::new(19.07, 72.87)?];
//! let result = estimator.compute_route_distance(&waypoints).await;
//! println!("{:.1} km (exact: {})", result.total_km, result.exact);
//! # Ok(())
//! # }
//! ```

mod osrm;
mod provider;

pub use provider::{
    DEFAULT_PROFILE, DEFAULT_USER_AGENT, HttpRouteProvider, HttpRouteProviderConfig,
    ProviderBuildError,
};
