//! Fetch road-network geometry between pairs of waypoints.
//!
//! The `RouteProvider` trait abstracts an external routing service. Callers
//! supply two [`Waypoint`](crate::Waypoint) values and receive the ordered
//! polyline of the road path between them, or a [`RouteError`] when the
//! service cannot answer.
//!
//! Providers are best-effort dependencies: the distance estimator treats
//! every error as a signal to fall back to a geodesic estimate.

mod error;
mod provider;

pub use error::RouteError;
pub use provider::{RouteGeometry, RouteProvider};
