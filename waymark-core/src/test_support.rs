//! Deterministic `RouteProvider` doubles used by unit, behaviour and CLI
//! tests.
//!
//! None of these providers perform network IO.

use std::future;
use std::time::Duration;

use async_trait::async_trait;
use geo::LineString;

use crate::{RouteError, RouteGeometry, RouteProvider, Waypoint};

/// Provider that returns the straight line between the two endpoints.
///
/// Network-resolved distances therefore equal the geodesic estimate.
#[derive(Default, Debug, Copy, Clone)]
pub struct StraightLineRouteProvider;

#[async_trait]
impl RouteProvider for StraightLineRouteProvider {
    async fn route_geometry(
        &self,
        from: Waypoint,
        to: Waypoint,
    ) -> Result<RouteGeometry, RouteError> {
        Ok(LineString::from(vec![from.location(), to.location()]))
    }
}

/// Provider that fails every request with the configured error.
#[derive(Debug, Clone)]
pub struct FailingRouteProvider {
    error: RouteError,
}

impl FailingRouteProvider {
    /// Fail every request with `error`.
    #[must_use]
    pub const fn with_error(error: RouteError) -> Self {
        Self { error }
    }
}

impl Default for FailingRouteProvider {
    fn default() -> Self {
        Self::with_error(RouteError::NetworkError {
            url: "http://routing.invalid/route/v1/driving".to_owned(),
            message: "connection refused".to_owned(),
        })
    }
}

#[async_trait]
impl RouteProvider for FailingRouteProvider {
    async fn route_geometry(
        &self,
        _from: Waypoint,
        _to: Waypoint,
    ) -> Result<RouteGeometry, RouteError> {
        Err(self.error.clone())
    }
}

/// Canned behaviour for one segment of a [`ScriptedRouteProvider`].
#[derive(Debug, Clone)]
pub enum ScriptedResponse {
    /// Return this geometry.
    Geometry(RouteGeometry),
    /// Return the straight line between the endpoints.
    StraightLine,
    /// Fail with this error.
    Error(RouteError),
    /// Wait, then behave like the inner response.
    Delayed(Duration, Box<ScriptedResponse>),
    /// Never answer.
    Hang,
}

/// Provider whose answer depends on the segment's starting waypoint.
///
/// Segments are matched on `from` so the script stays deterministic however
/// the estimator schedules concurrent requests.
#[derive(Debug, Clone)]
pub struct ScriptedRouteProvider {
    fallback: ScriptedResponse,
    scripted: Vec<(Waypoint, ScriptedResponse)>,
}

impl ScriptedRouteProvider {
    /// Answer every unscripted segment with `fallback`.
    #[must_use]
    pub const fn new(fallback: ScriptedResponse) -> Self {
        Self {
            fallback,
            scripted: Vec::new(),
        }
    }

    /// Answer segments starting at `from` with `response`.
    #[must_use]
    pub fn with_segment(mut self, from: Waypoint, response: ScriptedResponse) -> Self {
        self.scripted.push((from, response));
        self
    }

    fn response_for(&self, from: Waypoint) -> &ScriptedResponse {
        self.scripted
            .iter()
            .find(|(start, _)| *start == from)
            .map_or(&self.fallback, |(_, response)| response)
    }
}

#[async_trait]
impl RouteProvider for ScriptedRouteProvider {
    async fn route_geometry(
        &self,
        from: Waypoint,
        to: Waypoint,
    ) -> Result<RouteGeometry, RouteError> {
        let mut response = self.response_for(from);
        loop {
            match response {
                ScriptedResponse::Geometry(line) => return Ok(line.clone()),
                ScriptedResponse::StraightLine => {
                    return Ok(LineString::from(vec![from.location(), to.location()]));
                }
                ScriptedResponse::Error(error) => return Err(error.clone()),
                ScriptedResponse::Delayed(delay, inner) => {
                    tokio::time::sleep(*delay).await;
                    response = inner;
                }
                ScriptedResponse::Hang => future::pending::<()>().await,
            }
        }
    }
}
