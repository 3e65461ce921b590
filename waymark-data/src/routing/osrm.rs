//! OSRM API response types for the Route service.
//!
//! Only the fields needed to recover the path geometry are decoded. Requests
//! ask for `geometries=geojson`, so each route carries a GeoJSON
//! `LineString` whose coordinates are `[longitude, latitude]` pairs.
//!
//! See: <http://project-osrm.org/docs/v5.24.0/api/#route-service>

use geo::{Coord, LineString};
use serde::Deserialize;

/// OSRM Route API response.
#[derive(Debug, Deserialize)]
pub struct RouteResponse {
    /// Status code from OSRM, `"Ok"` on success.
    pub code: String,

    /// Optional error message when `code` is not `"Ok"`.
    pub message: Option<String>,

    /// Candidate routes, fastest first.
    #[serde(default)]
    pub routes: Vec<Route>,
}

/// A single route candidate.
#[derive(Debug, Deserialize)]
pub struct Route {
    /// Path geometry; absent when `overview=false` was requested.
    pub geometry: Option<GeoJsonLine>,
}

/// GeoJSON `LineString` geometry.
#[derive(Debug, Deserialize)]
pub struct GeoJsonLine {
    /// Vertices as `[longitude, latitude]` pairs.
    pub coordinates: Vec<[f64; 2]>,
}

impl RouteResponse {
    /// Check if the response indicates success.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.code == "Ok"
    }

    /// Geometry of the first route, if any.
    #[must_use]
    pub fn into_first_geometry(self) -> Option<LineString<f64>> {
        let line = self.routes.into_iter().next()?.geometry?;
        Some(
            line.coordinates
                .into_iter()
                .map(|[x, y]| Coord { x, y })
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialise_success_response() {
        let json = r#"{
            "code": "Ok",
            "routes": [{
                "distance": 1520.4,
                "duration": 210.0,
                "geometry": {
                    "type": "LineString",
                    "coordinates": [[73.85, 18.52], [73.86, 18.53], [73.87, 18.55]]
                }
            }],
            "waypoints": []
        }"#;

        let response: RouteResponse = serde_json::from_str(json).expect("should deserialise");

        assert!(response.is_ok());
        let line = response.into_first_geometry().expect("should have geometry");
        assert_eq!(line.0.len(), 3);
        assert_eq!(line.0.first(), Some(&Coord { x: 73.85, y: 18.52 }));
    }

    #[test]
    fn deserialise_error_response() {
        let json = r#"{
            "code": "NoRoute",
            "message": "Impossible route between points"
        }"#;

        let response: RouteResponse = serde_json::from_str(json).expect("should deserialise");

        assert!(!response.is_ok());
        assert_eq!(
            response.message.as_deref(),
            Some("Impossible route between points")
        );
        assert!(response.into_first_geometry().is_none());
    }

    #[test]
    fn route_without_geometry_yields_none() {
        let json = r#"{"code": "Ok", "routes": [{"distance": 10.0}]}"#;

        let response: RouteResponse = serde_json::from_str(json).expect("should deserialise");

        assert!(response.into_first_geometry().is_none());
    }
}
