//! Great-circle distances between waypoints.
//!
//! Distances use the haversine formula over `geo`'s mean Earth radius and are
//! reported in kilometres.

use geo::{Coord, Distance, Haversine, LineString, Point};

use crate::Waypoint;

const METRES_PER_KILOMETRE: f64 = 1000.0;

/// Great-circle distance between two waypoints in kilometres.
///
/// The result is symmetric and zero for identical waypoints.
///
/// # Examples
/// ```
/// use waymark_core::{Waypoint, compute_geodesic_segment};
///
/// let mumbai = Waypoint::new(19.0760, 72.8777)?;
/// let pune = Waypoint::new(18.5204, 73.8567)?;
///
/// let km = compute_geodesic_segment(mumbai, pune);
/// assert!((km - 120.0).abs() < 2.0);
/// assert_eq!(compute_geodesic_segment(mumbai, mumbai), 0.0);
/// # Ok::<(), waymark_core::WaypointError>(())
/// ```
#[must_use]
pub fn compute_geodesic_segment(a: Waypoint, b: Waypoint) -> f64 {
    coord_distance_km(a.location(), b.location())
}

/// Length of a polyline in kilometres, summing the great-circle distance
/// between consecutive vertices.
///
/// Lines with fewer than two vertices have zero length.
#[must_use]
pub fn polyline_length_km(line: &LineString<f64>) -> f64 {
    line.lines()
        .map(|segment| coord_distance_km(segment.start, segment.end))
        .fold(0.0, |total, km| total + km)
}

fn coord_distance_km(a: Coord<f64>, b: Coord<f64>) -> f64 {
    Haversine.distance(Point::from(a), Point::from(b)) / METRES_PER_KILOMETRE
}
