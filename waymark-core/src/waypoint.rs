//! Validated coordinate pairs used as stops in distance computation.

use geo::Coord;
use thiserror::Error;

use crate::Place;

/// Errors returned by [`Waypoint::new`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum WaypointError {
    /// Latitude was non-finite or outside `[-90, 90]`.
    #[error("latitude {value} is outside [-90, 90]")]
    LatitudeOutOfRange {
        /// Rejected latitude.
        value: f64,
    },
    /// Longitude was non-finite or outside `[-180, 180]`.
    #[error("longitude {value} is outside [-180, 180]")]
    LongitudeOutOfRange {
        /// Rejected longitude.
        value: f64,
    },
}

/// A stop on a route.
///
/// The location is stored as a [`Coord`] with `x = longitude` and
/// `y = latitude`, matching the rest of the `geo` ecosystem.
///
/// # Examples
/// ```
/// use waymark_core::Waypoint;
///
/// let jaipur = Waypoint::new(26.9124, 75.7873)?;
/// assert_eq!(jaipur.latitude(), 26.9124);
/// assert!(Waypoint::new(91.0, 0.0).is_err());
/// # Ok::<(), waymark_core::WaypointError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Waypoint {
    location: Coord<f64>,
}

impl Waypoint {
    /// Validate and construct a waypoint from degrees.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, WaypointError> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(WaypointError::LatitudeOutOfRange { value: latitude });
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(WaypointError::LongitudeOutOfRange { value: longitude });
        }
        Ok(Self {
            location: Coord {
                x: longitude,
                y: latitude,
            },
        })
    }

    /// Validate a `geo` coordinate (`x = longitude`, `y = latitude`).
    pub fn from_coord(coord: Coord<f64>) -> Result<Self, WaypointError> {
        Self::new(coord.y, coord.x)
    }

    /// Latitude in degrees.
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.location.y
    }

    /// Longitude in degrees.
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.location.x
    }

    /// The underlying coordinate.
    #[must_use]
    pub const fn location(&self) -> Coord<f64> {
        self.location
    }
}

impl TryFrom<&Place> for Waypoint {
    type Error = WaypointError;

    fn try_from(place: &Place) -> Result<Self, Self::Error> {
        Self::new(place.latitude, place.longitude)
    }
}
