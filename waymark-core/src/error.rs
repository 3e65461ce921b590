//! Input validation errors shared by the distance, budget and statistics
//! operations.

use thiserror::Error;

use crate::WaypointError;

/// Errors raised when a request cannot be computed from the supplied input.
///
/// These reject the whole request; the engine never substitutes zero for a
/// malformed value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    /// A place carried a non-finite numeric field (NaN or infinity).
    #[error("place {index} ({id}) has a non-finite {field}")]
    NonFiniteValue {
        /// Position of the place in the supplied list.
        index: usize,
        /// Identifier of the offending place.
        id: String,
        /// Name of the rejected field.
        field: &'static str,
    },
    /// A place's coordinates could not be turned into a waypoint.
    #[error("place {index} ({id}) has invalid coordinates: {source}")]
    InvalidPlaceCoordinates {
        /// Position of the place in the supplied list.
        index: usize,
        /// Identifier of the offending place.
        id: String,
        /// Coordinate validation failure.
        #[source]
        source: WaypointError,
    },
    /// The caller-supplied starting location was invalid.
    #[error("starting location is invalid: {0}")]
    InvalidStart(#[source] WaypointError),
    /// The travelling group must contain at least one person.
    #[error("group size must be at least 1")]
    ZeroGroupSize,
    /// The distance was negative, NaN or infinite.
    #[error("distance must be a finite, non-negative number of kilometres, got {value}")]
    InvalidDistance {
        /// Rejected distance value.
        value: f64,
    },
    /// The requested tier id is not present in the tier table.
    #[error("unknown budget tier '{id}'")]
    UnknownTier {
        /// Requested tier identifier.
        id: String,
    },
}
