use thiserror::Error;

/// Errors from [`crate::routing::RouteProvider::route_geometry`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// The request did not complete within its time budget.
    #[error("routing request timed out after {timeout_ms} ms")]
    Timeout {
        /// Budget that elapsed, in milliseconds.
        timeout_ms: u64,
    },
    /// The service could not be reached.
    #[error("network error contacting {url}: {message}")]
    NetworkError {
        /// Requested URL.
        url: String,
        /// Transport error description.
        message: String,
    },
    /// The service answered with a non-success HTTP status.
    #[error("HTTP {status} from {url}: {message}")]
    HttpError {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Error description.
        message: String,
    },
    /// The service answered but reported a routing failure.
    #[error("routing service returned {code}: {message}")]
    ServiceError {
        /// Service status code, e.g. `"NoRoute"`.
        code: String,
        /// Service message, possibly empty.
        message: String,
    },
    /// The response payload could not be decoded.
    #[error("failed to parse routing response: {message}")]
    ParseError {
        /// Decoder error description.
        message: String,
    },
    /// The response contained no usable path geometry.
    #[error("routing response contained no geometry")]
    EmptyGeometry,
    /// The path geometry contained coordinates outside the valid range.
    #[error("routing response contained an invalid coordinate")]
    InvalidGeometry,
}
