use thiserror::Error;

/// Errors from [`crate::routing::RouteProvider::get_route`].
///
/// [`RouteError::NotFound`] means the service answered but knows no path
/// between the points; every other variant means the service itself was
/// unavailable or misbehaved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// The directions service found no route between the points.
    #[error("no route found: {message}")]
    NotFound {
        /// Explanation reported by the service.
        message: String,
    },
    /// The request could not reach the directions service.
    #[error("network error contacting {url}: {message}")]
    NetworkError {
        /// Requested URL.
        url: String,
        /// Transport error description.
        message: String,
    },
    /// The directions service did not answer in time.
    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Requested URL.
        url: String,
        /// Configured timeout in seconds.
        timeout_secs: u64,
    },
    /// The directions service answered with a non-success HTTP status.
    #[error("HTTP {status} from {url}: {message}")]
    HttpError {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Error description.
        message: String,
    },
    /// The directions service reported an error in its response body.
    #[error("routing service returned {code}: {message}")]
    ServiceError {
        /// Service-specific error code.
        code: String,
        /// Error description.
        message: String,
    },
    /// The response could not be decoded.
    #[error("failed to parse routing response: {message}")]
    ParseError {
        /// Decoder error description.
        message: String,
    },
}

impl RouteError {
    /// Return `true` when the service answered but found no route.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
