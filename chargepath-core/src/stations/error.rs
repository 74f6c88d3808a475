use thiserror::Error;

/// Errors from [`crate::stations::AuthProvider::token`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The login request could not reach the service.
    #[error("network error contacting {url}: {message}")]
    NetworkError {
        /// Login URL.
        url: String,
        /// Transport error description.
        message: String,
    },
    /// The login service did not answer in time.
    #[error("login request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Login URL.
        url: String,
        /// Configured timeout in seconds.
        timeout_secs: u64,
    },
    /// The login service rejected the credentials or failed.
    #[error("HTTP {status} from {url}: {message}")]
    HttpError {
        /// Login URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Error description.
        message: String,
    },
    /// The login succeeded but no usable token was returned.
    #[error("login response from {url} carried no authorization token")]
    MissingToken {
        /// Login URL.
        url: String,
    },
}

/// Errors from [`crate::stations::StationDirectory::find_near`].
///
/// The planner treats every variant as "no candidates at this point".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StationError {
    /// Credentials for the station service could not be obtained.
    #[error("failed to authenticate with the station service: {0}")]
    Auth(#[from] AuthError),
    /// The request could not reach the station service.
    #[error("network error contacting {url}: {message}")]
    NetworkError {
        /// Requested URL.
        url: String,
        /// Transport error description.
        message: String,
    },
    /// The station service did not answer in time.
    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Requested URL.
        url: String,
        /// Configured timeout in seconds.
        timeout_secs: u64,
    },
    /// The station service answered with a non-success HTTP status.
    #[error("HTTP {status} from {url}: {message}")]
    HttpError {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Error description.
        message: String,
    },
    /// The response could not be decoded.
    #[error("failed to parse station response: {message}")]
    ParseError {
        /// Decoder error description.
        message: String,
    },
}
