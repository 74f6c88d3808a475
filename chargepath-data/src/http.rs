//! Client construction and transport error classification shared by the
//! HTTP adapters.

use std::time::Duration;

use chargepath_core::{AuthError, RouteError, StationError};
use reqwest::Client;
use thiserror::Error;

/// Default user agent for outgoing requests.
pub const DEFAULT_USER_AGENT: &str = "chargepath/0.1";

/// Default request timeout in seconds.
pub(crate) const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Error returned when an adapter's HTTP client cannot be built.
#[derive(Debug, Error)]
pub enum ProviderBuildError {
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}

/// Build a client with the adapter's user agent and timeouts.
pub(crate) fn build_client(user_agent: &str, timeout: Duration) -> Result<Client, ProviderBuildError> {
    Client::builder()
        .user_agent(user_agent)
        .connect_timeout(timeout)
        .timeout(timeout)
        .build()
        .map_err(ProviderBuildError::HttpClient)
}

/// Transport-level failure of a single request, independent of the adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum RequestFailure {
    Timeout {
        url: String,
        timeout_secs: u64,
    },
    Http {
        url: String,
        status: u16,
        message: String,
    },
    Network {
        url: String,
        message: String,
    },
}

impl RequestFailure {
    /// Classify a `reqwest` error raised while requesting `url`.
    pub(crate) fn classify(error: &reqwest::Error, url: &str, timeout: Duration) -> Self {
        if error.is_timeout() {
            return Self::Timeout {
                url: url.to_owned(),
                timeout_secs: timeout.as_secs(),
            };
        }
        if let Some(status) = error.status() {
            return Self::Http {
                url: url.to_owned(),
                status: status.as_u16(),
                message: error.to_string(),
            };
        }
        Self::Network {
            url: url.to_owned(),
            message: error.to_string(),
        }
    }
}

impl From<RequestFailure> for RouteError {
    fn from(failure: RequestFailure) -> Self {
        match failure {
            RequestFailure::Timeout { url, timeout_secs } => Self::Timeout { url, timeout_secs },
            RequestFailure::Http {
                url,
                status,
                message,
            } => Self::HttpError {
                url,
                status,
                message,
            },
            RequestFailure::Network { url, message } => Self::NetworkError { url, message },
        }
    }
}

impl From<RequestFailure> for StationError {
    fn from(failure: RequestFailure) -> Self {
        match failure {
            RequestFailure::Timeout { url, timeout_secs } => Self::Timeout { url, timeout_secs },
            RequestFailure::Http {
                url,
                status,
                message,
            } => Self::HttpError {
                url,
                status,
                message,
            },
            RequestFailure::Network { url, message } => Self::NetworkError { url, message },
        }
    }
}

impl From<RequestFailure> for AuthError {
    fn from(failure: RequestFailure) -> Self {
        match failure {
            RequestFailure::Timeout { url, timeout_secs } => Self::Timeout { url, timeout_secs },
            RequestFailure::Http {
                url,
                status,
                message,
            } => Self::HttpError {
                url,
                status,
                message,
            },
            RequestFailure::Network { url, message } => Self::NetworkError { url, message },
        }
    }
}
