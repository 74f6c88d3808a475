//! `RouteProvider` backed by OSRM's Route API.
//!
//! The provider requests turn-by-turn steps with GeoJSON geometry and turns
//! the first route's first leg into a [`RouteGeometry`]. Each step with a
//! non-zero length becomes one [`Segment`] ending at the last point of the
//! step's geometry.
//!
//! # Example
//!
//! ```no_run
//! use chargepath_data::routing::OsrmRouteProvider;
//! use chargepath_core::RouteProvider;
//! use geo::Coord;
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = OsrmRouteProvider::new("http://localhost:5000")?;
//! let route = provider
//!     .get_route(Coord { x: 77.209, y: 28.614 }, Coord { x: 75.787, y: 26.912 })
//!     .await?;
//! println!("{:.1} km in {} steps", route.total_distance_km, route.segments.len());
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use async_trait::async_trait;
use chargepath_core::{RouteError, RouteGeometry, RouteProvider, Segment};
use geo::Coord;
use reqwest::Client;

use super::osrm::{OsrmLeg, OsrmStep, RouteResponse};
use crate::http::{DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT, ProviderBuildError, RequestFailure, build_client};

/// Default OSRM routing profile.
pub const DEFAULT_PROFILE: &str = "driving";

/// Configuration for [`OsrmRouteProvider`].
#[derive(Debug, Clone)]
pub struct OsrmRouteProviderConfig {
    /// Base URL for the OSRM service (e.g., `"http://localhost:5000"`).
    pub base_url: String,
    /// Routing profile segment of the request path.
    pub profile: String,
    /// Request timeout duration.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl Default for OsrmRouteProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_owned(),
            profile: DEFAULT_PROFILE.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl OsrmRouteProviderConfig {
    /// Create a new configuration with the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the routing profile.
    #[must_use]
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = profile.into();
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// HTTP route provider using the OSRM Route API.
#[derive(Debug, Clone)]
pub struct OsrmRouteProvider {
    client: Client,
    config: OsrmRouteProviderConfig,
}

impl OsrmRouteProvider {
    /// Create a new provider with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ProviderBuildError> {
        Self::with_config(OsrmRouteProviderConfig::new(base_url))
    }

    /// Create a new provider with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn with_config(config: OsrmRouteProviderConfig) -> Result<Self, ProviderBuildError> {
        let client = build_client(&config.user_agent, config.timeout)?;
        Ok(Self { client, config })
    }

    /// The provider's configuration.
    #[must_use]
    pub const fn config(&self) -> &OsrmRouteProviderConfig {
        &self.config
    }

    /// Build the Route API URL for a single origin/destination pair.
    ///
    /// The URL format is:
    /// `{base_url}/route/v1/{profile}/{lon},{lat};{lon},{lat}?steps=true&geometries=geojson&overview=false`.
    fn build_route_url(&self, origin: Coord<f64>, destination: Coord<f64>) -> String {
        format!(
            "{}/route/v1/{}/{},{};{},{}?steps=true&geometries=geojson&overview=false",
            self.config.base_url.trim_end_matches('/'),
            self.config.profile,
            origin.x,
            origin.y,
            destination.x,
            destination.y
        )
    }

    async fn fetch_route(
        &self,
        origin: Coord<f64>,
        destination: Coord<f64>,
    ) -> Result<RouteGeometry, RouteError> {
        let url = self.build_route_url(origin, destination);
        log::debug!("requesting route from {url}");
        let timeout = self.config.timeout;

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|err| RequestFailure::classify(&err, &url, timeout))?;

        // OSRM answers `NoRoute` with a 400 status and a JSON body, so the
        // body is decoded before the status is checked.
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|err| RequestFailure::classify(&err, &url, timeout))?;
        let decoded = serde_json::from_slice::<RouteResponse>(&body);
        match decoded {
            Ok(route_response) => convert_response(route_response),
            Err(_) if !status.is_success() => Err(RouteError::HttpError {
                url,
                status: status.as_u16(),
                message: String::from_utf8_lossy(&body).into_owned(),
            }),
            Err(err) => Err(RouteError::ParseError {
                message: err.to_string(),
            }),
        }
    }
}

#[async_trait]
impl RouteProvider for OsrmRouteProvider {
    async fn get_route(
        &self,
        origin: Coord<f64>,
        destination: Coord<f64>,
    ) -> Result<RouteGeometry, RouteError> {
        self.fetch_route(origin, destination).await
    }
}

/// Convert an OSRM response into route geometry.
fn convert_response(response: RouteResponse) -> Result<RouteGeometry, RouteError> {
    if response.is_no_route() {
        return Err(RouteError::NotFound {
            message: response.message.unwrap_or_default(),
        });
    }
    if !response.is_ok() {
        return Err(RouteError::ServiceError {
            code: response.code,
            message: response.message.unwrap_or_default(),
        });
    }

    let route = response
        .routes
        .into_iter()
        .next()
        .ok_or_else(|| RouteError::NotFound {
            message: "OSRM returned no routes".to_owned(),
        })?;
    let leg = route
        .legs
        .into_iter()
        .next()
        .ok_or_else(|| RouteError::ParseError {
            message: "OSRM route has no legs".to_owned(),
        })?;
    convert_leg(leg)
}

fn convert_leg(leg: OsrmLeg) -> Result<RouteGeometry, RouteError> {
    let total_distance_km = kilometres(leg.distance)?;
    let total_duration = seconds(leg.duration)?;
    let segments = leg
        .steps
        .iter()
        .filter(|step| step.distance > 0.0)
        .map(convert_step)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(RouteGeometry::new(total_distance_km, total_duration, segments))
}

fn convert_step(step: &OsrmStep) -> Result<Segment, RouteError> {
    let [x, y] = step.end();
    Ok(Segment {
        distance_km: kilometres(step.distance)?,
        duration: seconds(step.duration)?,
        end: Coord { x, y },
    })
}

#[expect(
    clippy::float_arithmetic,
    reason = "unit conversion from metres to kilometres"
)]
fn kilometres(metres: f64) -> Result<f64, RouteError> {
    if metres.is_finite() && metres >= 0.0 {
        Ok(metres / 1000.0)
    } else {
        Err(RouteError::ParseError {
            message: format!("invalid distance {metres}"),
        })
    }
}

fn seconds(value: f64) -> Result<Duration, RouteError> {
    Duration::try_from_secs_f64(value).map_err(|_| RouteError::ParseError {
        message: format!("invalid duration {value}"),
    })
}
