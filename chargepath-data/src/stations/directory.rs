//! `StationDirectory` backed by the EV charging-station lookup API.

use std::time::Duration;

use async_trait::async_trait;
use chargepath_core::{AuthProvider, ChargingStation, StationDirectory, StationError};
use futures_util::future::try_join_all;
use geo::{Coord, Distance, Haversine, Point};
use reqwest::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION};

use super::StationRegion;
use super::wire::{StationEnvelope, StationQuery};
use crate::http::{DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT, ProviderBuildError, RequestFailure, build_client};

/// Configuration for [`HttpStationDirectory`].
#[derive(Debug, Clone)]
pub struct HttpStationDirectoryConfig {
    /// Lookup endpoint receiving the `POST` requests.
    pub url: String,
    /// Request timeout duration.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl HttpStationDirectoryConfig {
    /// Create a new configuration for the given endpoint.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
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

/// Station directory querying the lookup API over HTTP.
///
/// Every request first asks the [`AuthProvider`] for a token and sends it
/// verbatim as the `Authorization` header. The service may return stations
/// outside the requested radius; those are dropped while the service's
/// ordering of the rest is kept.
#[derive(Debug, Clone)]
pub struct HttpStationDirectory<A> {
    client: Client,
    config: HttpStationDirectoryConfig,
    auth: A,
}

impl<A: AuthProvider> HttpStationDirectory<A> {
    /// Create a directory for `url` with default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(url: impl Into<String>, auth: A) -> Result<Self, ProviderBuildError> {
        Self::with_config(HttpStationDirectoryConfig::new(url), auth)
    }

    /// Create a directory with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn with_config(config: HttpStationDirectoryConfig, auth: A) -> Result<Self, ProviderBuildError> {
        let client = build_client(&config.user_agent, config.timeout)?;
        Ok(Self {
            client,
            config,
            auth,
        })
    }

    /// The directory's configuration.
    #[must_use]
    pub const fn config(&self) -> &HttpStationDirectoryConfig {
        &self.config
    }

    /// List every station registered in the given regions.
    ///
    /// Regions are queried concurrently and their stations concatenated in
    /// the order the regions were given.
    ///
    /// # Errors
    ///
    /// Fails with the first error raised by any region's lookup.
    pub async fn find_in_regions(
        &self,
        regions: &[StationRegion],
    ) -> Result<Vec<ChargingStation>, StationError> {
        let batches = try_join_all(
            regions
                .iter()
                .map(|region| self.lookup(StationQuery::in_region(region))),
        )
        .await?;
        Ok(batches.into_iter().flatten().collect())
    }

    async fn lookup(&self, query: StationQuery) -> Result<Vec<ChargingStation>, StationError> {
        let token = self.auth.token().await?;
        let url = self.config.url.as_str();
        let timeout = self.config.timeout;
        log::debug!("querying stations at {url}");

        let response = self
            .client
            .post(url)
            .header(ACCEPT, "application/json")
            .header(AUTHORIZATION, token)
            .json(&query)
            .send()
            .await
            .map_err(|err| RequestFailure::classify(&err, url, timeout))?
            .error_for_status()
            .map_err(|err| RequestFailure::classify(&err, url, timeout))?;

        let envelope: StationEnvelope =
            response
                .json()
                .await
                .map_err(|err| StationError::ParseError {
                    message: err.to_string(),
                })?;
        Ok(envelope
            .into_records()
            .into_iter()
            .map(ChargingStation::from)
            .collect())
    }
}

#[async_trait]
impl<A: AuthProvider> StationDirectory for HttpStationDirectory<A> {
    async fn find_near(
        &self,
        location: Coord<f64>,
        radius_km: f64,
    ) -> Result<Vec<ChargingStation>, StationError> {
        let stations = self.lookup(StationQuery::near(location)).await?;
        Ok(within_radius(stations, location, radius_km))
    }
}

/// Keep stations whose great-circle distance from `centre` is at most
/// `radius_km`, preserving order.
#[expect(
    clippy::float_arithmetic,
    reason = "unit conversion from kilometres to metres"
)]
fn within_radius(
    stations: Vec<ChargingStation>,
    centre: Coord<f64>,
    radius_km: f64,
) -> Vec<ChargingStation> {
    let centre = Point::from(centre);
    let radius_m = radius_km * 1000.0;
    stations
        .into_iter()
        .filter(|station| Haversine.distance(centre, Point::from(station.location)) <= radius_m)
        .collect()
}
