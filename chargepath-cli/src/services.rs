//! Service wiring and output helpers shared by the CLI subcommands.

use std::fmt;
use std::future::Future;
use std::io::Write;
use std::sync::Arc;

use camino::Utf8Path;
use chargepath_core::{RouteProvider, StationDirectory};
use chargepath_data::{
    HttpStationDirectory, LoginAuthConfig, LoginAuthProvider, OsrmRouteProvider, ProviderBuildError,
};
use serde::Serialize;

use crate::CliError;

/// Base URL used when no OSRM server is configured.
pub(crate) const DEFAULT_OSRM_BASE_URL: &str = "http://localhost:5000";

/// Endpoint of the routing service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RoutingConfig {
    pub(crate) osrm_base_url: String,
}

/// Endpoints and credentials of the station lookup service.
#[derive(Clone, PartialEq, Eq)]
pub(crate) struct StationServiceConfig {
    pub(crate) stations_url: String,
    pub(crate) login_url: String,
    pub(crate) username: String,
    pub(crate) password: String,
    pub(crate) app_token: Option<String>,
}

impl fmt::Debug for StationServiceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StationServiceConfig")
            .field("stations_url", &self.stations_url)
            .field("login_url", &self.login_url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("app_token", &self.app_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Builds the planner's collaborators for the current invocation.
pub(crate) trait PlanServicesBuilder {
    fn route_provider(&self, config: &RoutingConfig) -> Result<Arc<dyn RouteProvider>, CliError>;

    fn station_directory(
        &self,
        config: &StationServiceConfig,
    ) -> Result<Arc<dyn StationDirectory>, CliError>;
}

/// Builds the HTTP adapters from `chargepath-data`.
pub(crate) struct DefaultPlanServicesBuilder;

impl PlanServicesBuilder for DefaultPlanServicesBuilder {
    fn route_provider(&self, config: &RoutingConfig) -> Result<Arc<dyn RouteProvider>, CliError> {
        let provider = OsrmRouteProvider::new(config.osrm_base_url.clone()).map_err(|source| {
            CliError::BuildRouteProvider {
                base_url: config.osrm_base_url.clone(),
                source,
            }
        })?;
        Ok(Arc::new(provider))
    }

    fn station_directory(
        &self,
        config: &StationServiceConfig,
    ) -> Result<Arc<dyn StationDirectory>, CliError> {
        let build_error = |source: ProviderBuildError| CliError::BuildStationDirectory {
            url: config.stations_url.clone(),
            source,
        };
        let mut login = LoginAuthConfig::new(
            config.login_url.clone(),
            config.username.clone(),
            config.password.clone(),
        );
        if let Some(app_token) = &config.app_token {
            login = login.with_app_token(app_token.clone());
        }
        let auth = LoginAuthProvider::with_config(login).map_err(build_error)?;
        let directory =
            HttpStationDirectory::new(config.stations_url.clone(), auth).map_err(build_error)?;
        Ok(Arc::new(directory))
    }
}

/// Unwrap a merged option or report which flag and variable can set it.
pub(crate) fn require<T>(
    value: Option<T>,
    field: &'static str,
    env: &'static str,
) -> Result<T, CliError> {
    value.ok_or(CliError::MissingArgument { field, env })
}

/// Reject negative or non-finite radii.
pub(crate) fn require_radius(value: f64, field: &'static str) -> Result<f64, CliError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(CliError::InvalidRadius { field, value })
    }
}

/// Drive `future` to completion on a single-threaded Tokio runtime.
pub(crate) fn block_on<F: Future>(future: F) -> Result<F::Output, CliError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(CliError::StartRuntime)?;
    Ok(runtime.block_on(future))
}

/// Print `value` as pretty JSON to `output` when set, otherwise to `writer`.
pub(crate) fn write_json<T: Serialize>(
    value: &T,
    output: Option<&Utf8Path>,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let mut payload = serde_json::to_string_pretty(value).map_err(CliError::SerialiseOutput)?;
    payload.push('\n');
    match output {
        Some(path) => {
            log::debug!("writing output to {path}");
            chargepath_fs::write_utf8_file(path, &payload).map_err(|source| {
                CliError::WriteOutputFile {
                    path: path.to_path_buf(),
                    source,
                }
            })
        }
        None => writer
            .write_all(payload.as_bytes())
            .map_err(CliError::WriteOutput),
    }
}
