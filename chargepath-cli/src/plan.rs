//! Plan command implementation for the Chargepath CLI.

use camino::{Utf8Path, Utf8PathBuf};
use chargepath_core::{DEFAULT_SEARCH_RADIUS_KM, PlanRequest, RoutePlan, RoutePlanner, VehicleParams};
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::services::{
    DEFAULT_OSRM_BASE_URL, DefaultPlanServicesBuilder, PlanServicesBuilder, RoutingConfig,
    StationServiceConfig, block_on, require, require_radius, write_json,
};
use crate::{
    ARG_APP_TOKEN, ARG_FULL_RANGE_KM, ARG_LOGIN_URL, ARG_MAX_CANDIDATES, ARG_OSRM_BASE_URL,
    ARG_OUTPUT, ARG_PASSWORD, ARG_PLAN_REQUEST, ARG_SAFETY_THRESHOLD_PERCENT, ARG_SEARCH_FRACTION,
    ARG_SEARCH_RADIUS_KM, ARG_STATIONS_URL, ARG_USERNAME, CliError, ENV_PLAN_LOGIN_URL,
    ENV_PLAN_PASSWORD, ENV_PLAN_REQUEST, ENV_PLAN_STATIONS_URL, ENV_PLAN_USERNAME,
};

/// CLI arguments for the `plan` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "plan",
    long_about = "Plan charging stops for a trip. The request is a JSON-encoded \
                 PlanRequest holding the origin, destination and departure \
                 battery percentage. Routes come from an OSRM server and \
                 candidate stations from the charging-station lookup API.",
    about = "Plan charging stops for a trip"
)]
#[ortho_config(prefix = "CHARGEPATH")]
pub(crate) struct PlanArgs {
    /// Path to a JSON file containing a PlanRequest.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) request_path: Option<Utf8PathBuf>,
    /// Write the plan to this file instead of stdout.
    #[arg(long = ARG_OUTPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
    /// Base URL for the OSRM server (e.g. "http://localhost:5000").
    #[arg(long = ARG_OSRM_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) osrm_base_url: Option<String>,
    /// Station lookup endpoint.
    #[arg(long = ARG_STATIONS_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) stations_url: Option<String>,
    /// Login endpoint issuing station API tokens.
    #[arg(long = ARG_LOGIN_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) login_url: Option<String>,
    /// Station API account name.
    #[arg(long = ARG_USERNAME, value_name = "name")]
    #[serde(default)]
    pub(crate) username: Option<String>,
    /// Station API account password.
    #[arg(long = ARG_PASSWORD, value_name = "password")]
    #[serde(default)]
    pub(crate) password: Option<String>,
    /// Application credential sent with the login request.
    #[arg(long = ARG_APP_TOKEN, value_name = "token")]
    #[serde(default)]
    pub(crate) app_token: Option<String>,
    /// Radius of each station lookup in kilometres (default 50).
    #[arg(long = ARG_SEARCH_RADIUS_KM, value_name = "km")]
    #[serde(default)]
    pub(crate) search_radius_km: Option<f64>,
    /// Range on a full charge in kilometres (default 300).
    #[arg(long = ARG_FULL_RANGE_KM, value_name = "km")]
    #[serde(default)]
    pub(crate) full_range_km: Option<f64>,
    /// Battery reserve to keep, in percent (default 20).
    #[arg(long = ARG_SAFETY_THRESHOLD_PERCENT, value_name = "percent")]
    #[serde(default)]
    pub(crate) safety_threshold_percent: Option<f64>,
    /// Fraction of the current range driven before a stop is sought (default 0.7).
    #[arg(long = ARG_SEARCH_FRACTION, value_name = "fraction")]
    #[serde(default)]
    pub(crate) search_fraction: Option<f64>,
    /// Candidate stations evaluated per search point (default 3).
    #[arg(long = ARG_MAX_CANDIDATES, value_name = "count")]
    #[serde(default)]
    pub(crate) max_candidates: Option<usize>,
}

impl PlanArgs {
    pub(crate) fn into_config(self) -> Result<PlanConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        PlanConfig::try_from(merged)
    }
}

/// Resolved `plan` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PlanConfig {
    /// Path to the JSON request file.
    pub(crate) request_path: Utf8PathBuf,
    /// Optional output file; stdout when absent.
    pub(crate) output: Option<Utf8PathBuf>,
    pub(crate) routing: RoutingConfig,
    pub(crate) stations: StationServiceConfig,
    pub(crate) vehicle: VehicleParams,
    pub(crate) search_radius_km: f64,
}

impl PlanConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        Self::require_existing(&self.request_path, ARG_PLAN_REQUEST)
    }

    fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
        match chargepath_fs::file_is_file(path) {
            Ok(true) => Ok(()),
            Ok(false) => Err(CliError::SourcePathNotFile {
                field,
                path: path.to_path_buf(),
            }),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                Err(CliError::MissingSourceFile {
                    field,
                    path: path.to_path_buf(),
                })
            }
            Err(source) => Err(CliError::InspectSourcePath {
                field,
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

impl TryFrom<PlanArgs> for PlanConfig {
    type Error = CliError;

    fn try_from(args: PlanArgs) -> Result<Self, Self::Error> {
        let request_path = require(args.request_path, ARG_PLAN_REQUEST, ENV_PLAN_REQUEST)?;
        let stations = StationServiceConfig {
            stations_url: require(args.stations_url, ARG_STATIONS_URL, ENV_PLAN_STATIONS_URL)?,
            login_url: require(args.login_url, ARG_LOGIN_URL, ENV_PLAN_LOGIN_URL)?,
            username: require(args.username, ARG_USERNAME, ENV_PLAN_USERNAME)?,
            password: require(args.password, ARG_PASSWORD, ENV_PLAN_PASSWORD)?,
            app_token: args.app_token,
        };
        let routing = RoutingConfig {
            osrm_base_url: args
                .osrm_base_url
                .unwrap_or_else(|| DEFAULT_OSRM_BASE_URL.to_owned()),
        };

        let defaults = VehicleParams::default();
        let vehicle = VehicleParams::new(
            args.full_range_km.unwrap_or(defaults.full_range_km()),
            args.safety_threshold_percent
                .unwrap_or(defaults.safety_threshold_percent()),
            args.search_fraction.unwrap_or(defaults.search_fraction()),
            args.max_candidates
                .unwrap_or(defaults.max_candidates_per_stop()),
        )?;
        let search_radius_km = require_radius(
            args.search_radius_km.unwrap_or(DEFAULT_SEARCH_RADIUS_KM),
            ARG_SEARCH_RADIUS_KM,
        )?;

        Ok(Self {
            request_path,
            output: args.output,
            routing,
            stations,
            vehicle,
            search_radius_km,
        })
    }
}

pub(super) fn run_plan(args: PlanArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    let builder = DefaultPlanServicesBuilder;
    run_plan_with(args, &builder, &mut stdout)
}

pub(super) fn run_plan_with(
    args: PlanArgs,
    builder: &dyn PlanServicesBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = resolve_plan_config(args)?;
    let plan = execute_plan(&config, builder)?;
    write_json(&plan, config.output.as_deref(), writer)
}

fn execute_plan(
    config: &PlanConfig,
    builder: &dyn PlanServicesBuilder,
) -> Result<RoutePlan, CliError> {
    let request = load_plan_request(&config.request_path)?;
    request
        .validate()
        .map_err(|source| CliError::InvalidPlanRequest {
            path: config.request_path.clone(),
            source,
        })?;

    let routes = builder.route_provider(&config.routing)?;
    let stations = builder.station_directory(&config.stations)?;
    let planner =
        RoutePlanner::new(routes, stations).with_search_radius_km(config.search_radius_km);

    log::debug!(
        "planning trip from {:?} to {:?} at {}% charge",
        request.trip.origin,
        request.trip.destination,
        request.battery.percent()
    );
    block_on(planner.plan_request(&request, &config.vehicle))?
        .map_err(|source| CliError::Plan { source })
}

fn resolve_plan_config(args: PlanArgs) -> Result<PlanConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

/// Loads a JSON-encoded [`PlanRequest`] from disk.
pub(super) fn load_plan_request(path: &Utf8Path) -> Result<PlanRequest, CliError> {
    let contents =
        chargepath_fs::read_utf8_file(path).map_err(|source| CliError::OpenPlanRequest {
            path: path.to_path_buf(),
            source,
        })?;
    serde_json::from_str(&contents).map_err(|source| CliError::ParsePlanRequest {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<PlanConfig, CliError> {
    let merged = PlanArgs::merge_from_layers(layers).map_err(CliError::from)?;
    PlanConfig::try_from(merged)
}
