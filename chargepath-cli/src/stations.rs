//! Stations command: list charging stations around a coordinate.

use camino::Utf8PathBuf;
use chargepath_core::{ChargingStation, DEFAULT_SEARCH_RADIUS_KM, StationDirectory};
use clap::Parser;
use geo::Coord;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::services::{
    DefaultPlanServicesBuilder, PlanServicesBuilder, StationServiceConfig, block_on, require,
    require_radius, write_json,
};
use crate::{
    ARG_APP_TOKEN, ARG_LAT, ARG_LOGIN_URL, ARG_LON, ARG_OUTPUT, ARG_PASSWORD, ARG_RADIUS_KM,
    ARG_STATIONS_URL, ARG_USERNAME, CliError, ENV_STATIONS_LAT, ENV_STATIONS_LOGIN_URL,
    ENV_STATIONS_LON, ENV_STATIONS_PASSWORD, ENV_STATIONS_STATIONS_URL, ENV_STATIONS_USERNAME,
};

/// CLI arguments for the `stations` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "stations",
    long_about = "Query the charging-station lookup API around a coordinate \
                 and print the stations within the radius as JSON, in the \
                 order the service ranks them.",
    about = "List charging stations near a coordinate"
)]
#[ortho_config(prefix = "CHARGEPATH")]
pub(crate) struct StationsArgs {
    /// Latitude of the search centre.
    #[arg(long = ARG_LAT, value_name = "deg", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) lat: Option<f64>,
    /// Longitude of the search centre.
    #[arg(long = ARG_LON, value_name = "deg", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) lon: Option<f64>,
    /// Search radius in kilometres (default 50).
    #[arg(long = ARG_RADIUS_KM, value_name = "km")]
    #[serde(default)]
    pub(crate) radius_km: Option<f64>,
    /// Write the stations to this file instead of stdout.
    #[arg(long = ARG_OUTPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
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
}

impl StationsArgs {
    pub(crate) fn into_config(self) -> Result<StationsConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        StationsConfig::try_from(merged)
    }
}

/// Resolved `stations` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct StationsConfig {
    pub(crate) location: Coord<f64>,
    pub(crate) radius_km: f64,
    pub(crate) output: Option<Utf8PathBuf>,
    pub(crate) stations: StationServiceConfig,
}

impl TryFrom<StationsArgs> for StationsConfig {
    type Error = CliError;

    fn try_from(args: StationsArgs) -> Result<Self, Self::Error> {
        let lat = require(args.lat, ARG_LAT, ENV_STATIONS_LAT)?;
        let lon = require(args.lon, ARG_LON, ENV_STATIONS_LON)?;
        if !((-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lon)) {
            return Err(CliError::InvalidCoordinate { lat, lon });
        }
        let radius_km = require_radius(
            args.radius_km.unwrap_or(DEFAULT_SEARCH_RADIUS_KM),
            ARG_RADIUS_KM,
        )?;
        let stations = StationServiceConfig {
            stations_url: require(
                args.stations_url,
                ARG_STATIONS_URL,
                ENV_STATIONS_STATIONS_URL,
            )?,
            login_url: require(args.login_url, ARG_LOGIN_URL, ENV_STATIONS_LOGIN_URL)?,
            username: require(args.username, ARG_USERNAME, ENV_STATIONS_USERNAME)?,
            password: require(args.password, ARG_PASSWORD, ENV_STATIONS_PASSWORD)?,
            app_token: args.app_token,
        };

        Ok(Self {
            location: Coord { x: lon, y: lat },
            radius_km,
            output: args.output,
            stations,
        })
    }
}

pub(super) fn run_stations(args: StationsArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    let builder = DefaultPlanServicesBuilder;
    run_stations_with(args, &builder, &mut stdout)
}

pub(super) fn run_stations_with(
    args: StationsArgs,
    builder: &dyn PlanServicesBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    let stations = find_stations(&config, builder)?;
    write_json(&stations, config.output.as_deref(), writer)
}

fn find_stations(
    config: &StationsConfig,
    builder: &dyn PlanServicesBuilder,
) -> Result<Vec<ChargingStation>, CliError> {
    let directory = builder.station_directory(&config.stations)?;
    log::debug!(
        "looking up stations within {} km of {:?}",
        config.radius_km,
        config.location
    );
    block_on(directory.find_near(config.location, config.radius_km))?
        .map_err(|source| CliError::StationLookup { source })
}
