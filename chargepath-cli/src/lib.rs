//! Command-line interface for the Chargepath planner.
//!
//! `chargepath plan` answers whether a trip can be completed on the current
//! charge and where to stop if not. `chargepath stations` lists charging
//! stations around a coordinate. Service endpoints, credentials and vehicle
//! parameters come from CLI flags, `CHARGEPATH_*` environment variables or a
//! configuration file.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod plan;
mod services;
mod stations;

pub use error::CliError;

use plan::{PlanArgs, run_plan};
use stations::{StationsArgs, run_stations};

pub(crate) const ARG_PLAN_REQUEST: &str = "request";
pub(crate) const ARG_OUTPUT: &str = "output";
pub(crate) const ARG_OSRM_BASE_URL: &str = "osrm-base-url";
pub(crate) const ARG_STATIONS_URL: &str = "stations-url";
pub(crate) const ARG_LOGIN_URL: &str = "login-url";
pub(crate) const ARG_USERNAME: &str = "username";
pub(crate) const ARG_PASSWORD: &str = "password";
pub(crate) const ARG_APP_TOKEN: &str = "app-token";
pub(crate) const ARG_SEARCH_RADIUS_KM: &str = "search-radius-km";
pub(crate) const ARG_FULL_RANGE_KM: &str = "full-range-km";
pub(crate) const ARG_SAFETY_THRESHOLD_PERCENT: &str = "safety-threshold-percent";
pub(crate) const ARG_SEARCH_FRACTION: &str = "search-fraction";
pub(crate) const ARG_MAX_CANDIDATES: &str = "max-candidates";
pub(crate) const ARG_LAT: &str = "lat";
pub(crate) const ARG_LON: &str = "lon";
pub(crate) const ARG_RADIUS_KM: &str = "radius-km";

pub(crate) const ENV_PLAN_REQUEST: &str = "CHARGEPATH_CMDS_PLAN_REQUEST_PATH";
pub(crate) const ENV_PLAN_STATIONS_URL: &str = "CHARGEPATH_CMDS_PLAN_STATIONS_URL";
pub(crate) const ENV_PLAN_LOGIN_URL: &str = "CHARGEPATH_CMDS_PLAN_LOGIN_URL";
pub(crate) const ENV_PLAN_USERNAME: &str = "CHARGEPATH_CMDS_PLAN_USERNAME";
pub(crate) const ENV_PLAN_PASSWORD: &str = "CHARGEPATH_CMDS_PLAN_PASSWORD";
pub(crate) const ENV_STATIONS_LAT: &str = "CHARGEPATH_CMDS_STATIONS_LAT";
pub(crate) const ENV_STATIONS_LON: &str = "CHARGEPATH_CMDS_STATIONS_LON";
pub(crate) const ENV_STATIONS_STATIONS_URL: &str = "CHARGEPATH_CMDS_STATIONS_STATIONS_URL";
pub(crate) const ENV_STATIONS_LOGIN_URL: &str = "CHARGEPATH_CMDS_STATIONS_LOGIN_URL";
pub(crate) const ENV_STATIONS_USERNAME: &str = "CHARGEPATH_CMDS_STATIONS_USERNAME";
pub(crate) const ENV_STATIONS_PASSWORD: &str = "CHARGEPATH_CMDS_STATIONS_PASSWORD";

/// Run the Chargepath CLI with the current process arguments and environment.
///
/// # Errors
///
/// Returns [`CliError`] when argument parsing, configuration, planning or
/// writing the output fails.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Plan(args) => run_plan(args),
        Command::Stations(args) => run_stations(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "chargepath",
    about = "Plan charging stops for electric-vehicle trips",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Plan charging stops for a trip described in a JSON request.
    Plan(PlanArgs),
    /// List charging stations around a coordinate.
    Stations(StationsArgs),
}

#[cfg(test)]
mod tests;
