//! Error types emitted by the Chargepath CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use chargepath_core::{PlanError, PlanRequestValidationError, StationError, VehicleParamsError};
use chargepath_data::ProviderBuildError;
use thiserror::Error;

/// Errors emitted by the Chargepath CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        field: &'static str,
        env: &'static str,
    },
    /// A referenced input path does not exist on disk or is not a file.
    #[error("{field} path {path:?} does not exist or is not a file")]
    MissingSourceFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        field: &'static str,
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Reading the plan request file failed.
    #[error("failed to read plan request at {path:?}: {source}")]
    OpenPlanRequest {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Plan request JSON could not be decoded.
    #[error("failed to parse plan request JSON at {path:?}: {source}")]
    ParsePlanRequest {
        path: Utf8PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// The plan request payload failed validation.
    #[error("plan request in {path:?} failed validation: {source}")]
    InvalidPlanRequest {
        path: Utf8PathBuf,
        #[source]
        source: PlanRequestValidationError,
    },
    /// Vehicle parameters from the merged configuration are out of range.
    #[error("invalid vehicle parameters: {0}")]
    InvalidVehicleParams(#[from] VehicleParamsError),
    /// A search radius is negative or not finite.
    #[error("{field} must be a non-negative number of kilometres, got {value}")]
    InvalidRadius { field: &'static str, value: f64 },
    /// The station search centre is not a longitude/latitude pair.
    #[error("coordinate (lat {lat}, lon {lon}) is not a valid latitude/longitude pair")]
    InvalidCoordinate { lat: f64, lon: f64 },
    /// Constructing the route provider failed.
    #[error("failed to build route provider for {base_url:?}: {source}")]
    BuildRouteProvider {
        base_url: String,
        #[source]
        source: ProviderBuildError,
    },
    /// Constructing the station directory or its login failed.
    #[error("failed to build station directory for {url:?}: {source}")]
    BuildStationDirectory {
        url: String,
        #[source]
        source: ProviderBuildError,
    },
    /// The async runtime could not be started.
    #[error("failed to start async runtime: {0}")]
    StartRuntime(#[source] std::io::Error),
    /// The planner could not produce a plan.
    #[error("planning failed: {source}")]
    Plan {
        #[source]
        source: PlanError,
    },
    /// The station lookup failed.
    #[error("station lookup failed: {source}")]
    StationLookup {
        #[source]
        source: StationError,
    },
    /// Serialising the command output failed.
    #[error("failed to serialise output: {0}")]
    SerialiseOutput(#[source] serde_json::Error),
    /// Writing the command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
    /// Writing the command output to a file failed.
    #[error("failed to write output to {path:?}: {source}")]
    WriteOutputFile {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
}
