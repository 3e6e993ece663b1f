//! Proximity command implementation for the Waymark CLI.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use waymark_core::{DEFAULT_TOLERANCE, build_distance_matrix, find_within_tolerance, unroll};
use waymark_data::load_segments;

use crate::output::{emit_report, require_existing};
use crate::{
    ARG_OUTPUT, ARG_REFERENCE, ARG_SEGMENTS, ARG_TOLERANCE, CliError, ENV_PROXIMITY_REFERENCE,
    ENV_PROXIMITY_SEGMENTS,
};

/// CLI arguments for the `proximity` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Average the outgoing distances of every location and list \
                 those whose average falls within a relative tolerance of \
                 the reference location's average.",
    about = "Find locations with a similar average distance"
)]
#[ortho_config(prefix = "WAYMARK")]
pub(crate) struct ProximityArgs {
    /// CSV file with `id_start,id_end,distance` rows.
    #[arg(long = ARG_SEGMENTS, value_name = "path")]
    #[serde(default)]
    pub(crate) segments: Option<Utf8PathBuf>,
    /// Location whose average distance anchors the band.
    #[arg(long = ARG_REFERENCE, value_name = "id", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) reference: Option<i64>,
    /// Relative half-width of the band (defaults to 0.1).
    #[arg(long = ARG_TOLERANCE, value_name = "ratio")]
    #[serde(default)]
    pub(crate) tolerance: Option<f64>,
    /// Write the report to this file instead of standard output.
    #[arg(long = ARG_OUTPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
}

impl ProximityArgs {
    pub(crate) fn into_config(self) -> Result<ProximityConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ProximityConfig::try_from(merged)
    }
}

/// Resolved `proximity` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ProximityConfig {
    pub(crate) segments: Utf8PathBuf,
    pub(crate) reference: i64,
    pub(crate) tolerance: f64,
    pub(crate) output: Option<Utf8PathBuf>,
}

impl ProximityConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        require_existing(&self.segments, ARG_SEGMENTS)
    }
}

impl TryFrom<ProximityArgs> for ProximityConfig {
    type Error = CliError;

    fn try_from(args: ProximityArgs) -> Result<Self, Self::Error> {
        let segments = args.segments.ok_or(CliError::MissingArgument {
            field: ARG_SEGMENTS,
            env: ENV_PROXIMITY_SEGMENTS,
        })?;
        let reference = args.reference.ok_or(CliError::MissingArgument {
            field: ARG_REFERENCE,
            env: ENV_PROXIMITY_REFERENCE,
        })?;
        Ok(Self {
            segments,
            reference,
            tolerance: args.tolerance.unwrap_or(DEFAULT_TOLERANCE),
            output: args.output,
        })
    }
}

/// Locations found around a reference.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct ProximityReport {
    pub(crate) reference: i64,
    pub(crate) tolerance: f64,
    pub(crate) locations: Vec<i64>,
}

pub(crate) fn run_proximity_with(
    args: ProximityArgs,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    let report = execute_proximity(&config)?;
    emit_report(&report, config.output.as_deref(), writer)
}

fn execute_proximity(config: &ProximityConfig) -> Result<ProximityReport, CliError> {
    let segments = load_segments(&config.segments)?;
    let edges = unroll(&build_distance_matrix(&segments)?);
    let locations = find_within_tolerance(&edges, &config.reference, config.tolerance)?;
    log::info!(
        "{} locations within {} of {}",
        locations.len(),
        config.tolerance,
        config.reference
    );
    Ok(ProximityReport {
        reference: config.reference,
        tolerance: config.tolerance,
        locations,
    })
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<ProximityConfig, CliError> {
    let merged = ProximityArgs::merge_from_layers(layers).map_err(CliError::from)?;
    ProximityConfig::try_from(merged)
}
