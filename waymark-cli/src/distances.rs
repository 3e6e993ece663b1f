//! Distances command implementation for the Waymark CLI.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use waymark_core::{EdgeRecord, build_distance_matrix, unroll};
use waymark_data::load_segments;

use crate::output::{emit_report, require_existing};
use crate::{ARG_OUTPUT, ARG_SEGMENTS, CliError, ENV_DISTANCES_SEGMENTS};

/// CLI arguments for the `distances` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Load direct road segments, accumulate distances along the \
                 corridor into a full table and print every ordered pair of \
                 distinct locations as an edge record.",
    about = "Build the cumulative distance table"
)]
#[ortho_config(prefix = "WAYMARK")]
pub(crate) struct DistancesArgs {
    /// CSV file with `id_start,id_end,distance` rows.
    #[arg(long = ARG_SEGMENTS, value_name = "path")]
    #[serde(default)]
    pub(crate) segments: Option<Utf8PathBuf>,
    /// Write the report to this file instead of standard output.
    #[arg(long = ARG_OUTPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
}

impl DistancesArgs {
    pub(crate) fn into_config(self) -> Result<DistancesConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        DistancesConfig::try_from(merged)
    }
}

/// Resolved `distances` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DistancesConfig {
    pub(crate) segments: Utf8PathBuf,
    pub(crate) output: Option<Utf8PathBuf>,
}

impl DistancesConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        require_existing(&self.segments, ARG_SEGMENTS)
    }
}

impl TryFrom<DistancesArgs> for DistancesConfig {
    type Error = CliError;

    fn try_from(args: DistancesArgs) -> Result<Self, Self::Error> {
        let segments = args.segments.ok_or(CliError::MissingArgument {
            field: ARG_SEGMENTS,
            env: ENV_DISTANCES_SEGMENTS,
        })?;
        Ok(Self {
            segments,
            output: args.output,
        })
    }
}

pub(crate) fn run_distances_with(
    args: DistancesArgs,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    let edges = execute_distances(&config)?;
    emit_report(&edges, config.output.as_deref(), writer)
}

fn execute_distances(config: &DistancesConfig) -> Result<Vec<EdgeRecord<i64>>, CliError> {
    let segments = load_segments(&config.segments)?;
    let matrix = build_distance_matrix(&segments)?;
    let edges = unroll(&matrix);
    log::info!(
        "built distance table over {} locations ({} edges)",
        matrix.len(),
        edges.len()
    );
    Ok(edges)
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<DistancesConfig, CliError> {
    let merged = DistancesArgs::merge_from_layers(layers).map_err(CliError::from)?;
    DistancesConfig::try_from(merged)
}
