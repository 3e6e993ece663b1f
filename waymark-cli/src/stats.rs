//! Stats command implementation for the Waymark CLI.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use waymark_data::load_vehicle_counts;
use waymark_stats::{VehicleCountSummary, summarise};

use crate::output::{emit_report, require_existing};
use crate::{ARG_COUNTS, ARG_OUTPUT, CliError, ENV_STATS_COUNTS};

/// CLI arguments for the `stats` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Summarise a vehicle-count dataset: car density bands, \
                 bus outlier rows, routes with heavy truck traffic and the \
                 adjusted car matrix.",
    about = "Summarise vehicle counts"
)]
#[ortho_config(prefix = "WAYMARK")]
pub(crate) struct StatsArgs {
    /// CSV file with `id_1,id_2,route,moto,car,rv,bus,truck` rows.
    #[arg(long = ARG_COUNTS, value_name = "path")]
    #[serde(default)]
    pub(crate) counts: Option<Utf8PathBuf>,
    /// Write the report to this file instead of standard output.
    #[arg(long = ARG_OUTPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
}

impl StatsArgs {
    pub(crate) fn into_config(self) -> Result<StatsConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        StatsConfig::try_from(merged)
    }
}

/// Resolved `stats` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct StatsConfig {
    pub(crate) counts: Utf8PathBuf,
    pub(crate) output: Option<Utf8PathBuf>,
}

impl StatsConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        require_existing(&self.counts, ARG_COUNTS)
    }
}

impl TryFrom<StatsArgs> for StatsConfig {
    type Error = CliError;

    fn try_from(args: StatsArgs) -> Result<Self, Self::Error> {
        let counts = args.counts.ok_or(CliError::MissingArgument {
            field: ARG_COUNTS,
            env: ENV_STATS_COUNTS,
        })?;
        Ok(Self {
            counts,
            output: args.output,
        })
    }
}

pub(crate) fn run_stats_with(args: StatsArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    let summary = execute_stats(&config)?;
    emit_report(&summary, config.output.as_deref(), writer)
}

fn execute_stats(config: &StatsConfig) -> Result<VehicleCountSummary, CliError> {
    let records = load_vehicle_counts(&config.counts)?;
    let summary = summarise(&records)?;
    log::info!(
        "summarised {} rows: {} bus outliers, {} heavy truck routes",
        records.len(),
        summary.bus_outliers.len(),
        summary.heavy_truck_routes.len()
    );
    Ok(summary)
}
