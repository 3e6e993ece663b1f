//! Coverage command implementation for the Waymark CLI.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use waymark_core::check_full_week_coverage;
use waymark_data::load_intervals;

use crate::output::{emit_report, require_existing};
use crate::{ARG_INTERVALS, ARG_OUTPUT, CliError, ENV_COVERAGE_INTERVALS};

/// CLI arguments for the `coverage` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Group interval rows by their (id, id_2) pair and report \
                 whether each group's hourly slots span all 168 hours of \
                 the week.",
    about = "Check weekly interval coverage"
)]
#[ortho_config(prefix = "WAYMARK")]
pub(crate) struct CoverageArgs {
    /// CSV file with `id,id_2,startDay,startTime,endDay,endTime` rows.
    #[arg(long = ARG_INTERVALS, value_name = "path")]
    #[serde(default)]
    pub(crate) intervals: Option<Utf8PathBuf>,
    /// Write the report to this file instead of standard output.
    #[arg(long = ARG_OUTPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
}

impl CoverageArgs {
    pub(crate) fn into_config(self) -> Result<CoverageConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        CoverageConfig::try_from(merged)
    }
}

/// Resolved `coverage` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CoverageConfig {
    pub(crate) intervals: Utf8PathBuf,
    pub(crate) output: Option<Utf8PathBuf>,
}

impl CoverageConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        require_existing(&self.intervals, ARG_INTERVALS)
    }
}

impl TryFrom<CoverageArgs> for CoverageConfig {
    type Error = CliError;

    fn try_from(args: CoverageArgs) -> Result<Self, Self::Error> {
        let intervals = args.intervals.ok_or(CliError::MissingArgument {
            field: ARG_INTERVALS,
            env: ENV_COVERAGE_INTERVALS,
        })?;
        Ok(Self {
            intervals,
            output: args.output,
        })
    }
}

/// Coverage verdict for one `(id, id_2)` group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct CoverageEntry {
    pub(crate) id: i64,
    pub(crate) id_2: i64,
    pub(crate) complete: bool,
}

pub(crate) fn run_coverage_with(
    args: CoverageArgs,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    let entries = execute_coverage(&config)?;
    emit_report(&entries, config.output.as_deref(), writer)
}

fn execute_coverage(config: &CoverageConfig) -> Result<Vec<CoverageEntry>, CliError> {
    let intervals = load_intervals(&config.intervals)?;
    let entries: Vec<CoverageEntry> = check_full_week_coverage(&intervals)?
        .into_iter()
        .map(|((id, id_2), complete)| CoverageEntry { id, id_2, complete })
        .collect();
    let incomplete = entries.iter().filter(|entry| !entry.complete).count();
    log::info!(
        "checked {} groups, {incomplete} incomplete",
        entries.len()
    );
    Ok(entries)
}
