//! Command-line interface for Waymark's road-segment analytics.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod coverage;
mod distances;
mod error;
mod output;
mod proximity;
mod stats;
mod tolls;

pub use error::CliError;

use coverage::CoverageArgs;
use distances::DistancesArgs;
use proximity::ProximityArgs;
use stats::StatsArgs;
use tolls::TollsArgs;

pub(crate) const ARG_SEGMENTS: &str = "segments";
pub(crate) const ARG_REFERENCE: &str = "reference";
pub(crate) const ARG_TOLERANCE: &str = "tolerance";
pub(crate) const ARG_TRIPS: &str = "trips";
pub(crate) const ARG_INTERVALS: &str = "intervals";
pub(crate) const ARG_COUNTS: &str = "counts";
pub(crate) const ARG_OUTPUT: &str = "output";
pub(crate) const ARG_MOTO_RATE: &str = "moto-rate";
pub(crate) const ARG_CAR_RATE: &str = "car-rate";
pub(crate) const ARG_RV_RATE: &str = "rv-rate";
pub(crate) const ARG_BUS_RATE: &str = "bus-rate";
pub(crate) const ARG_TRUCK_RATE: &str = "truck-rate";
pub(crate) const ARG_OFF_PEAK_FACTOR: &str = "off-peak-factor";
pub(crate) const ARG_PEAK_FACTOR: &str = "peak-factor";
pub(crate) const ARG_WEEKEND_FACTOR: &str = "weekend-factor";
pub(crate) const ENV_DISTANCES_SEGMENTS: &str = "WAYMARK_CMDS_DISTANCES_SEGMENTS";
pub(crate) const ENV_PROXIMITY_SEGMENTS: &str = "WAYMARK_CMDS_PROXIMITY_SEGMENTS";
pub(crate) const ENV_PROXIMITY_REFERENCE: &str = "WAYMARK_CMDS_PROXIMITY_REFERENCE";
pub(crate) const ENV_TOLLS_SEGMENTS: &str = "WAYMARK_CMDS_TOLLS_SEGMENTS";
pub(crate) const ENV_COVERAGE_INTERVALS: &str = "WAYMARK_CMDS_COVERAGE_INTERVALS";
pub(crate) const ENV_STATS_COUNTS: &str = "WAYMARK_CMDS_STATS_COUNTS";

/// Run the Waymark CLI with the current process arguments and environment.
///
/// Reports go to standard output unless the command names an output file.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    let mut stdout = std::io::stdout().lock();
    match cli.command {
        Command::Distances(args) => distances::run_distances_with(args, &mut stdout),
        Command::Proximity(args) => proximity::run_proximity_with(args, &mut stdout),
        Command::Tolls(args) => tolls::run_tolls_with(args, &mut stdout),
        Command::Coverage(args) => coverage::run_coverage_with(args, &mut stdout),
        Command::Stats(args) => stats::run_stats_with(args, &mut stdout),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "waymark",
    about = "Distance, toll and coverage analytics over road-segment datasets",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Build the cumulative distance table and print it as edge records.
    Distances(DistancesArgs),
    /// List locations whose average distance resembles a reference.
    Proximity(ProximityArgs),
    /// Price every edge per vehicle class with calendar discounts.
    Tolls(TollsArgs),
    /// Check that interval groups cover the whole week.
    Coverage(CoverageArgs),
    /// Summarise a vehicle-count dataset.
    Stats(StatsArgs),
}

#[cfg(test)]
mod tests;
