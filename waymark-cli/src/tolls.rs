//! Tolls command implementation for the Waymark CLI.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use waymark_core::{
    DiscountSchedule, RateCoefficients, TimeWindowRecord, VehicleClass, build_distance_matrix,
    calculate_toll_rates, expand_time_windows, price_trips, unroll,
};
use waymark_data::{load_segments, load_trips};

use crate::output::{emit_report, require_existing};
use crate::{
    ARG_BUS_RATE, ARG_CAR_RATE, ARG_MOTO_RATE, ARG_OFF_PEAK_FACTOR, ARG_OUTPUT, ARG_PEAK_FACTOR,
    ARG_RV_RATE, ARG_SEGMENTS, ARG_TRIPS, ARG_TRUCK_RATE, ARG_WEEKEND_FACTOR, CliError,
    ENV_TOLLS_SEGMENTS,
};

/// CLI arguments for the `tolls` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Derive per-class toll rates from the cumulative distance \
                 table and apply calendar discounts. Without a trips file \
                 every edge is replicated across the weekly windows; with \
                 one, each trip is priced by its departure time.",
    about = "Price edges per vehicle class with calendar discounts"
)]
#[ortho_config(prefix = "WAYMARK")]
pub(crate) struct TollsArgs {
    /// CSV file with `id_start,id_end,distance` rows.
    #[arg(long = ARG_SEGMENTS, value_name = "path")]
    #[serde(default)]
    pub(crate) segments: Option<Utf8PathBuf>,
    /// CSV file with `id_start,id_end,start,end` trips to price.
    #[arg(long = ARG_TRIPS, value_name = "path")]
    #[serde(default)]
    pub(crate) trips: Option<Utf8PathBuf>,
    /// Motorcycle coefficient (defaults to 0.8).
    #[arg(long = ARG_MOTO_RATE, value_name = "coefficient")]
    #[serde(default)]
    pub(crate) moto_rate: Option<f64>,
    /// Car coefficient (defaults to 1.2).
    #[arg(long = ARG_CAR_RATE, value_name = "coefficient")]
    #[serde(default)]
    pub(crate) car_rate: Option<f64>,
    /// Recreational vehicle coefficient (defaults to 1.5).
    #[arg(long = ARG_RV_RATE, value_name = "coefficient")]
    #[serde(default)]
    pub(crate) rv_rate: Option<f64>,
    /// Bus coefficient (defaults to 2.2).
    #[arg(long = ARG_BUS_RATE, value_name = "coefficient")]
    #[serde(default)]
    pub(crate) bus_rate: Option<f64>,
    /// Truck coefficient (defaults to 3.6).
    #[arg(long = ARG_TRUCK_RATE, value_name = "coefficient")]
    #[serde(default)]
    pub(crate) truck_rate: Option<f64>,
    /// Weekday off-peak factor (defaults to 0.8).
    #[arg(long = ARG_OFF_PEAK_FACTOR, value_name = "factor")]
    #[serde(default)]
    pub(crate) off_peak_factor: Option<f64>,
    /// Weekday peak factor (defaults to 1.2).
    #[arg(long = ARG_PEAK_FACTOR, value_name = "factor")]
    #[serde(default)]
    pub(crate) peak_factor: Option<f64>,
    /// Weekend factor (defaults to 0.7).
    #[arg(long = ARG_WEEKEND_FACTOR, value_name = "factor")]
    #[serde(default)]
    pub(crate) weekend_factor: Option<f64>,
    /// Write the report to this file instead of standard output.
    #[arg(long = ARG_OUTPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
}

impl TollsArgs {
    pub(crate) fn into_config(self) -> Result<TollsConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        TollsConfig::try_from(merged)
    }
}

/// Resolved `tolls` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TollsConfig {
    pub(crate) segments: Utf8PathBuf,
    pub(crate) trips: Option<Utf8PathBuf>,
    pub(crate) coefficients: RateCoefficients,
    pub(crate) schedule: DiscountSchedule,
    pub(crate) output: Option<Utf8PathBuf>,
}

impl TollsConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        require_existing(&self.segments, ARG_SEGMENTS)?;
        if let Some(trips) = &self.trips {
            require_existing(trips, ARG_TRIPS)?;
        }
        Ok(())
    }
}

impl TryFrom<TollsArgs> for TollsConfig {
    type Error = CliError;

    fn try_from(args: TollsArgs) -> Result<Self, Self::Error> {
        let segments = args.segments.ok_or(CliError::MissingArgument {
            field: ARG_SEGMENTS,
            env: ENV_TOLLS_SEGMENTS,
        })?;

        let coefficients = [
            (VehicleClass::Moto, args.moto_rate),
            (VehicleClass::Car, args.car_rate),
            (VehicleClass::Rv, args.rv_rate),
            (VehicleClass::Bus, args.bus_rate),
            (VehicleClass::Truck, args.truck_rate),
        ]
        .into_iter()
        .fold(RateCoefficients::default(), |acc, (class, value)| {
            value.map_or(acc, |value| acc.with_coefficient(class, value))
        })
        .validate()?;

        let defaults = DiscountSchedule::default();
        let schedule = DiscountSchedule {
            weekday_off_peak: args.off_peak_factor.unwrap_or(defaults.weekday_off_peak),
            weekday_peak: args.peak_factor.unwrap_or(defaults.weekday_peak),
            weekend: args.weekend_factor.unwrap_or(defaults.weekend),
            ..defaults
        }
        .validate()?;

        Ok(Self {
            segments,
            trips: args.trips,
            coefficients,
            schedule,
            output: args.output,
        })
    }
}

pub(crate) fn run_tolls_with(args: TollsArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    let records = execute_tolls(&config)?;
    emit_report(&records, config.output.as_deref(), writer)
}

fn execute_tolls(config: &TollsConfig) -> Result<Vec<TimeWindowRecord<i64>>, CliError> {
    let segments = load_segments(&config.segments)?;
    let edges = unroll(&build_distance_matrix(&segments)?);
    let rates = calculate_toll_rates(&edges, &config.coefficients);
    let records = match &config.trips {
        Some(path) => {
            let trips = load_trips(path)?;
            log::info!("pricing {} trips", trips.len());
            price_trips(&rates, &trips, &config.schedule)?
        }
        None => expand_time_windows(&rates, &config.schedule)?,
    };
    log::info!("produced {} toll records", records.len());
    Ok(records)
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<TollsConfig, CliError> {
    let merged = TollsArgs::merge_from_layers(layers).map_err(CliError::from)?;
    TollsConfig::try_from(merged)
}
