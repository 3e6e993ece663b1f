//! Aggregations over per-pair vehicle-count datasets.
//!
//! Each row of a dataset records the vehicles counted between an `id_1` and
//! an `id_2` on a route, per vehicle class. The functions here pivot the car
//! counts into a matrix, band them, and flag unusual bus and truck volumes.
//! All operations are pure and deterministic: identifiers and routes come back
//! in ascending order.
//!
//! # Examples
//!
//! ```
//! use waymark_stats::{VehicleCountRecord, car_matrix, car_type_counts, CarBand};
//!
//! # fn main() -> Result<(), waymark_stats::StatsError> {
//! let records = vec![
//!     VehicleCountRecord { id_1: 801, id_2: 802, route: 14, moto: 3.0, car: 16.0, rv: 2.0, bus: 6.0, truck: 8.0 },
//!     VehicleCountRecord { id_1: 802, id_2: 801, route: 14, moto: 1.0, car: 30.0, rv: 0.0, bus: 2.0, truck: 9.0 },
//! ];
//! let matrix = car_matrix(&records)?;
//! assert_eq!(matrix.get(801, 802), Some(16.0));
//! assert_eq!(matrix.get(801, 801), Some(0.0));
//! assert_eq!(car_type_counts(&records)[&CarBand::High], 1);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

use std::collections::{BTreeMap, BTreeSet};

mod error;
mod types;

pub use error::StatsError;
pub use types::{CarBand, CountMatrix, VehicleCountRecord, VehicleCountSummary};

/// Mean truck count above which a route counts as heavy.
pub const DEFAULT_TRUCK_THRESHOLD: f64 = 7.0;

/// Pivot `car` counts into an `id_1 × id_2` matrix.
///
/// Missing cells are 0, as are cells whose row and column identifier match.
/// NaN counts are treated as missing.
///
/// # Errors
/// Returns [`StatsError::DuplicatePair`] when two rows share an
/// `(id_1, id_2)` pair.
pub fn car_matrix(records: &[VehicleCountRecord]) -> Result<CountMatrix, StatsError> {
    let mut cells = BTreeMap::new();
    for record in records {
        let key = (record.id_1, record.id_2);
        if cells.insert(key, record.car).is_some() {
            return Err(StatsError::DuplicatePair {
                id_1: record.id_1,
                id_2: record.id_2,
            });
        }
    }
    cells.retain(|&(row, col), value| row != col && !value.is_nan());

    let row_ids: BTreeSet<u64> = records.iter().map(|record| record.id_1).collect();
    let column_ids: BTreeSet<u64> = records.iter().map(|record| record.id_2).collect();
    Ok(CountMatrix::from_cells(
        row_ids.into_iter().collect(),
        column_ids.into_iter().collect(),
        &cells,
        0.0,
    ))
}

/// Count records per [`CarBand`]; every band is present, NaN counts are
/// skipped.
#[must_use]
pub fn car_type_counts(records: &[VehicleCountRecord]) -> BTreeMap<CarBand, usize> {
    let mut counts: BTreeMap<CarBand, usize> =
        CarBand::ALL.into_iter().map(|band| (band, 0)).collect();
    for band in records
        .iter()
        .filter_map(|record| CarBand::classify(record.car))
    {
        *counts.entry(band).or_default() += 1;
    }
    counts
}

/// Positions of records whose `bus` count exceeds twice the mean.
///
/// The mean skips NaN counts; an empty dataset yields no positions.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "the outlier bound doubles the mean bus count"
)]
pub fn bus_outlier_indexes(records: &[VehicleCountRecord]) -> Vec<usize> {
    let Some(mean_bus) = mean(records.iter().map(|record| record.bus)) else {
        return Vec::new();
    };
    let bound = 2.0 * mean_bus;
    records
        .iter()
        .enumerate()
        .filter(|(_, record)| record.bus > bound)
        .map(|(index, _)| index)
        .collect()
}

/// Routes whose mean `truck` count is strictly above `threshold`.
///
/// # Errors
/// Returns [`StatsError::InvalidThreshold`] when `threshold` is NaN or
/// infinite.
pub fn heavy_truck_routes(
    records: &[VehicleCountRecord],
    threshold: f64,
) -> Result<Vec<u64>, StatsError> {
    if !threshold.is_finite() {
        return Err(StatsError::InvalidThreshold { threshold });
    }
    let mut by_route: BTreeMap<u64, Vec<f64>> = BTreeMap::new();
    for record in records {
        by_route.entry(record.route).or_default().push(record.truck);
    }
    Ok(by_route
        .into_iter()
        .filter(|(_, trucks)| mean(trucks.iter().copied()).is_some_and(|avg| avg > threshold))
        .map(|(route, _)| route)
        .collect())
}

/// Apply `transform` to every cell of `matrix`.
#[must_use]
pub fn map_cells(matrix: &CountMatrix, transform: impl FnMut(f64) -> f64) -> CountMatrix {
    matrix.map_cells(transform)
}

/// Scale a car count down by a quarter above 20, up by a quarter otherwise,
/// rounded to one decimal place with halves going to the even digit.
///
/// # Examples
/// ```
/// use waymark_stats::adjust_car_value;
///
/// assert_eq!(adjust_car_value(40.0), 30.0);
/// assert_eq!(adjust_car_value(20.0), 25.0);
/// assert_eq!(adjust_car_value(13.3), 16.6);
/// assert_eq!(adjust_car_value(0.2), 0.2);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "adjustment scales and rounds the count"
)]
pub fn adjust_car_value(cars: f64) -> f64 {
    let scaled = if cars > 20.0 { cars * 0.75 } else { cars * 1.25 };
    (scaled * 10.0).round_ties_even() / 10.0
}

/// Compute every statistic for a dataset with the default truck threshold.
///
/// # Errors
/// Propagates [`StatsError::DuplicatePair`] from [`car_matrix`].
pub fn summarise(records: &[VehicleCountRecord]) -> Result<VehicleCountSummary, StatsError> {
    let matrix = car_matrix(records)?;
    Ok(VehicleCountSummary {
        car_bands: car_type_counts(records),
        bus_outliers: bus_outlier_indexes(records),
        heavy_truck_routes: heavy_truck_routes(records, DEFAULT_TRUCK_THRESHOLD)?,
        adjusted_car_matrix: map_cells(&matrix, adjust_car_value),
    })
}

#[expect(
    clippy::float_arithmetic,
    reason = "averaging sums the values and divides by their count"
)]
fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values
        .filter(|value| !value.is_nan())
        .fold((0.0, 0.0), |(sum, count), value| (sum + value, count + 1.0));
    (count > 0.0).then_some(sum / count)
}
