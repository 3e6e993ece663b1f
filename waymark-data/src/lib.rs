//! CSV loaders for the Waymark datasets.
//!
//! Responsibilities:
//! - Decode the segment, interval, vehicle-count and trip tables into the
//!   typed records of `waymark-core` and `waymark-stats`.
//! - Report unreadable files and rows with the offending path.
//!
//! Boundaries:
//! - Domain validation beyond per-row construction lives in `waymark-core`.
//! - Files are opened through `waymark-fs`.

use std::io::BufReader;

use camino::Utf8Path;
use csv::{ReaderBuilder, Trim};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use waymark_core::{IntervalRecord, Segment, Trip};
use waymark_fs::open_utf8_file;
use waymark_stats::VehicleCountRecord;

mod error;

pub use error::DatasetError;

#[derive(Debug, Deserialize)]
struct SegmentRow {
    id_start: i64,
    id_end: i64,
    distance: f64,
}

#[derive(Debug, Deserialize)]
struct TripRow {
    id_start: i64,
    id_end: i64,
    start: String,
    end: String,
}

/// Load `id_start,id_end,distance` rows as validated segments.
///
/// # Examples
/// ```no_run
/// use camino::Utf8Path;
/// use waymark_data::load_segments;
///
/// # fn main() -> Result<(), waymark_data::DatasetError> {
/// let segments = load_segments(Utf8Path::new("datasets/segments.csv"))?;
/// println!("{} segments", segments.len());
/// # Ok(())
/// # }
/// ```
///
/// # Errors
/// Returns [`DatasetError`] when the file cannot be read or a distance is
/// negative or not finite.
pub fn load_segments(path: &Utf8Path) -> Result<Vec<Segment<i64>>, DatasetError> {
    let segments = read_rows::<SegmentRow>(path)?
        .into_iter()
        .enumerate()
        .map(|(index, row)| {
            Segment::new(row.id_start, row.id_end, row.distance).map_err(|source| {
                DatasetError::InvalidSegment {
                    path: path.to_path_buf(),
                    row: index + 1,
                    source,
                }
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    log::debug!("loaded {} segments from {path}", segments.len());
    Ok(segments)
}

/// Load `id,id_2,startDay,startTime,endDay,endTime` interval rows.
///
/// Columns beyond these six are ignored. Day and time fields are kept raw and
/// parsed by the coverage check.
///
/// # Errors
/// Returns [`DatasetError`] when the file cannot be read or decoded.
pub fn load_intervals(path: &Utf8Path) -> Result<Vec<IntervalRecord<i64>>, DatasetError> {
    let intervals = read_rows(path)?;
    log::debug!("loaded {} intervals from {path}", intervals.len());
    Ok(intervals)
}

/// Load `id_1,id_2,route,moto,car,rv,bus,truck` vehicle-count rows.
///
/// # Errors
/// Returns [`DatasetError`] when the file cannot be read or decoded.
pub fn load_vehicle_counts(path: &Utf8Path) -> Result<Vec<VehicleCountRecord>, DatasetError> {
    let counts = read_rows(path)?;
    log::debug!("loaded {} vehicle-count rows from {path}", counts.len());
    Ok(counts)
}

/// Load `id_start,id_end,start,end` trips with ISO 8601 civil timestamps.
///
/// # Errors
/// Returns [`DatasetError`] when the file cannot be read or a trip's
/// timestamps are malformed or inverted.
pub fn load_trips(path: &Utf8Path) -> Result<Vec<Trip<i64>>, DatasetError> {
    let trips = read_rows::<TripRow>(path)?
        .into_iter()
        .enumerate()
        .map(|(index, row)| {
            Trip::parse(row.id_start, row.id_end, &row.start, &row.end).map_err(|source| {
                DatasetError::InvalidTrip {
                    path: path.to_path_buf(),
                    row: index + 1,
                    source,
                }
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    log::debug!("loaded {} trips from {path}", trips.len());
    Ok(trips)
}

fn read_rows<T: DeserializeOwned>(path: &Utf8Path) -> Result<Vec<T>, DatasetError> {
    let file = open_utf8_file(path).map_err(|source| DatasetError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .from_reader(BufReader::new(file));
    reader
        .deserialize()
        .map(|row| {
            row.map_err(|source| DatasetError::Read {
                path: path.to_path_buf(),
                source,
            })
        })
        .collect()
}
