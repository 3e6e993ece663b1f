//! Errors raised while loading tabular datasets.

use camino::Utf8PathBuf;
use thiserror::Error;
use waymark_core::{DistanceMatrixError, TollError};

/// Errors returned by the dataset loaders.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// The dataset file could not be opened.
    #[error("failed to open dataset at {path}")]
    Open {
        /// Requested dataset path.
        path: Utf8PathBuf,
        /// Source error from std I/O.
        #[source]
        source: std::io::Error,
    },
    /// A row could not be read or decoded.
    #[error("failed to read dataset at {path}")]
    Read {
        /// Dataset path.
        path: Utf8PathBuf,
        /// Source error from `csv`.
        #[source]
        source: csv::Error,
    },
    /// A segment row carried an unusable distance.
    #[error("invalid segment on data row {row} of {path}")]
    InvalidSegment {
        /// Dataset path.
        path: Utf8PathBuf,
        /// One-based data row, excluding the header.
        row: usize,
        /// Validation failure.
        #[source]
        source: DistanceMatrixError,
    },
    /// A trip row carried malformed or inverted timestamps.
    #[error("invalid trip on data row {row} of {path}")]
    InvalidTrip {
        /// Dataset path.
        path: Utf8PathBuf,
        /// One-based data row, excluding the header.
        row: usize,
        /// Validation failure.
        #[source]
        source: TollError,
    },
}
