//! Error types raised while aggregating vehicle counts.
#![forbid(unsafe_code)]

use thiserror::Error;

/// Errors raised by the vehicle-count aggregations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StatsError {
    /// Two rows carry counts for the same `(id_1, id_2)` cell.
    #[error("duplicate counts for pair {id_1} -> {id_2}")]
    DuplicatePair {
        /// Row identifier of the repeated cell.
        id_1: u64,
        /// Column identifier of the repeated cell.
        id_2: u64,
    },
    /// The truck threshold cannot be compared against.
    #[error("truck threshold {threshold} must be finite")]
    InvalidThreshold {
        /// The rejected threshold.
        threshold: f64,
    },
}
