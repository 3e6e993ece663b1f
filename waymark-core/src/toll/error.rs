use jiff::civil::Time;
use thiserror::Error;

use crate::calendar::TimestampError;

use super::VehicleClass;

/// Errors from the toll rate engine and its configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TollError {
    /// A class coefficient was negative or not finite.
    #[error("coefficient for {class} must be finite and non-negative, got {value}")]
    InvalidCoefficient {
        /// The affected class.
        class: VehicleClass,
        /// The rejected coefficient.
        value: f64,
    },
    /// A discount factor was negative or not finite.
    #[error("discount factor {name} must be finite and non-negative, got {value}")]
    InvalidFactor {
        /// Name of the schedule field.
        name: &'static str,
        /// The rejected factor.
        value: f64,
    },
    /// The peak bracket ends before it starts.
    #[error("peak ends at {peak_end} before it starts at {peak_start}")]
    InvalidSchedule {
        /// Configured start of the peak.
        peak_start: Time,
        /// Configured end of the peak.
        peak_end: Time,
    },
    /// A trip references a pair with no rate record.
    #[error("no rate record for {id_start} -> {id_end}")]
    NotFound {
        /// Start of the trip.
        id_start: String,
        /// End of the trip.
        id_end: String,
    },
    /// A trip carried inconsistent timestamps.
    #[error(transparent)]
    Timestamp(#[from] TimestampError),
}
