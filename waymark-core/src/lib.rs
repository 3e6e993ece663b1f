//! Core domain types and algorithms for the Waymark road-segment analytics.
//!
//! The crate turns sparse, undirected road segments into a dense distance
//! table and derives the analytics built on top of it: edge-list conversion,
//! proximity search, per-class toll rates with calendar discounts, and
//! weekly coverage checks. Every operation is a pure function of its inputs;
//! nothing here performs I/O or logs. Failures are returned as typed errors.

#![forbid(unsafe_code)]

use std::fmt;

pub mod calendar;
pub mod convert;
pub mod coverage;
pub mod matrix;
pub mod proximity;
pub mod toll;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use calendar::{Day, TimestampError, WeekInstant};
pub use convert::{SchemaError, roll, unroll};
pub use coverage::{CoverageKey, HOURS_PER_WEEK, IntervalRecord, check_full_week_coverage};
pub use matrix::{DistanceMatrix, DistanceMatrixError, MatrixInvariant, build_distance_matrix};
pub use proximity::{DEFAULT_TOLERANCE, ProximityError, average_distances, find_within_tolerance};
pub use toll::{
    CalendarWindow, DiscountSchedule, RateCoefficients, TimeWindowRecord, TollError, Trip,
    VehicleClass, VehicleRateRecord, VehicleRates, calculate_toll_rates, expand_time_windows,
    price_trips,
};

/// Identifier of a location on the road network.
///
/// Any totally ordered, printable value qualifies; ordering drives the
/// deterministic layout of every table produced by this crate.
pub trait LocationId: Ord + Clone + fmt::Debug + fmt::Display {}

impl<T> LocationId for T where T: Ord + Clone + fmt::Debug + fmt::Display {}

/// A directly measured, undirected distance between two locations.
///
/// # Examples
///
/// ```
/// use waymark_core::Segment;
///
/// # fn main() -> Result<(), waymark_core::DistanceMatrixError> {
/// let segment = Segment::new(1001400_u64, 1001402, 9.7)?;
/// assert_eq!(segment.to, 1001402);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Segment<L> {
    /// One end of the segment.
    pub from: L,
    /// The other end of the segment.
    pub to: L,
    /// Measured distance; finite and non-negative.
    pub distance: f64,
}

impl<L: LocationId> Segment<L> {
    /// Validates and constructs a [`Segment`].
    ///
    /// # Errors
    /// Returns [`DistanceMatrixError::InvalidDistance`] when `distance` is
    /// negative, NaN or infinite.
    pub fn new(from: L, to: L, distance: f64) -> Result<Self, DistanceMatrixError> {
        let segment = Self { from, to, distance };
        segment.validate()?;
        Ok(segment)
    }

    pub(crate) fn validate(&self) -> Result<(), DistanceMatrixError> {
        if is_valid_distance(self.distance) {
            Ok(())
        } else {
            Err(DistanceMatrixError::InvalidDistance {
                from: self.from.to_string(),
                to: self.to.to_string(),
                distance: self.distance,
            })
        }
    }
}

/// One directed cell of a [`DistanceMatrix`] in flattened form.
///
/// Self pairs (`id_start == id_end`) never appear in an edge list.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeRecord<L> {
    /// Location the distance is measured from.
    pub id_start: L,
    /// Location the distance is measured to.
    pub id_end: L,
    /// Accumulated distance between the two locations.
    pub distance: f64,
}

impl<L> EdgeRecord<L> {
    /// Construct an edge record.
    pub const fn new(id_start: L, id_end: L, distance: f64) -> Self {
        Self {
            id_start,
            id_end,
            distance,
        }
    }
}

pub(crate) fn is_valid_distance(distance: f64) -> bool {
    distance.is_finite() && distance >= 0.0
}
