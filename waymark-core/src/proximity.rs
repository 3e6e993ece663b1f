//! Locate places whose average travel distance resembles a reference.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::{EdgeRecord, LocationId};

/// Relative tolerance used when callers have no preference.
pub const DEFAULT_TOLERANCE: f64 = 0.10;

/// Errors from [`find_within_tolerance`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProximityError {
    /// The reference location has no outgoing edges.
    #[error("location {reference} has no outgoing edges")]
    NotFound {
        /// The requested reference location.
        reference: String,
    },
    /// The tolerance ratio was negative, NaN or infinite.
    #[error("tolerance ratio {tolerance} must be finite and non-negative")]
    InvalidTolerance {
        /// The rejected ratio.
        tolerance: f64,
    },
}

/// Mean outgoing distance for every `id_start` in `edges`.
#[must_use]
pub fn average_distances<L: LocationId>(edges: &[EdgeRecord<L>]) -> BTreeMap<L, f64> {
    let mut totals: BTreeMap<L, (f64, f64)> = BTreeMap::new();
    for edge in edges {
        let entry = totals.entry(edge.id_start.clone()).or_insert((0.0, 0.0));
        entry.0 += edge.distance;
        entry.1 += 1.0;
    }
    totals
        .into_iter()
        .map(|(id, (sum, count))| (id, sum / count))
        .collect()
}

/// Find every `id_start` whose average distance lies within
/// `tolerance × refAvg` of the reference location's average.
///
/// The band is closed at both ends and the reference itself is always part of
/// the result. Identifiers are returned in ascending order.
///
/// # Examples
///
/// ```
/// use waymark_core::{DEFAULT_TOLERANCE, EdgeRecord, find_within_tolerance};
///
/// # fn main() -> Result<(), waymark_core::ProximityError> {
/// let edges = vec![
///     EdgeRecord::new(1_u64, 2, 20.0),
///     EdgeRecord::new(2, 1, 22.0),
///     EdgeRecord::new(3, 1, 30.0),
/// ];
/// let ids = find_within_tolerance(&edges, &1, DEFAULT_TOLERANCE)?;
/// assert_eq!(ids, vec![1, 2]);
/// # Ok(())
/// # }
/// ```
///
/// # Errors
/// - [`ProximityError::InvalidTolerance`] when `tolerance` is negative or not
///   finite.
/// - [`ProximityError::NotFound`] when `reference` has no outgoing edges.
pub fn find_within_tolerance<L: LocationId>(
    edges: &[EdgeRecord<L>],
    reference: &L,
    tolerance: f64,
) -> Result<Vec<L>, ProximityError> {
    if !tolerance.is_finite() || tolerance < 0.0 {
        return Err(ProximityError::InvalidTolerance { tolerance });
    }
    let averages = average_distances(edges);
    let reference_average =
        averages
            .get(reference)
            .copied()
            .ok_or_else(|| ProximityError::NotFound {
                reference: reference.to_string(),
            })?;

    let threshold = (reference_average * tolerance).abs();
    let lower = reference_average - threshold;
    let upper = reference_average + threshold;

    Ok(averages
        .into_iter()
        .filter(|(_, average)| (lower..=upper).contains(average))
        .map(|(id, _)| id)
        .collect())
}
