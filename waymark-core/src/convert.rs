//! Conversion between [`DistanceMatrix`] and flat [`EdgeRecord`] lists.
//!
//! [`unroll`] emits one record per off-diagonal cell, so every connected pair
//! appears in both directions. [`roll`] is the inverse and refuses edge sets
//! that are not closed under reversal; it never symmetrises on the caller's
//! behalf.

use std::collections::{BTreeMap, BTreeSet};

use thiserror::Error;

use crate::matrix::MatrixInvariant;
use crate::{DistanceMatrix, EdgeRecord, LocationId, is_valid_distance};

/// Errors from [`roll`] describing a structurally invalid edge set.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    /// An edge starts and ends at the same location.
    #[error("edge {location} -> {location} is a self pair")]
    SelfPair {
        /// The repeated location.
        location: String,
    },
    /// An edge distance was negative, NaN or infinite.
    #[error("edge {id_start} -> {id_end} has invalid distance {distance}")]
    InvalidDistance {
        /// Start of the edge.
        id_start: String,
        /// End of the edge.
        id_end: String,
        /// The rejected distance.
        distance: f64,
    },
    /// The same directed edge appears twice with different distances.
    #[error("edge {id_start} -> {id_end} appears with distances {first} and {second}")]
    ConflictingDuplicate {
        /// Start of the edge.
        id_start: String,
        /// End of the edge.
        id_end: String,
        /// Distance of the first occurrence.
        first: f64,
        /// Distance of the later occurrence.
        second: f64,
    },
    /// An edge has no reverse record with the same distance.
    #[error("edge {id_start} -> {id_end} ({distance}) has no matching reverse (found {reverse:?})")]
    MissingReverse {
        /// Start of the edge.
        id_start: String,
        /// End of the edge.
        id_end: String,
        /// Distance of the edge.
        distance: f64,
        /// Distance of the reverse edge, if one exists.
        reverse: Option<f64>,
    },
    /// The rebuilt matrix broke another structural invariant.
    #[error("rolled matrix invariant violated: {0}")]
    Invariant(MatrixInvariant),
}

/// Flatten `matrix` into edge records, ordered by `id_start` then `id_end`.
///
/// Diagonal cells are skipped; pairs missing from the matrix produce no
/// record.
///
/// # Examples
///
/// ```
/// use waymark_core::{Segment, build_distance_matrix, unroll};
///
/// # fn main() -> Result<(), waymark_core::DistanceMatrixError> {
/// let matrix = build_distance_matrix(&[Segment::new(1_u64, 2, 3.0)?])?;
/// let edges = unroll(&matrix);
/// assert_eq!(edges.len(), 2);
/// assert_eq!((edges[0].id_start, edges[0].id_end), (1, 2));
/// assert_eq!((edges[1].id_start, edges[1].id_end), (2, 1));
/// # Ok(())
/// # }
/// ```
#[must_use]
pub fn unroll<L: LocationId>(matrix: &DistanceMatrix<L>) -> Vec<EdgeRecord<L>> {
    matrix
        .iter()
        .filter(|(row, col, _)| row != col)
        .map(|(row, col, distance)| EdgeRecord::new(row.clone(), col.clone(), distance))
        .collect()
}

/// Rebuild a [`DistanceMatrix`] from edge records.
///
/// Every location referenced by an edge receives a zero diagonal entry.
///
/// # Errors
/// Returns a [`SchemaError`] when the edge set contains self pairs, invalid
/// distances, conflicting duplicates, or an edge without a reverse record of
/// equal distance.
pub fn roll<L: LocationId>(edges: &[EdgeRecord<L>]) -> Result<DistanceMatrix<L>, SchemaError> {
    let mut cells: BTreeMap<(L, L), f64> = BTreeMap::new();
    let mut locations = BTreeSet::new();

    for edge in edges {
        if edge.id_start == edge.id_end {
            return Err(SchemaError::SelfPair {
                location: edge.id_start.to_string(),
            });
        }
        if !is_valid_distance(edge.distance) {
            return Err(SchemaError::InvalidDistance {
                id_start: edge.id_start.to_string(),
                id_end: edge.id_end.to_string(),
                distance: edge.distance,
            });
        }
        let key = (edge.id_start.clone(), edge.id_end.clone());
        if let Some(&first) = cells.get(&key) {
            if first != edge.distance {
                return Err(SchemaError::ConflictingDuplicate {
                    id_start: edge.id_start.to_string(),
                    id_end: edge.id_end.to_string(),
                    first,
                    second: edge.distance,
                });
            }
            continue;
        }
        cells.insert(key, edge.distance);
        locations.insert(edge.id_start.clone());
        locations.insert(edge.id_end.clone());
    }

    for location in &locations {
        cells.insert((location.clone(), location.clone()), 0.0);
    }

    DistanceMatrix::from_cells(locations, cells).map_err(schema_from_invariant)
}

fn schema_from_invariant(invariant: MatrixInvariant) -> SchemaError {
    match invariant {
        MatrixInvariant::Asymmetric {
            row,
            col,
            forward,
            reverse,
        } => SchemaError::MissingReverse {
            id_start: row,
            id_end: col,
            distance: forward,
            reverse,
        },
        other => SchemaError::Invariant(other),
    }
}
