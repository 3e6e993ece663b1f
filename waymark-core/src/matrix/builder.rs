//! Additive transitive closure over undirected segments.

use std::collections::{BTreeMap, BTreeSet};

use crate::{LocationId, Segment};

use super::{DistanceMatrix, DistanceMatrixError};

/// Build the full distance table implied by `segments`.
///
/// Direct distances are placed symmetrically, then extended through every
/// intermediate location: a pair `(i, j)` that is still undefined takes
/// `M[i, k] + M[k, j]` for the first intermediate `k` (in ascending order)
/// that connects both. Known cells are never overwritten, so the network is
/// treated as a single corridor with at most one accumulated route between
/// two points. Pairs with no connecting path are left out of the result.
///
/// An empty segment list yields an empty matrix.
///
/// # Errors
/// - [`DistanceMatrixError::InvalidDistance`] for negative or non-finite
///   distances.
/// - [`DistanceMatrixError::DataConflict`] when two segments disagree on the
///   same unordered pair, or a self-segment carries a non-zero distance.
pub fn build_distance_matrix<L: LocationId>(
    segments: &[Segment<L>],
) -> Result<DistanceMatrix<L>, DistanceMatrixError> {
    let locations: Vec<L> = segments
        .iter()
        .flat_map(|segment| [segment.from.clone(), segment.to.clone()])
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let mut table = DenseTable::with_diagonal(locations.len());
    for segment in segments {
        segment.validate()?;
        let (Ok(i), Ok(j)) = (
            locations.binary_search(&segment.from),
            locations.binary_search(&segment.to),
        ) else {
            continue;
        };
        let existing = table.get(i, j);
        match existing {
            Some(known) if known != segment.distance => {
                return Err(DistanceMatrixError::DataConflict {
                    from: segment.from.to_string(),
                    to: segment.to.to_string(),
                    existing: known,
                    incoming: segment.distance,
                });
            }
            Some(_) => {}
            None => table.set_pair(i, j, segment.distance),
        }
    }

    table.close();

    let mut cells = BTreeMap::new();
    for (i, row) in locations.iter().enumerate() {
        for (j, col) in locations.iter().enumerate() {
            if let Some(distance) = table.get(i, j) {
                cells.insert((row.clone(), col.clone()), distance);
            }
        }
    }
    Ok(DistanceMatrix::from_cells(
        locations.into_iter().collect(),
        cells,
    )?)
}

/// Row-major `n x n` table of optional distances indexed by location rank.
struct DenseTable {
    size: usize,
    cells: Vec<Option<f64>>,
}

impl DenseTable {
    fn with_diagonal(size: usize) -> Self {
        let mut cells = vec![None; size * size];
        for i in 0..size {
            cells[i * size + i] = Some(0.0);
        }
        Self { size, cells }
    }

    fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.cells[row * self.size + col]
    }

    fn set_pair(&mut self, a: usize, b: usize, distance: f64) {
        self.cells[a * self.size + b] = Some(distance);
        self.cells[b * self.size + a] = Some(distance);
    }

    fn close(&mut self) {
        let n = self.size;
        for k in 0..n {
            for i in 0..n {
                let Some(to_k) = self.get(i, k) else {
                    continue;
                };
                for j in 0..n {
                    if i == j || self.get(i, j).is_some() {
                        continue;
                    }
                    if let Some(from_k) = self.get(k, j) {
                        self.set_pair(i, j, to_k + from_k);
                    }
                }
            }
        }
    }
}
