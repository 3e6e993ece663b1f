//! Dense pairwise distance tables built from road segments.
//!
//! [`build_distance_matrix`] accumulates direct segment distances along
//! connected paths and returns an immutable [`DistanceMatrix`]. The matrix
//! always has a zero diagonal and is symmetric; both properties are checked
//! when the matrix is assembled rather than assumed.

mod builder;
mod error;

use std::collections::{BTreeMap, BTreeSet};

pub use builder::build_distance_matrix;
pub use error::{DistanceMatrixError, MatrixInvariant};

use crate::LocationId;

/// Immutable, symmetric table of distances between locations.
///
/// Pairs without a connecting path are absent rather than stored as a
/// sentinel value.
///
/// # Examples
///
/// ```
/// use waymark_core::{Segment, build_distance_matrix};
///
/// # fn main() -> Result<(), waymark_core::DistanceMatrixError> {
/// let segments = vec![Segment::new('A', 'B', 10.0)?, Segment::new('B', 'C', 5.0)?];
/// let matrix = build_distance_matrix(&segments)?;
/// assert_eq!(matrix.get(&'A', &'C'), Some(15.0));
/// assert_eq!(matrix.get(&'C', &'A'), Some(15.0));
/// assert_eq!(matrix.get(&'B', &'B'), Some(0.0));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix<L> {
    locations: Vec<L>,
    cells: BTreeMap<(L, L), f64>,
}

impl<L: LocationId> DistanceMatrix<L> {
    /// A matrix without locations.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            locations: Vec::new(),
            cells: BTreeMap::new(),
        }
    }

    /// Assemble a matrix after checking the zero-diagonal and symmetry
    /// invariants.
    pub(crate) fn from_cells(
        locations: BTreeSet<L>,
        cells: BTreeMap<(L, L), f64>,
    ) -> Result<Self, MatrixInvariant> {
        for location in &locations {
            match cells.get(&(location.clone(), location.clone())) {
                None => {
                    return Err(MatrixInvariant::MissingDiagonal {
                        location: location.to_string(),
                    });
                }
                Some(&value) if value != 0.0 => {
                    return Err(MatrixInvariant::NonZeroDiagonal {
                        location: location.to_string(),
                        distance: value,
                    });
                }
                Some(_) => {}
            }
        }
        for ((row, col), &value) in &cells {
            if !locations.contains(row) || !locations.contains(col) {
                return Err(MatrixInvariant::UnknownLocation {
                    row: row.to_string(),
                    col: col.to_string(),
                });
            }
            let mirrored = cells.get(&(col.clone(), row.clone())).copied();
            if mirrored != Some(value) {
                return Err(MatrixInvariant::Asymmetric {
                    row: row.to_string(),
                    col: col.to_string(),
                    forward: value,
                    reverse: mirrored,
                });
            }
        }
        Ok(Self {
            locations: locations.into_iter().collect(),
            cells,
        })
    }

    /// Locations covered by the matrix in ascending order.
    #[must_use]
    pub fn locations(&self) -> &[L] {
        &self.locations
    }

    /// Distance from `row` to `col`, if the two are connected.
    #[must_use]
    pub fn get(&self, row: &L, col: &L) -> Option<f64> {
        self.cells.get(&(row.clone(), col.clone())).copied()
    }

    /// Number of locations in the matrix.
    #[must_use]
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    /// Report whether the matrix has no locations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Iterate over every defined cell, diagonal included, ordered by row
    /// then column.
    pub fn iter(&self) -> impl Iterator<Item = (&L, &L, f64)> + '_ {
        self.cells
            .iter()
            .map(|((row, col), &distance)| (row, col, distance))
    }
}

impl<L: LocationId> DistanceMatrix<L> {
    /// Dense grid view in [`Self::locations`] order; unreachable pairs are
    /// `None`.
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<Option<f64>>> {
        self.locations
            .iter()
            .map(|row| {
                self.locations
                    .iter()
                    .map(|col| self.get(row, col))
                    .collect()
            })
            .collect()
    }
}

impl<L: LocationId> Default for DistanceMatrix<L> {
    fn default() -> Self {
        Self::empty()
    }
}
