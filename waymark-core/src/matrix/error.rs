use thiserror::Error;

/// Structural invariant violated by a candidate [`DistanceMatrix`](super::DistanceMatrix).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MatrixInvariant {
    /// A location has no diagonal cell.
    #[error("location {location} has no diagonal entry")]
    MissingDiagonal {
        /// The affected location.
        location: String,
    },
    /// A diagonal cell holds something other than zero.
    #[error("diagonal entry for {location} is {distance}, expected 0")]
    NonZeroDiagonal {
        /// The affected location.
        location: String,
        /// Value found on the diagonal.
        distance: f64,
    },
    /// A cell has no mirrored cell with the same value.
    #[error("cell ({row}, {col}) = {forward} is not mirrored (reverse: {reverse:?})")]
    Asymmetric {
        /// Row of the offending cell.
        row: String,
        /// Column of the offending cell.
        col: String,
        /// Value stored at `(row, col)`.
        forward: f64,
        /// Value stored at `(col, row)`, if any.
        reverse: Option<f64>,
    },
    /// A cell references a location outside the matrix.
    #[error("cell ({row}, {col}) references a location outside the matrix")]
    UnknownLocation {
        /// Row of the offending cell.
        row: String,
        /// Column of the offending cell.
        col: String,
    },
}

/// Errors from [`build_distance_matrix`](super::build_distance_matrix).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DistanceMatrixError {
    /// A segment distance was negative, NaN or infinite.
    #[error("segment {from} -> {to} has invalid distance {distance}")]
    InvalidDistance {
        /// One end of the segment.
        from: String,
        /// The other end of the segment.
        to: String,
        /// The rejected distance.
        distance: f64,
    },
    /// Two segments disagree on the distance of the same unordered pair.
    ///
    /// Input is expected to be deduplicated upstream; the builder never picks
    /// a winner.
    #[error("conflicting distances for {from} <-> {to}: {existing} vs {incoming}")]
    DataConflict {
        /// One end of the pair.
        from: String,
        /// The other end of the pair.
        to: String,
        /// Distance recorded first.
        existing: f64,
        /// Distance that contradicts it.
        incoming: f64,
    },
    /// The assembled matrix broke a structural invariant.
    #[error("distance matrix invariant violated: {0}")]
    Invariant(#[from] MatrixInvariant),
}
