use thiserror::Error;

/// Errors returned by the clustering engine and spatial indexes.
///
/// Every error is detected before labeling starts, so a failed call never
/// produces partial output.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A point has a different dimensionality than the first point.
    #[error("dimension mismatch at point {index}: expected {expected}, found {found}")]
    DimensionMismatch {
        /// Index of the offending point.
        index: usize,
        /// Dimensionality of the first point.
        expected: usize,
        /// Dimensionality of the offending point.
        found: usize,
    },

    /// A coordinate is NaN or infinite.
    #[error("non-finite coordinate at point {index}, axis {axis}")]
    NonFiniteCoordinate {
        /// Index of the offending point.
        index: usize,
        /// Axis of the offending coordinate.
        axis: usize,
    },

    /// Invalid parameter value.
    #[error("invalid parameter {name}: {message}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Human-readable explanation.
        message: &'static str,
    },
}

/// Coarse classification of [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The point set is malformed.
    InvalidInput,
    /// A clustering parameter is out of range.
    InvalidParameter,
}

impl Error {
    /// Which side of the call contract was violated.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::DimensionMismatch { .. } | Error::NonFiniteCoordinate { .. } => {
                ErrorKind::InvalidInput
            }
            Error::InvalidParameter { .. } => ErrorKind::InvalidParameter,
        }
    }
}

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, Error>;
