//! Fixed-radius neighbor search over a dense point set.
//!
//! Every index answers the same question: which points lie within Euclidean
//! distance `epsilon` of point `i`, boundary included. Results always contain
//! `i` itself and are sorted by ascending point index.
//!
//! Two implementations are provided:
//!
//! - [`BruteForce`]: the reference O(n²) pairwise scan.
//! - [`Grid`]: a uniform cell hash with cell width close to `epsilon`. Each
//!   query only looks at neighboring cells, which is much faster in low
//!   dimensions and returns exactly the same neighbor lists.
//!
//! The choice of index is not observable through the clustering output.

mod brute;
mod grid;

pub use brute::BruteForce;
pub use grid::Grid;

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Radius queries over a loaded point set.
pub trait NeighborIndex: Sync {
    /// Number of indexed points.
    fn len(&self) -> usize;

    /// Whether the index holds no points.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Dimensionality of the indexed points (0 for an empty index).
    fn dim(&self) -> usize;

    /// All indices within `epsilon` of `point_idx`, including itself, ascending.
    fn range_query(&self, point_idx: usize, epsilon: f32) -> Vec<usize>;
}

/// Which spatial index to build for a clustering run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexKind {
    /// Grid for small dimensionality and enough points, brute force otherwise.
    #[default]
    Auto,
    /// Pairwise scan.
    BruteForce,
    /// Uniform cell grid.
    Grid,
}

/// Above this dimensionality the 3^d cell neighborhood outgrows a linear scan.
const GRID_MAX_DIM: usize = 3;
const GRID_MIN_POINTS: usize = 128;

impl IndexKind {
    /// Resolve `Auto` against the shape of the data.
    pub fn resolve(self, n_points: usize, dim: usize) -> IndexKind {
        match self {
            IndexKind::Auto => {
                if (1..=GRID_MAX_DIM).contains(&dim) && n_points >= GRID_MIN_POINTS {
                    IndexKind::Grid
                } else {
                    IndexKind::BruteForce
                }
            }
            other => other,
        }
    }

    /// Validate `data` and build the index tuned for radius `epsilon`.
    pub fn build(self, data: &[Vec<f32>], epsilon: f32) -> Result<SpatialIndex<'_>> {
        let dim = validate_points(data)?;
        let index = match self.resolve(data.len(), dim) {
            IndexKind::Grid => SpatialIndex::Grid(Grid::with_dim(data, dim, epsilon)?),
            _ => SpatialIndex::BruteForce(BruteForce::with_dim(data, dim)),
        };
        Ok(index)
    }
}

/// A built index of either kind.
#[derive(Debug, Clone)]
pub enum SpatialIndex<'a> {
    /// See [`BruteForce`].
    BruteForce(BruteForce<'a>),
    /// See [`Grid`].
    Grid(Grid<'a>),
}

impl SpatialIndex<'_> {
    /// The concrete kind that was built.
    pub fn kind(&self) -> IndexKind {
        match self {
            SpatialIndex::BruteForce(_) => IndexKind::BruteForce,
            SpatialIndex::Grid(_) => IndexKind::Grid,
        }
    }
}

impl NeighborIndex for SpatialIndex<'_> {
    fn len(&self) -> usize {
        match self {
            SpatialIndex::BruteForce(idx) => idx.len(),
            SpatialIndex::Grid(idx) => idx.len(),
        }
    }

    fn dim(&self) -> usize {
        match self {
            SpatialIndex::BruteForce(idx) => idx.dim(),
            SpatialIndex::Grid(idx) => idx.dim(),
        }
    }

    fn range_query(&self, point_idx: usize, epsilon: f32) -> Vec<usize> {
        match self {
            SpatialIndex::BruteForce(idx) => idx.range_query(point_idx, epsilon),
            SpatialIndex::Grid(idx) => idx.range_query(point_idx, epsilon),
        }
    }
}

/// Check that all points share one dimensionality and are finite.
///
/// Returns the common dimensionality, or 0 for an empty set.
pub fn validate_points(data: &[Vec<f32>]) -> Result<usize> {
    let Some(first) = data.first() else {
        return Ok(0);
    };
    let dim = first.len();

    for (index, point) in data.iter().enumerate() {
        if point.len() != dim {
            return Err(Error::DimensionMismatch {
                index,
                expected: dim,
                found: point.len(),
            });
        }
        if let Some(axis) = point.iter().position(|x| !x.is_finite()) {
            return Err(Error::NonFiniteCoordinate { index, axis });
        }
    }

    Ok(dim)
}

/// Squared distance accumulated in `f64`.
///
/// The square of any finite `f32` difference is finite and non-zero in `f64`,
/// so tiny or huge coordinates never collapse to 0 or overflow to infinity.
#[inline]
pub(crate) fn squared_euclidean(a: &[f32], b: &[f32]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    a.iter()
        .zip(b.iter())
        .map(|(&x, &y)| {
            let d = f64::from(x) - f64::from(y);
            d * d
        })
        .sum()
}

/// The inclusive radius test shared by every index.
#[inline]
pub(crate) fn within(a: &[f32], b: &[f32], epsilon: f32) -> bool {
    squared_euclidean(a, b) <= f64::from(epsilon).powi(2)
}
