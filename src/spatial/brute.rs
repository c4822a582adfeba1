use super::{NeighborIndex, validate_points, within};
use crate::error::Result;

/// Reference index: scans every point for every query.
#[derive(Debug, Clone)]
pub struct BruteForce<'a> {
    data: &'a [Vec<f32>],
    dim: usize,
}

impl<'a> BruteForce<'a> {
    /// Build over `data`, failing on ragged or non-finite input.
    pub fn build(data: &'a [Vec<f32>]) -> Result<Self> {
        let dim = validate_points(data)?;
        Ok(Self::with_dim(data, dim))
    }

    pub(crate) fn with_dim(data: &'a [Vec<f32>], dim: usize) -> Self {
        Self { data, dim }
    }
}

impl NeighborIndex for BruteForce<'_> {
    fn len(&self) -> usize {
        self.data.len()
    }

    fn dim(&self) -> usize {
        self.dim
    }

    fn range_query(&self, point_idx: usize, epsilon: f32) -> Vec<usize> {
        let point = &self.data[point_idx];
        self.data
            .iter()
            .enumerate()
            .filter(|(idx, other)| *idx == point_idx || within(point, other, epsilon))
            .map(|(idx, _)| idx)
            .collect()
    }
}
