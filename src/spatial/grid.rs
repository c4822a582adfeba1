use super::{NeighborIndex, validate_points, within};
use crate::error::{Error, Result};
use rustc_hash::FxHashMap;

/// Cells are made slightly wider than the build radius so that pairs accepted
/// by the distance test never end up more than one cell apart.
const CELL_SLACK: f64 = 1.0 + 1e-4;

/// Uniform grid index: points are bucketed by `floor(x / width)` per axis.
///
/// A query for radius `epsilon` inspects the `(2r + 1)^d` cells around the
/// query point, with `r = ceil(epsilon / width)`, and then applies the same
/// inclusive distance test as [`BruteForce`](super::BruteForce).
#[derive(Debug, Clone)]
pub struct Grid<'a> {
    data: &'a [Vec<f32>],
    dim: usize,
    width: f64,
    /// Cell coordinate of every point, in input order.
    cells: Vec<Vec<i64>>,
    /// Point indices per cell, ascending.
    buckets: FxHashMap<Vec<i64>, Vec<usize>>,
}

impl<'a> Grid<'a> {
    /// Build over `data` with cells sized for queries of radius `epsilon`.
    pub fn build(data: &'a [Vec<f32>], epsilon: f32) -> Result<Self> {
        let dim = validate_points(data)?;
        Self::with_dim(data, dim, epsilon)
    }

    pub(crate) fn with_dim(data: &'a [Vec<f32>], dim: usize, epsilon: f32) -> Result<Self> {
        if !(epsilon.is_finite() && epsilon > 0.0) {
            return Err(Error::InvalidParameter {
                name: "epsilon",
                message: "grid cell width must be finite and positive",
            });
        }
        let width = f64::from(epsilon) * CELL_SLACK;

        let mut cells = Vec::with_capacity(data.len());
        let mut buckets: FxHashMap<Vec<i64>, Vec<usize>> = FxHashMap::default();
        for (idx, point) in data.iter().enumerate() {
            let cell = cell_of(point, width);
            buckets.entry(cell.clone()).or_default().push(idx);
            cells.push(cell);
        }

        Ok(Self {
            data,
            dim,
            width,
            cells,
            buckets,
        })
    }

    /// Number of non-empty cells.
    pub fn n_cells(&self) -> usize {
        self.buckets.len()
    }
}

fn cell_of(point: &[f32], width: f64) -> Vec<i64> {
    // `as` saturates, which keeps far-out points in a valid (shared) cell.
    point
        .iter()
        .map(|&x| (f64::from(x) / width).floor() as i64)
        .collect()
}

impl NeighborIndex for Grid<'_> {
    fn len(&self) -> usize {
        self.data.len()
    }

    fn dim(&self) -> usize {
        self.dim
    }

    fn range_query(&self, point_idx: usize, epsilon: f32) -> Vec<usize> {
        let point = &self.data[point_idx];
        let center = &self.cells[point_idx];
        let reach = (f64::from(epsilon) / self.width).ceil().max(1.0) as i64;

        let mut out = Vec::new();
        if self.dim == 0 {
            // Zero-dimensional points all coincide.
            out.extend(0..self.data.len());
            return out;
        }

        // Odometer over offsets in [-reach, reach]^dim.
        let mut offset = vec![-reach; self.dim];
        let mut cell = vec![0i64; self.dim];
        loop {
            for (c, (&base, &off)) in cell.iter_mut().zip(center.iter().zip(offset.iter())) {
                *c = base.saturating_add(off);
            }
            if let Some(members) = self.buckets.get(&cell) {
                out.extend(
                    members
                        .iter()
                        .copied()
                        .filter(|&j| j == point_idx || within(point, &self.data[j], epsilon)),
                );
            }

            let mut axis = 0;
            loop {
                if axis == self.dim {
                    out.sort_unstable();
                    out.dedup();
                    return out;
                }
                if offset[axis] < reach {
                    offset[axis] += 1;
                    break;
                }
                offset[axis] = -reach;
                axis += 1;
            }
        }
    }
}
