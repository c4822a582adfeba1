//! k-distance curve for choosing epsilon.
//!
//! Plot the returned values against their rank and pick ε near the "knee",
//! where the curve turns from steep (outliers) to flat (cluster interiors).
//! With `k = min_pts`, a point is core exactly when its k-distance is ≤ ε.

use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::spatial::{squared_euclidean, validate_points};

/// Distance from every point to its k-th nearest point, sorted descending.
///
/// The point itself counts as its own first neighbor, so `k = 1` gives all
/// zeros. Points with fewer than `k` points in the set get `f32::INFINITY`.
pub fn k_distances(data: &[Vec<f32>], k: usize) -> Result<Vec<f32>> {
    if k == 0 {
        return Err(Error::InvalidParameter {
            name: "k",
            message: "must be at least 1",
        });
    }
    validate_points(data)?;

    let mut out: Vec<f32> = data
        .par_iter()
        .map(|point| {
            if k > data.len() {
                return f32::INFINITY;
            }
            let mut d2: Vec<f64> = data
                .iter()
                .map(|other| squared_euclidean(point, other))
                .collect();
            let (_, kth, _) = d2.select_nth_unstable_by(k - 1, f64::total_cmp);
            kth.sqrt() as f32
        })
        .collect();

    out.sort_unstable_by(|a, b| b.total_cmp(a));
    Ok(out)
}
