//! Parameter sensitivity grid over (ε, minPts).

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::dbscan::{Dbscan, DbscanParams};
use crate::error::Result;
use crate::spatial::{IndexKind, validate_points};

/// Outcome of one (ε, minPts) combination.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepCell {
    /// Neighborhood radius used.
    pub epsilon: f32,
    /// Minimum neighborhood size used.
    pub min_pts: usize,
    /// Clusters discovered.
    pub n_clusters: usize,
    /// Points labeled noise.
    pub n_noise: usize,
    /// `n_noise / n`, or 0 for empty input.
    pub noise_fraction: f32,
}

/// Run DBSCAN for every pair of `epsilons` × `min_pts_values`.
///
/// Cells come back row-major: all `min_pts_values` for the first epsilon, then
/// the second, and so on. Every parameter and the input are validated before
/// any clustering runs. Epsilon rows are evaluated in parallel; one index is
/// built per epsilon and shared by its row.
pub fn sweep(
    data: &[Vec<f32>],
    epsilons: &[f32],
    min_pts_values: &[usize],
    index: IndexKind,
) -> Result<Vec<SweepCell>> {
    for &epsilon in epsilons {
        DbscanParams {
            epsilon,
            ..DbscanParams::default()
        }
        .validate()?;
    }
    for &min_pts in min_pts_values {
        DbscanParams {
            min_pts,
            ..DbscanParams::default()
        }
        .validate()?;
    }
    validate_points(data)?;

    debug!(
        n = data.len(),
        n_epsilons = epsilons.len(),
        n_min_pts = min_pts_values.len(),
        "dbscan parameter sweep"
    );

    let rows: Vec<Vec<SweepCell>> = epsilons
        .par_iter()
        .map(|&epsilon| -> Result<Vec<SweepCell>> {
            let built = index.build(data, epsilon)?;
            let row = min_pts_values
                .iter()
                .map(|&min_pts| {
                    let fit = Dbscan::new(epsilon, min_pts).fit_index(&built);
                    let n_noise = fit.noise_count();
                    SweepCell {
                        epsilon,
                        min_pts,
                        n_clusters: fit.n_clusters(),
                        n_noise,
                        noise_fraction: if data.is_empty() {
                            0.0
                        } else {
                            n_noise as f32 / data.len() as f32
                        },
                    }
                })
                .collect();
            Ok(row)
        })
        .collect::<Result<_>>()?;

    Ok(rows.into_iter().flatten().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn blobs() -> Vec<Vec<f32>> {
        let mut data = Vec::new();
        for (cx, cy) in [(0.0f32, 0.0f32), (4.0, 4.0)] {
            for i in 0..6 {
                let t = i as f32;
                data.push(vec![cx + 0.1 * t, cy + 0.05 * t]);
            }
        }
        data.push(vec![20.0, -20.0]);
        data
    }

    #[test]
    fn test_sweep_layout() {
        let data = blobs();
        let cells = sweep(&data, &[0.2, 1.0, 10.0], &[2, 7], IndexKind::Auto).unwrap();
        assert_eq!(cells.len(), 6);

        let pairs: Vec<(f32, usize)> = cells.iter().map(|c| (c.epsilon, c.min_pts)).collect();
        assert_eq!(
            pairs,
            vec![(0.2, 2), (0.2, 7), (1.0, 2), (1.0, 7), (10.0, 2), (10.0, 7)]
        );

        // eps 1.0, min_pts 2: two blobs, the far point is noise.
        assert_eq!(cells[2].n_clusters, 2);
        assert_eq!(cells[2].n_noise, 1);
        assert!((cells[2].noise_fraction - 1.0 / 13.0).abs() < 1e-6);

        // min_pts 7 exceeds each blob's size until the blobs merge.
        assert_eq!(cells[3].n_clusters, 0);
        assert_eq!(cells[5].n_clusters, 1);
    }

    #[test]
    fn test_sweep_matches_fit() {
        let data = blobs();
        let cells = sweep(&data, &[0.15, 0.6], &[1, 3], IndexKind::Grid).unwrap();
        for cell in cells {
            let fit = Dbscan::new(cell.epsilon, cell.min_pts).fit(&data).unwrap();
            assert_eq!(cell.n_clusters, fit.n_clusters());
            assert_eq!(cell.n_noise, fit.noise_count());
        }
    }

    #[test]
    fn test_sweep_validation() {
        let data = blobs();
        let err = sweep(&data, &[0.5, -0.1], &[3], IndexKind::Auto).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidParameter);

        let err = sweep(&data, &[0.5], &[0], IndexKind::Auto).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidParameter);

        assert!(sweep(&data, &[], &[3], IndexKind::Auto).unwrap().is_empty());
        assert!(sweep(&[], &[0.5], &[3], IndexKind::Auto).unwrap()[0].noise_fraction == 0.0);
    }
}
