//! The result of a DBSCAN run.

use serde::{Deserialize, Serialize};

/// Role a point plays in the final partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointKind {
    /// At least `min_pts` points (itself included) within epsilon.
    Core,
    /// Not core, but within epsilon of a core point.
    Border,
    /// Neither core nor border.
    Noise,
}

/// Counts describing one clustering run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FitSummary {
    /// Number of input points.
    pub n_points: usize,
    /// Number of clusters discovered.
    pub n_clusters: usize,
    /// Points classified as core.
    pub n_core: usize,
    /// Points classified as border.
    pub n_border: usize,
    /// Points classified as noise.
    pub n_noise: usize,
}

/// Per-point labels and core flags produced by [`Dbscan::fit`](super::Dbscan::fit).
///
/// Cluster ids are `0..n_clusters()`, numbered in the order their seeding core
/// point was reached by the ascending-index scan. Noise is `None`.
///
/// Deserialization checks that the fields describe a consistent partition:
/// equal lengths, every label below `n_clusters`, and every core point labeled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawFit")]
pub struct DbscanFit {
    labels: Vec<Option<usize>>,
    core: Vec<bool>,
    n_clusters: usize,
}

/// Unchecked wire form of [`DbscanFit`].
#[derive(Deserialize)]
struct RawFit {
    labels: Vec<Option<usize>>,
    core: Vec<bool>,
    n_clusters: usize,
}

impl TryFrom<RawFit> for DbscanFit {
    type Error = &'static str;

    fn try_from(raw: RawFit) -> Result<Self, Self::Error> {
        if raw.labels.len() != raw.core.len() {
            return Err("labels and core must have the same length");
        }
        if raw.labels.iter().flatten().any(|&c| c >= raw.n_clusters) {
            return Err("cluster label out of range for n_clusters");
        }
        if raw.labels.iter().zip(&raw.core).any(|(l, &c)| c && l.is_none()) {
            return Err("core point without a cluster label");
        }
        Ok(Self::new(raw.labels, raw.core, raw.n_clusters))
    }
}

impl DbscanFit {
    pub(crate) fn new(labels: Vec<Option<usize>>, core: Vec<bool>, n_clusters: usize) -> Self {
        debug_assert_eq!(labels.len(), core.len());
        Self {
            labels,
            core,
            n_clusters,
        }
    }

    /// Number of labeled points.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether the run had no input points.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Cluster label per point, `None` for noise.
    pub fn labels(&self) -> &[Option<usize>] {
        &self.labels
    }

    /// Cluster label of point `i`, `None` for noise.
    pub fn label(&self, i: usize) -> Option<usize> {
        self.labels[i]
    }

    /// Labels with noise encoded as `-1`.
    pub fn labels_signed(&self) -> Vec<i64> {
        self.labels
            .iter()
            .map(|l| l.map_or(-1, |c| c as i64))
            .collect()
    }

    /// Core flag per point.
    pub fn core_mask(&self) -> &[bool] {
        &self.core
    }

    /// Whether point `i` is a core point.
    pub fn is_core(&self, i: usize) -> bool {
        self.core[i]
    }

    /// Indices of core points, ascending.
    pub fn core_sample_indices(&self) -> Vec<usize> {
        self.core
            .iter()
            .enumerate()
            .filter_map(|(i, &c)| c.then_some(i))
            .collect()
    }

    /// Number of clusters discovered.
    pub fn n_clusters(&self) -> usize {
        self.n_clusters
    }

    /// Number of noise points.
    pub fn noise_count(&self) -> usize {
        self.labels.iter().filter(|l| l.is_none()).count()
    }

    /// Number of points per cluster id.
    pub fn cluster_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.n_clusters];
        for c in self.labels.iter().flatten() {
            sizes[*c] += 1;
        }
        sizes
    }

    /// Role of point `i`.
    pub fn point_kind(&self, i: usize) -> PointKind {
        if self.core[i] {
            PointKind::Core
        } else if self.labels[i].is_some() {
            PointKind::Border
        } else {
            PointKind::Noise
        }
    }

    /// Role of every point, in input order.
    pub fn point_kinds(&self) -> Vec<PointKind> {
        (0..self.len()).map(|i| self.point_kind(i)).collect()
    }

    /// Aggregate counts.
    pub fn summary(&self) -> FitSummary {
        let mut summary = FitSummary {
            n_points: self.len(),
            n_clusters: self.n_clusters,
            ..FitSummary::default()
        };
        for kind in self.point_kinds() {
            match kind {
                PointKind::Core => summary.n_core += 1,
                PointKind::Border => summary.n_border += 1,
                PointKind::Noise => summary.n_noise += 1,
            }
        }
        summary
    }
}
