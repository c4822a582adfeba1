//! DBSCAN: Density-Based Spatial Clustering of Applications with Noise.
//!
//! # The Algorithm (Ester et al., 1996)
//!
//! DBSCAN is a density-based clustering algorithm that groups points based on
//! neighborhood density. Unlike k-means, it:
//!
//! - Discovers clusters of arbitrary shape
//! - Automatically determines the number of clusters
//! - Identifies noise points (outliers)
//!
//! ## Core Concepts
//!
//! - **Epsilon (ε)**: Maximum distance between two points to be neighbors
//!   (inclusive).
//! - **MinPts**: Minimum neighborhood size, the point itself included, for a
//!   point to be "core".
//! - **Core point**: Has at least MinPts points within ε.
//! - **Border point**: Within ε of a core point but not core itself.
//! - **Noise point**: Neither core nor border.
//!
//! ## Algorithm Steps
//!
//! 1. For each unvisited point P, in ascending index order:
//!    - Find neighbors within ε
//!    - If |neighbors| < MinPts, mark as noise (may change later)
//!    - Else P is core: start a new cluster, expand from its neighbors
//!
//! 2. Expansion uses an explicit FIFO worklist. Every reached point joins the
//!    cluster unless another cluster already claimed it; reached core points
//!    push their own neighbors.
//!
//! Cluster ids are handed out in discovery order, and a border point reachable
//! from two clusters belongs to whichever cluster was expanded first.
//!
//! ## Complexity
//!
//! - **Time**: O(n²) with [`IndexKind::BruteForce`], close to O(n · k) with
//!   [`IndexKind::Grid`] in low dimensions.
//! - **Space**: O(n) for labels, plus all neighbor lists when `parallel` is on.
//!
//! ## Limitations
//!
//! - Struggles with varying densities (consider OPTICS or HDBSCAN*)
//! - ε parameter is sensitive and dataset-dependent; see
//!   [`k_distances`](super::k_distances).
//!
//! ## References
//!
//! Ester et al. (1996). "A Density-Based Algorithm for Discovering Clusters
//! in Large Spatial Databases with Noise." KDD-96.

use std::collections::VecDeque;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::fit::DbscanFit;
use super::traits::Clustering;
use crate::error::{Error, Result};
use crate::spatial::{IndexKind, NeighborIndex};

/// Label used for noise by [`Clustering::fit_predict`].
pub const NOISE: usize = usize::MAX;

/// DBSCAN configuration.
///
/// Deserializes with defaults for missing fields, so `{"epsilon": 0.3}` is a
/// complete config.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DbscanParams {
    /// Neighborhood radius.
    pub epsilon: f32,
    /// Minimum neighborhood size (self included) for a core point.
    pub min_pts: usize,
    /// Spatial index used for radius queries.
    pub index: IndexKind,
    /// Compute all neighborhoods up front on the rayon pool.
    pub parallel: bool,
}

impl Default for DbscanParams {
    fn default() -> Self {
        Self {
            epsilon: 0.5,
            min_pts: 5,
            index: IndexKind::Auto,
            parallel: false,
        }
    }
}

impl DbscanParams {
    /// Check parameter ranges.
    pub fn validate(&self) -> Result<()> {
        if !self.epsilon.is_finite() || self.epsilon <= 0.0 {
            return Err(Error::InvalidParameter {
                name: "epsilon",
                message: "must be finite and positive",
            });
        }

        if self.min_pts == 0 {
            return Err(Error::InvalidParameter {
                name: "min_pts",
                message: "must be at least 1",
            });
        }

        Ok(())
    }
}

/// DBSCAN clustering algorithm.
#[derive(Debug, Clone, Default)]
pub struct Dbscan {
    params: DbscanParams,
}

impl Dbscan {
    /// Create a new DBSCAN clusterer.
    ///
    /// # Arguments
    ///
    /// * `epsilon` - Maximum distance between two points to be neighbors.
    /// * `min_pts` - Minimum number of points (self included) to form a dense region.
    ///
    /// # Typical Values
    ///
    /// - `epsilon`: Often read off a k-distance plot with k = `min_pts`.
    /// - `min_pts`: 2 * dimension is a common heuristic.
    pub fn new(epsilon: f32, min_pts: usize) -> Self {
        Self {
            params: DbscanParams {
                epsilon,
                min_pts,
                ..DbscanParams::default()
            },
        }
    }

    /// Create from a full parameter set.
    pub fn from_params(params: DbscanParams) -> Self {
        Self { params }
    }

    /// Current parameters.
    pub fn params(&self) -> &DbscanParams {
        &self.params
    }

    /// Set epsilon (neighborhood radius).
    pub fn with_epsilon(mut self, epsilon: f32) -> Self {
        self.params.epsilon = epsilon;
        self
    }

    /// Set minimum points for core classification.
    pub fn with_min_pts(mut self, min_pts: usize) -> Self {
        self.params.min_pts = min_pts;
        self
    }

    /// Select the spatial index.
    pub fn with_index(mut self, index: IndexKind) -> Self {
        self.params.index = index;
        self
    }

    /// Compute neighborhoods in parallel before labeling.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.params.parallel = parallel;
        self
    }

    /// Cluster `data` and return labels plus core flags.
    ///
    /// Parameters and input are validated before any labeling; on error no
    /// partial result is produced. Empty input yields an empty fit.
    pub fn fit(&self, data: &[Vec<f32>]) -> Result<DbscanFit> {
        self.params.validate()?;
        let index = self.params.index.build(data, self.params.epsilon)?;

        debug!(
            n = index.len(),
            dim = index.dim(),
            epsilon = self.params.epsilon,
            min_pts = self.params.min_pts,
            index = ?index.kind(),
            parallel = self.params.parallel,
            "dbscan fit"
        );

        let fit = self.fit_index(&index);

        debug!(
            n_clusters = fit.n_clusters(),
            n_noise = fit.noise_count(),
            n_core = fit.core_sample_indices().len(),
            "dbscan done"
        );
        Ok(fit)
    }

    /// Label every point of a prebuilt index. Parameters must already be valid.
    pub(crate) fn fit_index<I: NeighborIndex>(&self, index: &I) -> DbscanFit {
        let epsilon = self.params.epsilon;
        let mut hoods = if self.params.parallel {
            Neighborhoods::Cached(
                (0..index.len())
                    .into_par_iter()
                    .map(|i| index.range_query(i, epsilon))
                    .collect(),
            )
        } else {
            Neighborhoods::Lazy
        };

        let mut run = Run::new(index.len());
        for point_idx in 0..index.len() {
            if run.visited[point_idx] {
                continue;
            }
            run.visited[point_idx] = true;

            let neighbors = hoods.take(index, point_idx, epsilon);
            if neighbors.len() < self.params.min_pts {
                // Tentative noise; may be claimed later as a border point.
                continue;
            }

            let cluster_id = run.n_clusters;
            run.n_clusters += 1;
            run.core[point_idx] = true;
            run.labels[point_idx] = Some(cluster_id);

            let size = self.expand_cluster(index, &mut hoods, &mut run, &neighbors, cluster_id);
            trace!(cluster = cluster_id, seed = point_idx, size, "cluster expanded");
        }

        DbscanFit::new(run.labels, run.core, run.n_clusters)
    }

    /// Grow `cluster_id` from its seed's neighborhood. Returns the cluster size.
    fn expand_cluster<I: NeighborIndex>(
        &self,
        index: &I,
        hoods: &mut Neighborhoods,
        run: &mut Run,
        seed_neighbors: &[usize],
        cluster_id: usize,
    ) -> usize {
        let mut size = 1;
        size += run.reach(seed_neighbors, cluster_id);

        while let Some(q) = run.frontier.pop_front() {
            // Only unvisited points are queued, and each at most once.
            run.visited[q] = true;
            run.labels[q] = Some(cluster_id);
            size += 1;

            let neighbors = hoods.take(index, q, self.params.epsilon);
            if neighbors.len() >= self.params.min_pts {
                run.core[q] = true;
                size += run.reach(&neighbors, cluster_id);
            }
        }

        size
    }
}

/// Mutable state of one labeling pass.
struct Run {
    labels: Vec<Option<usize>>,
    visited: Vec<bool>,
    queued: Vec<bool>,
    core: Vec<bool>,
    frontier: VecDeque<usize>,
    n_clusters: usize,
}

impl Run {
    fn new(n: usize) -> Self {
        Self {
            labels: vec![None; n],
            visited: vec![false; n],
            queued: vec![false; n],
            core: vec![false; n],
            frontier: VecDeque::new(),
            n_clusters: 0,
        }
    }

    /// Handle the neighbors of a core point. Unvisited points go on the
    /// frontier; visited noise points become border points right away.
    /// Returns how many noise points were claimed.
    fn reach(&mut self, neighbors: &[usize], cluster_id: usize) -> usize {
        let mut claimed = 0;
        for &r in neighbors {
            if self.visited[r] {
                // Visited and unlabeled means tentative noise. Labels from
                // other clusters are final.
                if self.labels[r].is_none() {
                    self.labels[r] = Some(cluster_id);
                    claimed += 1;
                }
            } else if !self.queued[r] {
                self.queued[r] = true;
                self.frontier.push_back(r);
            }
        }
        claimed
    }
}

/// Neighbor lists for one run. Every point is queried exactly once, so the
/// cached variant hands its lists out by value.
enum Neighborhoods {
    Lazy,
    Cached(Vec<Vec<usize>>),
}

impl Neighborhoods {
    fn take<I: NeighborIndex>(&mut self, index: &I, point_idx: usize, epsilon: f32) -> Vec<usize> {
        match self {
            Neighborhoods::Lazy => index.range_query(point_idx, epsilon),
            Neighborhoods::Cached(lists) => std::mem::take(&mut lists[point_idx]),
        }
    }
}

impl Clustering for Dbscan {
    /// Noise points are labeled [`NOISE`].
    fn fit_predict(&self, data: &[Vec<f32>]) -> Result<Vec<usize>> {
        let fit = self.fit(data)?;
        Ok(fit
            .labels()
            .iter()
            .map(|l| l.unwrap_or(NOISE))
            .collect())
    }

    /// DBSCAN discovers clusters dynamically, so this returns 0.
    ///
    /// To get the actual number of clusters, use [`Dbscan::fit`].
    fn n_clusters(&self) -> usize {
        0 // Unknown until fit
    }
}

/// Extended DBSCAN interface with noise detection.
pub trait DbscanExt {
    /// Fit and predict, returning labels where noise is marked as `None`.
    fn fit_predict_with_noise(&self, data: &[Vec<f32>]) -> Result<Vec<Option<usize>>>;

    /// Check if a label represents noise.
    fn is_noise(label: usize) -> bool {
        label == NOISE
    }
}

impl DbscanExt for Dbscan {
    fn fit_predict_with_noise(&self, data: &[Vec<f32>]) -> Result<Vec<Option<usize>>> {
        Ok(self.fit(data)?.labels().to_vec())
    }
}
