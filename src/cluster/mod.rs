//! Density-based clustering.
//!
//! ## DBSCAN
//!
//! Density-based clustering that can discover non-convex clusters and identify
//! outliers (noise points). DBSCAN does not require specifying the number of
//! clusters in advance; it needs a radius ε and a minimum neighborhood size.
//!
//! Each point ends up in one of three roles ([`PointKind`]):
//!
//! - **Core**: at least `min_pts` points (itself included) within ε.
//! - **Border**: not core, but within ε of a core point. Joins that cluster.
//! - **Noise**: neither.
//!
//! Only the fixed-radius variant is implemented. Variable-density extensions
//! (OPTICS, HDBSCAN*) are out of scope.
//!
//! ## Choosing parameters
//!
//! - [`k_distances`] gives the sorted k-distance curve for picking ε.
//! - [`sweep`] reports cluster and noise counts over a grid of (ε, minPts).
//! - [`standardize`](crate::preprocess::standardize) puts features on a common
//!   scale first.
//!
//! ## Usage
//!
//! ```rust
//! use dbscan_core::cluster::{Clustering, Dbscan, PointKind};
//!
//! let data = vec![
//!     vec![0.0, 0.0],
//!     vec![0.1, 0.1],
//!     vec![0.2, 0.0],
//!     vec![10.0, 10.0],
//! ];
//!
//! let fit = Dbscan::new(0.5, 3).fit(&data).unwrap();
//! assert_eq!(fit.n_clusters(), 1);
//! assert_eq!(fit.labels_signed(), vec![0, 0, 0, -1]);
//! assert_eq!(fit.point_kind(3), PointKind::Noise);
//!
//! // Plain labels, noise as `NOISE`.
//! let labels = Dbscan::new(0.5, 3).fit_predict(&data).unwrap();
//! assert_eq!(labels[3], dbscan_core::NOISE);
//! ```

mod dbscan;
mod fit;
mod kdist;
mod param_grid;
mod traits;

pub use dbscan::{Dbscan, DbscanExt, DbscanParams, NOISE};
pub use fit::{DbscanFit, FitSummary, PointKind};
pub use kdist::k_distances;
pub use param_grid::{SweepCell, sweep};
pub use traits::Clustering;
