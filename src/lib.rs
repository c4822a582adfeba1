//! Density-based spatial clustering.
//!
//! `dbscan_core` partitions a set of dense vectors into clusters plus noise
//! with DBSCAN, and reports for every point whether it is a core point.
//!
//! - [`cluster`]: the clustering engine, result types, and parameter helpers.
//! - [`spatial`]: fixed-radius neighbor indexes (brute force and grid).
//! - [`preprocess`]: feature standardization.
//!
//! Runs are deterministic: the same points and parameters always produce the
//! same labels, cluster ids, and core set, whichever index or threading mode is
//! selected.

#![forbid(unsafe_code)]

pub mod cluster;
pub mod error;
pub mod preprocess;
pub mod spatial;

pub use cluster::{
    Clustering, Dbscan, DbscanExt, DbscanFit, DbscanParams, FitSummary, NOISE, PointKind,
    SweepCell, k_distances, sweep,
};
pub use error::{Error, ErrorKind, Result};
pub use spatial::IndexKind;
