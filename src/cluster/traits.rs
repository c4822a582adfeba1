use crate::error::Result;

/// Hard clustering: one label per input point.
pub trait Clustering {
    /// Fit and return one label per point, in input order.
    ///
    /// Points left outside every cluster are labeled [`NOISE`](super::NOISE).
    fn fit_predict(&self, data: &[Vec<f32>]) -> Result<Vec<usize>>;

    /// Cluster count fixed by configuration, or 0 when the algorithm discovers
    /// it from the data.
    fn n_clusters(&self) -> usize;
}
