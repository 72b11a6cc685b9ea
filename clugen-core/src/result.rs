//! Aggregate output of a generation run.

use crate::matrix::Matrix;

/// Points, labels and the per-cluster intermediates that produced them.
///
/// Rows of `points` and `projections` are grouped by cluster, in cluster
/// order; `clusters` holds the matching 1-based labels.
///
/// # Examples
/// ```
/// use clugen_core::{ClugenParams, Direction, clugen};
///
/// let clusters = clugen(ClugenParams {
///     num_dims: 3,
///     num_clusters: 2,
///     num_points: 20,
///     direction: Direction::from([0.0, 0.0, 1.0]),
///     angle_disp: 0.0,
///     cluster_sep: vec![8.0, 8.0, 8.0],
///     llength: 4.0,
///     llength_disp: 0.5,
///     lateral_disp: 0.2,
/// })?;
/// assert_eq!(clusters.num_dims(), 3);
/// assert_eq!(clusters.num_clusters(), 2);
/// assert_eq!(clusters.points().rows(), clusters.clusters().len());
/// # Ok::<(), clugen_core::ClugenError>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Clusters {
    pub(crate) points: Matrix,
    pub(crate) clusters: Vec<usize>,
    pub(crate) projections: Matrix,
    pub(crate) sizes: Vec<usize>,
    pub(crate) centers: Matrix,
    pub(crate) directions: Matrix,
    pub(crate) angles: Vec<f64>,
    pub(crate) lengths: Vec<f64>,
}

impl Clusters {
    /// Final points, one row per point.
    #[must_use]
    pub fn points(&self) -> &Matrix {
        &self.points
    }

    /// 1-based cluster label of every point.
    #[must_use]
    pub fn clusters(&self) -> &[usize] {
        &self.clusters
    }

    /// Projection of every point on its cluster's supporting line.
    #[must_use]
    pub fn projections(&self) -> &Matrix {
        &self.projections
    }

    /// Number of points in each cluster.
    #[must_use]
    pub fn sizes(&self) -> &[usize] {
        &self.sizes
    }

    /// Center of each cluster's supporting line.
    #[must_use]
    pub fn centers(&self) -> &Matrix {
        &self.centers
    }

    /// Final unit direction of each cluster's supporting line.
    #[must_use]
    pub fn directions(&self) -> &Matrix {
        &self.directions
    }

    /// Angle delta applied to each cluster's main direction, in radians.
    #[must_use]
    pub fn angles(&self) -> &[f64] {
        &self.angles
    }

    /// Length of each cluster's supporting line.
    #[must_use]
    pub fn lengths(&self) -> &[f64] {
        &self.lengths
    }

    /// Total number of generated points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    /// Returns `true` when no point was generated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    /// Number of dimensions of every point.
    #[must_use]
    pub fn num_dims(&self) -> usize {
        self.centers.cols()
    }

    /// Number of clusters, including empty ones.
    #[must_use]
    pub fn num_clusters(&self) -> usize {
        self.sizes.len()
    }

    /// Points of the cluster at position `index`, whose label is `index + 1`.
    ///
    /// Returns `None` when `index` is out of range.
    ///
    /// # Examples
    /// ```
    /// use clugen_core::{ClugenBuilder, ClugenParams, Direction};
    ///
    /// let params = ClugenParams {
    ///     num_dims: 2,
    ///     num_clusters: 3,
    ///     num_points: 12,
    ///     direction: Direction::from([1.0, 0.0]),
    ///     angle_disp: 0.0,
    ///     cluster_sep: vec![5.0, 5.0],
    ///     llength: 2.0,
    ///     llength_disp: 0.0,
    ///     lateral_disp: 0.0,
    /// };
    /// let clusters = ClugenBuilder::new(params)
    ///     .with_cluster_sizes(vec![2, 4, 6])
    ///     .build()?
    ///     .generate()?;
    /// assert_eq!(clusters.cluster_points(1).map(|m| m.rows()), Some(4));
    /// assert!(clusters.cluster_points(3).is_none());
    /// # Ok::<(), clugen_core::ClugenError>(())
    /// ```
    #[must_use]
    pub fn cluster_points(&self, index: usize) -> Option<Matrix> {
        let (start, end) = self.cluster_bounds(index)?;
        self.points.slice_rows(start, end)
    }

    /// Projections of the cluster at position `index`.
    #[must_use]
    pub fn cluster_projections(&self, index: usize) -> Option<Matrix> {
        let (start, end) = self.cluster_bounds(index)?;
        self.projections.slice_rows(start, end)
    }

    /// Consumes the result, keeping only the points and their labels.
    #[must_use]
    pub fn into_labelled_points(self) -> (Matrix, Vec<usize>) {
        (self.points, self.clusters)
    }

    fn cluster_bounds(&self, index: usize) -> Option<(usize, usize)> {
        let size = *self.sizes.get(index)?;
        let start: usize = self.sizes.get(..index)?.iter().sum();
        Some((start, start + size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn clusters() -> Clusters {
        let points = Matrix::from_rows(vec![
            vec![0.0, 0.0],
            vec![1.0, 1.0],
            vec![2.0, 2.0],
            vec![3.0, 3.0],
        ])
        .expect("rectangular rows");
        Clusters {
            points: points.clone(),
            clusters: vec![1, 3, 3, 3],
            projections: points,
            sizes: vec![1, 0, 3],
            centers: Matrix::zeros(3, 2),
            directions: Matrix::zeros(3, 2),
            angles: vec![0.0; 3],
            lengths: vec![1.0; 3],
        }
    }

    #[rstest]
    fn counts_reflect_the_arrays(clusters: Clusters) {
        assert_eq!(clusters.len(), 4);
        assert!(!clusters.is_empty());
        assert_eq!(clusters.num_dims(), 2);
        assert_eq!(clusters.num_clusters(), 3);
    }

    #[rstest]
    #[case(0, Some(1))]
    #[case(1, Some(0))]
    #[case(2, Some(3))]
    #[case(3, None)]
    fn cluster_slices_follow_sizes(
        clusters: Clusters,
        #[case] index: usize,
        #[case] rows: Option<usize>,
    ) {
        assert_eq!(clusters.cluster_points(index).map(|m| m.rows()), rows);
        assert_eq!(clusters.cluster_projections(index).map(|m| m.rows()), rows);
    }

    #[rstest]
    fn last_cluster_slice_holds_its_points(clusters: Clusters) {
        let last = clusters.cluster_points(2).expect("cluster exists");
        assert_eq!(last.row(0), Some(&[1.0, 1.0][..]));
        assert_eq!(last.row(2), Some(&[3.0, 3.0][..]));
    }
}
