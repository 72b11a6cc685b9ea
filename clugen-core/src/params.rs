//! Mandatory generation parameters.

use crate::{
    Result,
    error::ClugenError,
    matrix::Matrix,
    vector::{norm, normalize},
};

/// Main direction of the clusters' supporting lines.
///
/// A single vector is shared by every cluster; per-cluster directions supply
/// one row per cluster. Directions need not be unit vectors but must not be
/// zero.
///
/// # Examples
/// ```
/// use clugen_core::Direction;
///
/// let shared = Direction::from(vec![1.0, 1.0]);
/// assert!(matches!(shared, Direction::Single(_)));
///
/// let per_cluster = Direction::from(vec![vec![1.0, 0.0], vec![0.0, 1.0]]);
/// assert!(matches!(per_cluster, Direction::PerCluster(_)));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Direction {
    /// One direction broadcast to every cluster.
    Single(Vec<f64>),
    /// One direction per cluster.
    PerCluster(Vec<Vec<f64>>),
}

impl Direction {
    /// Validates the shape and magnitude of the direction(s) and returns one
    /// unit vector per cluster.
    pub(crate) fn resolve(&self, num_clusters: usize, num_dims: usize) -> Result<Matrix> {
        let shape_error = ClugenError::DirectionShape {
            num_clusters,
            num_dims,
        };
        let rows: Vec<&[f64]> = match self {
            Self::Single(direction) => {
                if direction.len() != num_dims {
                    return Err(shape_error);
                }
                vec![direction.as_slice(); num_clusters]
            }
            Self::PerCluster(directions) => {
                if directions.len() != num_clusters
                    || directions.iter().any(|row| row.len() != num_dims)
                {
                    return Err(shape_error);
                }
                directions.iter().map(Vec::as_slice).collect()
            }
        };

        if let Some(index) = rows.iter().position(|row| norm(row) < f64::EPSILON) {
            let index = match self {
                Self::Single(_) => 0,
                Self::PerCluster(_) => index,
            };
            return Err(ClugenError::ZeroDirection { index });
        }

        let data = rows.into_iter().flat_map(normalize).collect();
        Matrix::from_row_major(num_clusters, num_dims, data)
    }
}

impl From<Vec<f64>> for Direction {
    fn from(direction: Vec<f64>) -> Self {
        Self::Single(direction)
    }
}

impl From<&[f64]> for Direction {
    fn from(direction: &[f64]) -> Self {
        Self::Single(direction.to_vec())
    }
}

impl<const N: usize> From<[f64; N]> for Direction {
    fn from(direction: [f64; N]) -> Self {
        Self::Single(direction.to_vec())
    }
}

impl From<Vec<Vec<f64>>> for Direction {
    fn from(directions: Vec<Vec<f64>>) -> Self {
        Self::PerCluster(directions)
    }
}

impl From<&Matrix> for Direction {
    fn from(directions: &Matrix) -> Self {
        Self::PerCluster(directions.to_rows())
    }
}

/// The nine mandatory parameters of a generation run.
///
/// # Examples
/// ```
/// use clugen_core::{ClugenParams, Direction};
///
/// let params = ClugenParams {
///     num_dims: 2,
///     num_clusters: 4,
///     num_points: 200,
///     direction: Direction::from([1.0, 0.0]),
///     angle_disp: 0.0,
///     cluster_sep: vec![10.0, 10.0],
///     llength: 10.0,
///     llength_disp: 0.0,
///     lateral_disp: 0.0,
/// };
/// assert_eq!(params.cluster_sep.len(), params.num_dims);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ClugenParams {
    /// Number of dimensions of every point.
    pub num_dims: usize,
    /// Number of clusters to generate.
    pub num_clusters: usize,
    /// Nominal total number of points.
    pub num_points: usize,
    /// Main direction of the supporting lines.
    pub direction: Direction,
    /// Standard deviation of the angle between each cluster's line and the
    /// main direction, in radians.
    pub angle_disp: f64,
    /// Average separation between cluster centers along each dimension.
    pub cluster_sep: Vec<f64>,
    /// Average length of the supporting lines.
    pub llength: f64,
    /// Standard deviation of the supporting line lengths.
    pub llength_disp: f64,
    /// Standard deviation of the lateral displacement of points from their
    /// projections.
    pub lateral_disp: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn single_direction_is_normalised_and_broadcast() {
        let directions = Direction::from([3.0, 4.0])
            .resolve(3, 2)
            .expect("valid direction");
        assert_eq!(directions.rows(), 3);
        for row in directions.iter_rows() {
            assert!((row[0] - 0.6).abs() < 1e-12);
            assert!((row[1] - 0.8).abs() < 1e-12);
        }
    }

    #[rstest]
    fn per_cluster_directions_are_normalised_independently() {
        let directions = Direction::from(vec![vec![2.0, 0.0], vec![0.0, -5.0]])
            .resolve(2, 2)
            .expect("valid directions");
        assert_eq!(directions.to_rows(), vec![vec![1.0, 0.0], vec![0.0, -1.0]]);
    }

    #[rstest]
    #[case(Direction::from([1.0, 0.0, 0.0]))]
    #[case(Direction::from(vec![vec![1.0, 0.0]]))]
    #[case(Direction::from(vec![vec![1.0, 0.0], vec![1.0]]))]
    fn mismatched_shapes_are_rejected(#[case] direction: Direction) {
        let err = direction.resolve(2, 2).expect_err("shape mismatch");
        assert_eq!(
            err,
            ClugenError::DirectionShape {
                num_clusters: 2,
                num_dims: 2
            }
        );
    }

    #[rstest]
    #[case(Direction::from([0.0, 0.0]), 0)]
    #[case(Direction::from(vec![vec![1.0, 1.0], vec![0.0, 0.0]]), 1)]
    fn zero_directions_are_rejected(#[case] direction: Direction, #[case] index: usize) {
        let err = direction.resolve(2, 2).expect_err("zero magnitude");
        assert_eq!(err, ClugenError::ZeroDirection { index });
    }
}
