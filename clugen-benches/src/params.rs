//! Benchmark parameter types.
//!
//! Groups the knobs of a generation benchmark so each Criterion input has a
//! stable, readable identifier.

use std::fmt;

use clugen_core::{ClugenParams, Direction};

/// Average separation between cluster centers along every dimension.
const CLUSTER_SEP: f64 = 20.0;
/// Average supporting line length.
const LINE_LENGTH: f64 = 10.0;
/// Standard deviation of the supporting line lengths.
const LINE_LENGTH_DISP: f64 = 1.5;
/// Standard deviation of the lateral point displacement.
const LATERAL_DISP: f64 = 1.0;
/// Standard deviation of the per-cluster angle deltas, in radians.
const ANGLE_DISP: f64 = 0.3;

/// Parameters for a generation benchmark run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GenerationBenchParams {
    /// Number of dimensions.
    pub num_dims: usize,
    /// Number of clusters.
    pub num_clusters: usize,
    /// Number of points.
    pub num_points: usize,
}

impl GenerationBenchParams {
    /// Builds generator parameters with a diagonal main direction and fixed
    /// dispersions.
    ///
    /// # Examples
    /// ```
    /// use clugen_benches::params::GenerationBenchParams;
    ///
    /// let params = GenerationBenchParams { num_dims: 3, num_clusters: 4, num_points: 100 };
    /// let clugen_params = params.clugen_params();
    /// assert_eq!(clugen_params.cluster_sep.len(), 3);
    /// ```
    #[must_use]
    pub fn clugen_params(&self) -> ClugenParams {
        ClugenParams {
            num_dims: self.num_dims,
            num_clusters: self.num_clusters,
            num_points: self.num_points,
            direction: Direction::Single(vec![1.0; self.num_dims]),
            angle_disp: ANGLE_DISP,
            cluster_sep: vec![CLUSTER_SEP; self.num_dims],
            llength: LINE_LENGTH,
            llength_disp: LINE_LENGTH_DISP,
            lateral_disp: LATERAL_DISP,
        }
    }
}

impl fmt::Display for GenerationBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "d={},k={},n={}",
            self.num_dims, self.num_clusters, self.num_points
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(2, 4, 1_000, "d=2,k=4,n=1000")]
    #[case(30, 1, 10, "d=30,k=1,n=10")]
    fn display_names_every_knob(
        #[case] num_dims: usize,
        #[case] num_clusters: usize,
        #[case] num_points: usize,
        #[case] expected: &str,
    ) {
        let params = GenerationBenchParams {
            num_dims,
            num_clusters,
            num_points,
        };
        assert_eq!(params.to_string(), expected);
    }

    #[rstest]
    fn clugen_params_match_dimensions() {
        let params = GenerationBenchParams {
            num_dims: 5,
            num_clusters: 2,
            num_points: 50,
        }
        .clugen_params();
        assert_eq!(params.direction, Direction::Single(vec![1.0; 5]));
        assert_eq!(params.cluster_sep, vec![CLUSTER_SEP; 5]);
        assert_eq!(params.num_points, 50);
    }
}
