//! Builder utilities for configuring cluster generation.
//!
//! Collects the optional parameters of a run on top of [`ClugenParams`] and
//! validates the whole configuration before any randomness is consumed.

use std::sync::Arc;

use rand::RngCore;
use tracing::{instrument, warn};

use crate::{
    Result,
    clugen::Clugen,
    error::{ClugenError, GenerationStep},
    matrix::Matrix,
    params::ClugenParams,
    strategy::{
        AngleDeltasFn, CentersFn, LengthsFn, Override, PlacementStrategy, ProjectionStrategy,
        SizesFn,
    },
};

/// Selects how the per-cluster point generation loop is executed.
///
/// # Examples
/// ```
/// use clugen_core::Execution;
///
/// assert_eq!(Execution::default(), Execution::Sequential);
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Execution {
    /// Generate clusters one after another from the caller's RNG.
    #[default]
    Sequential,
    /// Generate clusters concurrently, each from its own RNG stream derived
    /// from a seed drawn from the caller's RNG.
    Parallel,
}

/// A strategy given directly or by its textual tag.
#[derive(Clone, Debug)]
enum Selection<S> {
    Strategy(S),
    Tag(Arc<str>),
}

impl<S: std::str::FromStr<Err = ClugenError>> Selection<S> {
    fn resolve(self) -> Result<S> {
        match self {
            Self::Strategy(strategy) => Ok(strategy),
            Self::Tag(tag) => tag.parse(),
        }
    }
}

/// Configures and constructs [`Clugen`] generators.
///
/// # Examples
/// ```
/// use clugen_core::{ClugenBuilder, ClugenParams, Direction};
///
/// let params = ClugenParams {
///     num_dims: 2,
///     num_clusters: 3,
///     num_points: 90,
///     direction: Direction::from([1.0, 1.0]),
///     angle_disp: 0.1,
///     cluster_sep: vec![10.0, 10.0],
///     llength: 8.0,
///     llength_disp: 1.0,
///     lateral_disp: 0.5,
/// };
/// let generator = ClugenBuilder::new(params)
///     .with_projection_tag("unif")
///     .with_placement_tag("n")
///     .with_seed(42)
///     .build()?;
/// let clusters = generator.generate()?;
/// assert_eq!(clusters.len(), 90);
/// # Ok::<(), clugen_core::ClugenError>(())
/// ```
#[derive(Clone, Debug)]
pub struct ClugenBuilder {
    params: ClugenParams,
    allow_empty: bool,
    cluster_offset: Option<Vec<f64>>,
    projection: Selection<ProjectionStrategy>,
    placement: Selection<PlacementStrategy>,
    sizes: Override<SizesFn, Vec<usize>>,
    centers: Override<CentersFn, Matrix>,
    lengths: Override<LengthsFn, Vec<f64>>,
    angles: Override<AngleDeltasFn, Vec<f64>>,
    seed: Option<u64>,
    execution: Execution,
}

impl ClugenBuilder {
    /// Creates a builder with every optional parameter at its default.
    #[must_use]
    pub fn new(params: ClugenParams) -> Self {
        Self {
            params,
            allow_empty: false,
            cluster_offset: None,
            projection: Selection::Strategy(ProjectionStrategy::default()),
            placement: Selection::Strategy(PlacementStrategy::default()),
            sizes: Override::Default,
            centers: Override::Default,
            lengths: Override::Default,
            angles: Override::Default,
            seed: None,
            execution: Execution::default(),
        }
    }

    /// Returns the mandatory parameters.
    #[must_use]
    pub fn params(&self) -> &ClugenParams {
        &self.params
    }

    /// Allows clusters with no points.
    #[must_use]
    pub fn with_allow_empty(mut self, allow_empty: bool) -> Self {
        self.allow_empty = allow_empty;
        self
    }

    /// Shifts every cluster center by `offset`, one entry per dimension.
    #[must_use]
    pub fn with_cluster_offset(mut self, offset: Vec<f64>) -> Self {
        self.cluster_offset = Some(offset);
        self
    }

    /// Selects the projection strategy.
    #[must_use]
    pub fn with_projection(mut self, projection: ProjectionStrategy) -> Self {
        self.projection = Selection::Strategy(projection);
        self
    }

    /// Selects the projection strategy by tag (`"norm"` or `"unif"`).
    ///
    /// Unknown tags are reported by [`Self::build`].
    #[must_use]
    pub fn with_projection_tag(mut self, tag: impl AsRef<str>) -> Self {
        self.projection = Selection::Tag(Arc::from(tag.as_ref()));
        self
    }

    /// Supplies custom projection distances `(line_length, count, rng)`.
    #[must_use]
    pub fn with_projection_fn<F>(self, function: F) -> Self
    where
        F: Fn(f64, usize, &mut dyn RngCore) -> Vec<f64> + Send + Sync + 'static,
    {
        self.with_projection(ProjectionStrategy::custom(function))
    }

    /// Selects the point placement strategy.
    #[must_use]
    pub fn with_placement(mut self, placement: PlacementStrategy) -> Self {
        self.placement = Selection::Strategy(placement);
        self
    }

    /// Selects the point placement strategy by tag (`"n-1"` or `"n"`).
    ///
    /// Unknown tags are reported by [`Self::build`] unless the run is
    /// one-dimensional, in which case placement never happens.
    #[must_use]
    pub fn with_placement_tag(mut self, tag: impl AsRef<str>) -> Self {
        self.placement = Selection::Tag(Arc::from(tag.as_ref()));
        self
    }

    /// Supplies a custom placement
    /// `(projections, lateral_disp, line_length, direction, center, rng)`.
    #[must_use]
    pub fn with_placement_fn<F>(self, function: F) -> Self
    where
        F: Fn(&Matrix, f64, f64, &[f64], &[f64], &mut dyn RngCore) -> Matrix
            + Send
            + Sync
            + 'static,
    {
        self.with_placement(PlacementStrategy::custom(function))
    }

    /// Uses precomputed cluster sizes instead of drawing them.
    ///
    /// The sizes are taken as-is; their sum becomes the effective number of
    /// points.
    #[must_use]
    pub fn with_cluster_sizes(mut self, sizes: Vec<usize>) -> Self {
        self.sizes = Override::Literal(sizes);
        self
    }

    /// Draws cluster sizes with `function(num_clusters, num_points, allow_empty, rng)`.
    #[must_use]
    pub fn with_cluster_sizes_fn<F>(mut self, function: F) -> Self
    where
        F: Fn(usize, usize, bool, &mut dyn RngCore) -> Vec<usize> + Send + Sync + 'static,
    {
        let function: Arc<SizesFn> = Arc::new(function);
        self.sizes = Override::Function(function);
        self
    }

    /// Uses precomputed cluster centers, one row per cluster.
    #[must_use]
    pub fn with_cluster_centers(mut self, centers: Matrix) -> Self {
        self.centers = Override::Literal(centers);
        self
    }

    /// Places cluster centers with
    /// `function(num_clusters, cluster_sep, cluster_offset, rng)`.
    #[must_use]
    pub fn with_cluster_centers_fn<F>(mut self, function: F) -> Self
    where
        F: Fn(usize, &[f64], &[f64], &mut dyn RngCore) -> Matrix + Send + Sync + 'static,
    {
        let function: Arc<CentersFn> = Arc::new(function);
        self.centers = Override::Function(function);
        self
    }

    /// Uses precomputed supporting line lengths.
    #[must_use]
    pub fn with_line_lengths(mut self, lengths: Vec<f64>) -> Self {
        self.lengths = Override::Literal(lengths);
        self
    }

    /// Draws line lengths with `function(num_clusters, llength, llength_disp, rng)`.
    #[must_use]
    pub fn with_line_lengths_fn<F>(mut self, function: F) -> Self
    where
        F: Fn(usize, f64, f64, &mut dyn RngCore) -> Vec<f64> + Send + Sync + 'static,
    {
        let function: Arc<LengthsFn> = Arc::new(function);
        self.lengths = Override::Function(function);
        self
    }

    /// Uses precomputed angle deltas, in radians.
    #[must_use]
    pub fn with_angle_deltas(mut self, deltas: Vec<f64>) -> Self {
        self.angles = Override::Literal(deltas);
        self
    }

    /// Draws angle deltas with `function(num_clusters, angle_disp, rng)`.
    #[must_use]
    pub fn with_angle_deltas_fn<F>(mut self, function: F) -> Self
    where
        F: Fn(usize, f64, &mut dyn RngCore) -> Vec<f64> + Send + Sync + 'static,
    {
        let function: Arc<AngleDeltasFn> = Arc::new(function);
        self.angles = Override::Function(function);
        self
    }

    /// Seeds the generator used by [`Clugen::generate`].
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the execution mode of the per-cluster loop.
    #[must_use]
    pub fn with_execution(mut self, execution: Execution) -> Self {
        self.execution = execution;
        self
    }

    /// Returns the configured execution mode.
    #[must_use]
    pub fn execution(&self) -> Execution {
        self.execution
    }

    /// Validates the configuration and constructs a [`Clugen`] generator.
    ///
    /// # Errors
    /// Returns the first failing check, in order: dimension and cluster
    /// counts, direction shape and magnitude, `cluster_sep` and
    /// `cluster_offset` lengths, point capacity, strategy tags, literal
    /// override shapes and execution availability.
    #[instrument(
        name = "clugen.build",
        err,
        skip(self),
        fields(
            num_dims = self.params.num_dims,
            num_clusters = self.params.num_clusters,
            num_points = self.params.num_points,
        ),
    )]
    pub fn build(self) -> Result<Clugen> {
        self.validate().inspect_err(|error| {
            warn!(code = %error.code(), %error, "rejected generator configuration");
        })
    }

    fn validate(self) -> Result<Clugen> {
        let Self {
            params,
            allow_empty,
            cluster_offset,
            projection,
            placement,
            sizes,
            centers,
            lengths,
            angles,
            seed,
            execution,
        } = self;
        let num_dims = params.num_dims;
        let num_clusters = params.num_clusters;

        if num_dims < 1 {
            return Err(ClugenError::InvalidDimensions { got: num_dims });
        }
        if num_clusters < 1 {
            return Err(ClugenError::InvalidClusterCount { got: num_clusters });
        }
        let directions = params.direction.resolve(num_clusters, num_dims)?;
        if params.cluster_sep.len() != num_dims {
            return Err(ClugenError::ClusterSepLength {
                expected: num_dims,
                got: params.cluster_sep.len(),
            });
        }
        let cluster_offset = cluster_offset.unwrap_or_else(|| vec![0.0; num_dims]);
        if cluster_offset.len() != num_dims {
            return Err(ClugenError::ClusterOffsetLength {
                expected: num_dims,
                got: cluster_offset.len(),
            });
        }
        if !allow_empty && params.num_points < num_clusters {
            return Err(ClugenError::InsufficientPoints {
                num_points: params.num_points,
                num_clusters,
            });
        }
        let projection = projection.resolve()?;
        let placement = if num_dims == 1 {
            placement.resolve().unwrap_or_default()
        } else {
            placement.resolve()?
        };

        check_literal_length(&sizes, GenerationStep::ClusterSizes, num_clusters)?;
        check_literal_length(&lengths, GenerationStep::LineLengths, num_clusters)?;
        check_literal_length(&angles, GenerationStep::AngleDeltas, num_clusters)?;
        if let Override::Literal(centers) = &centers {
            check_shape(centers, GenerationStep::ClusterCenters, num_clusters, num_dims)?;
        }

        if execution == Execution::Parallel && !cfg!(feature = "parallel") {
            return Err(ClugenError::ExecutionUnavailable {
                requested: execution,
            });
        }

        Ok(Clugen {
            params,
            directions,
            allow_empty,
            cluster_offset,
            projection,
            placement,
            sizes,
            centers,
            lengths,
            angles,
            seed,
            execution,
        })
    }
}

fn check_literal_length<F: ?Sized, T>(
    values: &Override<F, Vec<T>>,
    step: GenerationStep,
    expected: usize,
) -> Result<()> {
    match values {
        Override::Literal(values) => check_length(values, step, expected),
        Override::Default | Override::Function(_) => Ok(()),
    }
}

pub(crate) fn check_length<T>(values: &[T], step: GenerationStep, expected: usize) -> Result<()> {
    if values.len() == expected {
        Ok(())
    } else {
        Err(ClugenError::StepLength {
            step,
            expected,
            got: values.len(),
        })
    }
}

pub(crate) fn check_shape(
    matrix: &Matrix,
    step: GenerationStep,
    expected_rows: usize,
    expected_cols: usize,
) -> Result<()> {
    if matrix.rows() == expected_rows && matrix.cols() == expected_cols {
        Ok(())
    } else {
        Err(ClugenError::StepShape {
            step,
            expected_rows,
            expected_cols,
            rows: matrix.rows(),
            cols: matrix.cols(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::Direction;
    use rstest::{fixture, rstest};

    #[fixture]
    fn params() -> ClugenParams {
        ClugenParams {
            num_dims: 3,
            num_clusters: 4,
            num_points: 40,
            direction: Direction::from([1.0, 0.0, 0.0]),
            angle_disp: 0.2,
            cluster_sep: vec![5.0, 5.0, 5.0],
            llength: 6.0,
            llength_disp: 1.0,
            lateral_disp: 0.5,
        }
    }

    fn rejection(builder: ClugenBuilder) -> ClugenError {
        match builder.build() {
            Ok(_) => panic!("configuration should be rejected"),
            Err(err) => err,
        }
    }

    #[rstest]
    fn defaults_build(params: ClugenParams) {
        let generator = ClugenBuilder::new(params).build().expect("valid configuration");
        assert!(!generator.allow_empty());
        assert_eq!(generator.cluster_offset(), &[0.0, 0.0, 0.0]);
        assert_eq!(generator.projection().as_str(), "norm");
        assert_eq!(generator.placement().as_str(), "n-1");
        assert_eq!(generator.execution(), Execution::Sequential);
    }

    #[rstest]
    fn zero_dimensions_are_rejected(mut params: ClugenParams) {
        params.num_dims = 0;
        assert_eq!(
            rejection(ClugenBuilder::new(params)),
            ClugenError::InvalidDimensions { got: 0 }
        );
    }

    #[rstest]
    fn zero_clusters_are_rejected(mut params: ClugenParams) {
        params.num_clusters = 0;
        assert_eq!(
            rejection(ClugenBuilder::new(params)),
            ClugenError::InvalidClusterCount { got: 0 }
        );
    }

    #[rstest]
    fn separation_length_must_match_dimensions(mut params: ClugenParams) {
        params.cluster_sep = vec![1.0, 1.0];
        assert_eq!(
            rejection(ClugenBuilder::new(params)),
            ClugenError::ClusterSepLength {
                expected: 3,
                got: 2
            }
        );
    }

    #[rstest]
    fn offset_length_must_match_dimensions(params: ClugenParams) {
        let builder = ClugenBuilder::new(params).with_cluster_offset(vec![0.0; 4]);
        assert_eq!(
            rejection(builder),
            ClugenError::ClusterOffsetLength {
                expected: 3,
                got: 4
            }
        );
    }

    #[rstest]
    fn too_few_points_are_rejected_unless_empty_allowed(mut params: ClugenParams) {
        params.num_points = 3;
        assert_eq!(
            rejection(ClugenBuilder::new(params.clone())),
            ClugenError::InsufficientPoints {
                num_points: 3,
                num_clusters: 4
            }
        );
        assert!(ClugenBuilder::new(params).with_allow_empty(true).build().is_ok());
    }

    #[rstest]
    fn unknown_tags_are_rejected(params: ClugenParams) {
        let err = rejection(ClugenBuilder::new(params.clone()).with_projection_tag("gauss"));
        assert_eq!(err.code().as_str(), "CLUGEN_UNKNOWN_PROJECTION");
        let err = rejection(ClugenBuilder::new(params).with_placement_tag("n+1"));
        assert_eq!(err.code().as_str(), "CLUGEN_UNKNOWN_PLACEMENT");
    }

    #[rstest]
    fn unknown_placement_tag_is_ignored_in_one_dimension() {
        let params = ClugenParams {
            num_dims: 1,
            num_clusters: 2,
            num_points: 10,
            direction: Direction::from([1.0]),
            angle_disp: 0.0,
            cluster_sep: vec![10.0],
            llength: 5.0,
            llength_disp: 0.0,
            lateral_disp: 1.0,
        };
        assert!(
            ClugenBuilder::new(params.clone())
                .with_placement_tag("bogus")
                .build()
                .is_ok()
        );
        assert!(
            ClugenBuilder::new(params)
                .with_projection_tag("bogus")
                .build()
                .is_err()
        );
    }

    #[rstest]
    fn literal_sizes_must_match_cluster_count(params: ClugenParams) {
        let err = rejection(ClugenBuilder::new(params).with_cluster_sizes(vec![10, 10]));
        assert_eq!(
            err,
            ClugenError::StepLength {
                step: GenerationStep::ClusterSizes,
                expected: 4,
                got: 2
            }
        );
    }

    #[rstest]
    #[case(GenerationStep::LineLengths)]
    #[case(GenerationStep::AngleDeltas)]
    fn literal_real_vectors_must_match_cluster_count(
        params: ClugenParams,
        #[case] step: GenerationStep,
    ) {
        let builder = ClugenBuilder::new(params);
        let builder = match step {
            GenerationStep::LineLengths => builder.with_line_lengths(vec![1.0; 5]),
            _ => builder.with_angle_deltas(vec![0.0; 5]),
        };
        assert_eq!(
            rejection(builder),
            ClugenError::StepLength {
                step,
                expected: 4,
                got: 5
            }
        );
    }

    #[rstest]
    fn literal_centers_must_match_shape(params: ClugenParams) {
        let builder = ClugenBuilder::new(params).with_cluster_centers(Matrix::zeros(4, 2));
        assert_eq!(
            rejection(builder),
            ClugenError::StepShape {
                step: GenerationStep::ClusterCenters,
                expected_rows: 4,
                expected_cols: 3,
                rows: 4,
                cols: 2
            }
        );
    }

    #[cfg(feature = "parallel")]
    #[rstest]
    fn parallel_execution_is_available(params: ClugenParams) {
        let generator = ClugenBuilder::new(params)
            .with_execution(Execution::Parallel)
            .build()
            .expect("parallel feature enabled");
        assert_eq!(generator.execution(), Execution::Parallel);
    }

    #[cfg(not(feature = "parallel"))]
    #[rstest]
    fn parallel_execution_requires_feature(params: ClugenParams) {
        let builder = ClugenBuilder::new(params).with_execution(Execution::Parallel);
        assert_eq!(
            rejection(builder),
            ClugenError::ExecutionUnavailable {
                requested: Execution::Parallel
            }
        );
    }
}
