//! Generation orchestration.
//!
//! Provides the [`Clugen`] generator produced by [`crate::ClugenBuilder`] and
//! the [`clugen`] convenience entry point.

use std::iter;

use rand::{RngCore, SeedableRng, rngs::SmallRng};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, info, instrument, warn};

use crate::{
    Result,
    builder::{ClugenBuilder, Execution, check_length, check_shape},
    error::GenerationStep,
    matrix::Matrix,
    params::ClugenParams,
    result::Clusters,
    strategy::{
        AngleDeltasFn, CentersFn, LengthsFn, Override, PlacementStrategy, ProjectionStrategy,
        SizesFn, angle_deltas, cluster_centers, cluster_sizes, line_lengths,
    },
    vector::{points_on_line, random_vector_at_angle},
};

/// Generates clusters along a single main direction with every option at its
/// default.
///
/// Equivalent to `ClugenBuilder::new(params).build()?.generate()`, drawing
/// randomness from an entropy-seeded generator.
///
/// # Errors
/// Returns the validation errors documented on [`ClugenBuilder::build`].
///
/// # Examples
/// ```
/// use clugen_core::{ClugenParams, Direction, clugen};
///
/// let clusters = clugen(ClugenParams {
///     num_dims: 2,
///     num_clusters: 4,
///     num_points: 200,
///     direction: Direction::from([1.0, 0.0]),
///     angle_disp: 0.4,
///     cluster_sep: vec![20.0, 15.0],
///     llength: 12.0,
///     llength_disp: 2.0,
///     lateral_disp: 1.5,
/// })?;
/// assert_eq!(clusters.len(), 200);
/// assert_eq!(clusters.sizes().iter().sum::<usize>(), 200);
/// # Ok::<(), clugen_core::ClugenError>(())
/// ```
pub fn clugen(params: ClugenParams) -> Result<Clusters> {
    ClugenBuilder::new(params).build()?.generate()
}

/// A validated generator.
///
/// Holds the resolved configuration; every call to [`Self::generate`] or
/// [`Self::generate_with_rng`] runs the full pipeline and returns a fresh
/// [`Clusters`].
///
/// # Examples
/// ```
/// use clugen_core::{ClugenBuilder, ClugenParams, Direction};
/// use rand::{SeedableRng, rngs::SmallRng};
///
/// let params = ClugenParams {
///     num_dims: 3,
///     num_clusters: 5,
///     num_points: 500,
///     direction: Direction::from([1.0, 0.0, 0.0]),
///     angle_disp: 0.2,
///     cluster_sep: vec![10.0, 10.0, 10.0],
///     llength: 6.0,
///     llength_disp: 1.0,
///     lateral_disp: 0.5,
/// };
/// let generator = ClugenBuilder::new(params).build()?;
/// let first = generator.generate_with_rng(&mut SmallRng::seed_from_u64(11))?;
/// let second = generator.generate_with_rng(&mut SmallRng::seed_from_u64(11))?;
/// assert_eq!(first, second);
/// # Ok::<(), clugen_core::ClugenError>(())
/// ```
#[derive(Clone, Debug)]
pub struct Clugen {
    pub(crate) params: ClugenParams,
    pub(crate) directions: Matrix,
    pub(crate) allow_empty: bool,
    pub(crate) cluster_offset: Vec<f64>,
    pub(crate) projection: ProjectionStrategy,
    pub(crate) placement: PlacementStrategy,
    pub(crate) sizes: Override<SizesFn, Vec<usize>>,
    pub(crate) centers: Override<CentersFn, Matrix>,
    pub(crate) lengths: Override<LengthsFn, Vec<f64>>,
    pub(crate) angles: Override<AngleDeltasFn, Vec<f64>>,
    pub(crate) seed: Option<u64>,
    pub(crate) execution: Execution,
}

/// Inputs of one iteration of the per-cluster loop.
struct ClusterInput<'a> {
    size: usize,
    center: &'a [f64],
    direction: &'a [f64],
    length: f64,
}

struct ClusterBlock {
    projections: Matrix,
    points: Matrix,
}

impl Clugen {
    /// Returns the mandatory parameters.
    #[must_use]
    pub fn params(&self) -> &ClugenParams {
        &self.params
    }

    /// Returns whether empty clusters are allowed.
    #[must_use]
    pub fn allow_empty(&self) -> bool {
        self.allow_empty
    }

    /// Returns the offset applied to every cluster center.
    #[must_use]
    pub fn cluster_offset(&self) -> &[f64] {
        &self.cluster_offset
    }

    /// Returns the normalised main direction of each cluster.
    #[must_use]
    pub fn main_directions(&self) -> &Matrix {
        &self.directions
    }

    /// Returns the projection strategy.
    #[must_use]
    pub fn projection(&self) -> &ProjectionStrategy {
        &self.projection
    }

    /// Returns the point placement strategy.
    #[must_use]
    pub fn placement(&self) -> &PlacementStrategy {
        &self.placement
    }

    /// Returns the seed used by [`Self::generate`], if any.
    #[must_use]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Returns the execution mode of the per-cluster loop.
    #[must_use]
    pub fn execution(&self) -> Execution {
        self.execution
    }

    /// Runs the pipeline with a generator seeded from the configured seed, or
    /// from system entropy when none was set.
    ///
    /// # Errors
    /// Returns [`crate::ClugenError::StepLength`] or
    /// [`crate::ClugenError::StepShape`] when a user-supplied function
    /// produces output of the wrong shape.
    pub fn generate(&self) -> Result<Clusters> {
        let mut rng = match self.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        self.generate_with_rng(&mut rng)
    }

    /// Runs the pipeline, drawing every random number from `rng`.
    ///
    /// Identical generators driven by identically seeded RNGs produce
    /// identical output.
    ///
    /// # Errors
    /// Returns [`crate::ClugenError::StepLength`] or
    /// [`crate::ClugenError::StepShape`] when a user-supplied function
    /// produces output of the wrong shape.
    pub fn generate_with_rng<R: RngCore>(&self, rng: &mut R) -> Result<Clusters> {
        self.run(rng)
    }

    #[instrument(
        name = "clugen.generate",
        err,
        skip(self, rng),
        fields(
            num_dims = self.params.num_dims,
            num_clusters = self.params.num_clusters,
            num_points = self.params.num_points,
            projection = self.projection.as_str(),
            placement = self.placement.as_str(),
            execution = ?self.execution,
        ),
    )]
    fn run(&self, rng: &mut dyn RngCore) -> Result<Clusters> {
        let num_dims = self.params.num_dims;
        let num_clusters = self.params.num_clusters;

        let sizes = self.resolve_sizes(rng)?;
        let total: usize = sizes.iter().sum();
        if total != self.params.num_points {
            warn!(
                effective = total,
                nominal = self.params.num_points,
                "cluster sizes do not sum to num_points"
            );
        }
        let centers = self.resolve_centers(rng)?;
        let lengths = self.resolve_lengths(rng)?;
        let angles = self.resolve_angles(rng)?;

        let mut directions = Matrix::zeros(num_clusters, num_dims);
        for ((row, main), &angle) in directions
            .iter_rows_mut()
            .zip(self.directions.iter_rows())
            .zip(&angles)
        {
            row.copy_from_slice(&random_vector_at_angle(main, angle, rng));
        }

        let blocks = {
            let inputs: Vec<ClusterInput<'_>> = sizes
                .iter()
                .zip(centers.iter_rows())
                .zip(directions.iter_rows())
                .zip(&lengths)
                .map(|(((&size, center), direction), &length)| ClusterInput {
                    size,
                    center,
                    direction,
                    length,
                })
                .collect();

            match self.execution {
                Execution::Sequential => self.generate_sequential(&inputs, rng)?,
                #[cfg(feature = "parallel")]
                Execution::Parallel => self.generate_parallel(&inputs, rng.next_u64())?,
                #[cfg(not(feature = "parallel"))]
                Execution::Parallel => {
                    return Err(crate::ClugenError::ExecutionUnavailable {
                        requested: Execution::Parallel,
                    });
                }
            }
        };

        let points = Matrix::vstack(num_dims, blocks.iter().map(|block| &block.points))?;
        let projections = Matrix::vstack(num_dims, blocks.iter().map(|block| &block.projections))?;
        let clusters: Vec<usize> = sizes
            .iter()
            .enumerate()
            .flat_map(|(index, &size)| iter::repeat_n(index + 1, size))
            .collect();

        #[cfg(feature = "metrics")]
        {
            metrics::counter!("clugen_generations_total").increment(1);
            metrics::counter!("clugen_points_generated_total").increment(total as u64);
        }
        info!(points = total, "generation completed");

        Ok(Clusters {
            points,
            clusters,
            projections,
            sizes,
            centers,
            directions,
            angles,
            lengths,
        })
    }

    fn resolve_sizes(&self, rng: &mut dyn RngCore) -> Result<Vec<usize>> {
        let ClugenParams {
            num_clusters,
            num_points,
            ..
        } = self.params;
        let sizes = match &self.sizes {
            Override::Default => cluster_sizes(num_clusters, num_points, self.allow_empty, rng),
            Override::Function(function) => function(num_clusters, num_points, self.allow_empty, rng),
            Override::Literal(sizes) => sizes.clone(),
        };
        check_length(&sizes, GenerationStep::ClusterSizes, num_clusters)?;
        debug!(step = %GenerationStep::ClusterSizes, source = self.sizes.kind(), "resolved step");
        Ok(sizes)
    }

    fn resolve_centers(&self, rng: &mut dyn RngCore) -> Result<Matrix> {
        let num_clusters = self.params.num_clusters;
        let sep = &self.params.cluster_sep;
        let centers = match &self.centers {
            Override::Default => cluster_centers(num_clusters, sep, &self.cluster_offset, rng),
            Override::Function(function) => function(num_clusters, sep, &self.cluster_offset, rng),
            Override::Literal(centers) => centers.clone(),
        };
        check_shape(
            &centers,
            GenerationStep::ClusterCenters,
            num_clusters,
            self.params.num_dims,
        )?;
        debug!(step = %GenerationStep::ClusterCenters, source = self.centers.kind(), "resolved step");
        Ok(centers)
    }

    fn resolve_lengths(&self, rng: &mut dyn RngCore) -> Result<Vec<f64>> {
        let ClugenParams {
            num_clusters,
            llength,
            llength_disp,
            ..
        } = self.params;
        let lengths = match &self.lengths {
            Override::Default => line_lengths(num_clusters, llength, llength_disp, rng),
            Override::Function(function) => function(num_clusters, llength, llength_disp, rng),
            Override::Literal(lengths) => lengths.clone(),
        };
        check_length(&lengths, GenerationStep::LineLengths, num_clusters)?;
        debug!(step = %GenerationStep::LineLengths, source = self.lengths.kind(), "resolved step");
        Ok(lengths)
    }

    fn resolve_angles(&self, rng: &mut dyn RngCore) -> Result<Vec<f64>> {
        let ClugenParams {
            num_clusters,
            angle_disp,
            ..
        } = self.params;
        let angles = match &self.angles {
            Override::Default => angle_deltas(num_clusters, angle_disp, rng),
            Override::Function(function) => function(num_clusters, angle_disp, rng),
            Override::Literal(angles) => angles.clone(),
        };
        check_length(&angles, GenerationStep::AngleDeltas, num_clusters)?;
        debug!(step = %GenerationStep::AngleDeltas, source = self.angles.kind(), "resolved step");
        Ok(angles)
    }

    fn generate_sequential(
        &self,
        inputs: &[ClusterInput<'_>],
        rng: &mut dyn RngCore,
    ) -> Result<Vec<ClusterBlock>> {
        inputs
            .iter()
            .map(|input| self.generate_cluster(input, &mut *rng))
            .collect()
    }

    #[cfg(feature = "parallel")]
    fn generate_parallel(
        &self,
        inputs: &[ClusterInput<'_>],
        base_seed: u64,
    ) -> Result<Vec<ClusterBlock>> {
        debug!(clusters = inputs.len(), "generating clusters in parallel");
        inputs
            .par_iter()
            .enumerate()
            .map(|(index, input)| {
                let mut rng = crate::seed::cluster_rng(base_seed, index);
                self.generate_cluster(input, &mut rng)
            })
            .collect()
    }

    fn generate_cluster(
        &self,
        input: &ClusterInput<'_>,
        rng: &mut dyn RngCore,
    ) -> Result<ClusterBlock> {
        let distances = self.projection.distances(input.length, input.size, rng);
        check_length(&distances, GenerationStep::ProjectionDistances, input.size)?;
        let projections = points_on_line(input.center, input.direction, &distances);

        // A line in 1D has no orthogonal complement: points are their projections.
        if self.params.num_dims == 1 {
            return Ok(ClusterBlock {
                points: projections.clone(),
                projections,
            });
        }

        let points = self.placement.place(
            &projections,
            self.params.lateral_disp,
            input.length,
            input.direction,
            input.center,
            rng,
        )?;
        check_shape(
            &points,
            GenerationStep::PointPlacement,
            input.size,
            self.params.num_dims,
        )?;
        Ok(ClusterBlock {
            projections,
            points,
        })
    }
}
