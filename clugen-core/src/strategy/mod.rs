//! Pluggable strategies for each stochastic step of the generation pipeline.
//!
//! Every step can run a built-in implementation or a user-supplied function.
//! The per-cluster steps (sizes, centers, lengths, angle deltas) additionally
//! accept precomputed values through [`Override::Literal`], which bypass the
//! computation entirely.

mod defaults;
mod points;

use std::{fmt, str::FromStr, sync::Arc};

use rand::RngCore;

use crate::{error::ClugenError, matrix::Matrix};

pub use self::defaults::{angle_deltas, cluster_centers, cluster_sizes, line_lengths};
pub use self::points::{
    points_around, points_orthogonal, points_orthogonal_template, projections_normal,
    projections_uniform,
};

/// Cluster sizing function: `(num_clusters, num_points, allow_empty, rng)`.
pub type SizesFn = dyn Fn(usize, usize, bool, &mut dyn RngCore) -> Vec<usize> + Send + Sync;

/// Cluster center function: `(num_clusters, cluster_sep, cluster_offset, rng)`.
pub type CentersFn = dyn Fn(usize, &[f64], &[f64], &mut dyn RngCore) -> Matrix + Send + Sync;

/// Line length function: `(num_clusters, llength, llength_disp, rng)`.
pub type LengthsFn = dyn Fn(usize, f64, f64, &mut dyn RngCore) -> Vec<f64> + Send + Sync;

/// Angle delta function: `(num_clusters, angle_disp, rng)`.
pub type AngleDeltasFn = dyn Fn(usize, f64, &mut dyn RngCore) -> Vec<f64> + Send + Sync;

/// Projection distance function: `(line_length, count, rng)`.
pub type ProjectionFn = dyn Fn(f64, usize, &mut dyn RngCore) -> Vec<f64> + Send + Sync;

/// Point placement function:
/// `(projections, lateral_disp, line_length, direction, center, rng)`.
pub type PlacementFn =
    dyn Fn(&Matrix, f64, f64, &[f64], &[f64], &mut dyn RngCore) -> Matrix + Send + Sync;

/// Lateral distance function used by orthogonal placement:
/// `(count, lateral_disp, rng)`.
pub type DistanceFn = dyn Fn(usize, f64, &mut dyn RngCore) -> Vec<f64> + Send + Sync;

/// Selects how one per-cluster step obtains its values.
pub enum Override<F: ?Sized, T> {
    /// Run the built-in strategy.
    Default,
    /// Run a user-supplied function.
    Function(Arc<F>),
    /// Use precomputed values as-is.
    Literal(T),
}

impl<F: ?Sized, T> Default for Override<F, T> {
    fn default() -> Self {
        Self::Default
    }
}

impl<F: ?Sized, T: Clone> Clone for Override<F, T> {
    fn clone(&self) -> Self {
        match self {
            Self::Default => Self::Default,
            Self::Function(function) => Self::Function(Arc::clone(function)),
            Self::Literal(values) => Self::Literal(values.clone()),
        }
    }
}

impl<F: ?Sized, T: fmt::Debug> fmt::Debug for Override<F, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => f.write_str("Default"),
            Self::Function(_) => f.write_str("Function(..)"),
            Self::Literal(values) => f.debug_tuple("Literal").field(values).finish(),
        }
    }
}

impl<F: ?Sized, T> Override<F, T> {
    /// Short label used in diagnostics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Function(_) => "function",
            Self::Literal(_) => "literal",
        }
    }
}

/// Where point projections fall along a cluster's supporting line.
///
/// # Examples
/// ```
/// use clugen_core::ProjectionStrategy;
///
/// let strategy: ProjectionStrategy = "unif".parse()?;
/// assert!(matches!(strategy, ProjectionStrategy::Uniform));
/// assert!("gamma".parse::<ProjectionStrategy>().is_err());
/// # Ok::<(), clugen_core::ClugenError>(())
/// ```
#[derive(Clone, Default)]
pub enum ProjectionStrategy {
    /// `N(0, line_length / 6)` around the center (`"norm"`).
    #[default]
    Normal,
    /// Uniform over the segment (`"unif"`).
    Uniform,
    /// User-supplied distances.
    Custom(Arc<ProjectionFn>),
}

impl ProjectionStrategy {
    /// Wraps a projection distance function.
    #[must_use]
    pub fn custom<F>(function: F) -> Self
    where
        F: Fn(f64, usize, &mut dyn RngCore) -> Vec<f64> + Send + Sync + 'static,
    {
        let function: Arc<ProjectionFn> = Arc::new(function);
        Self::Custom(function)
    }

    /// Returns the tag naming this strategy.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "norm",
            Self::Uniform => "unif",
            Self::Custom(_) => "custom",
        }
    }

    pub(crate) fn distances(&self, line_length: f64, count: usize, rng: &mut dyn RngCore) -> Vec<f64> {
        match self {
            Self::Normal => projections_normal(line_length, count, rng),
            Self::Uniform => projections_uniform(line_length, count, rng),
            Self::Custom(function) => function(line_length, count, rng),
        }
    }
}

impl fmt::Debug for ProjectionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectionStrategy {
    type Err = ClugenError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag {
            "norm" => Ok(Self::Normal),
            "unif" => Ok(Self::Uniform),
            other => Err(ClugenError::UnknownProjection {
                tag: Arc::from(other),
            }),
        }
    }
}

/// How final points are placed around their projections.
///
/// # Examples
/// ```
/// use clugen_core::PlacementStrategy;
///
/// let strategy: PlacementStrategy = "n-1".parse()?;
/// assert!(matches!(strategy, PlacementStrategy::Orthogonal));
/// assert_eq!(strategy.as_str(), "n-1");
/// # Ok::<(), clugen_core::ClugenError>(())
/// ```
#[derive(Clone, Default)]
pub enum PlacementStrategy {
    /// On the hyperplane orthogonal to the cluster direction (`"n-1"`).
    #[default]
    Orthogonal,
    /// Isotropic Gaussian displacement around the projection (`"n"`).
    AroundProjection,
    /// Orthogonal placement with user-supplied lateral distances.
    OrthogonalWithDistances(Arc<DistanceFn>),
    /// User-supplied placement.
    Custom(Arc<PlacementFn>),
}

impl PlacementStrategy {
    /// Wraps a point placement function.
    #[must_use]
    pub fn custom<F>(function: F) -> Self
    where
        F: Fn(&Matrix, f64, f64, &[f64], &[f64], &mut dyn RngCore) -> Matrix
            + Send
            + Sync
            + 'static,
    {
        let function: Arc<PlacementFn> = Arc::new(function);
        Self::Custom(function)
    }

    /// Orthogonal placement whose lateral distances come from `distance_fn`.
    ///
    /// # Examples
    /// ```
    /// use clugen_core::PlacementStrategy;
    /// use rand::Rng;
    ///
    /// // Exponentially distributed lateral distances.
    /// let placement = PlacementStrategy::orthogonal_with_distances(|count, disp, rng| {
    ///     (0..count).map(|_| -disp * (1.0 - rng.r#gen::<f64>()).ln()).collect()
    /// });
    /// assert_eq!(placement.as_str(), "custom");
    /// ```
    #[must_use]
    pub fn orthogonal_with_distances<F>(distance_fn: F) -> Self
    where
        F: Fn(usize, f64, &mut dyn RngCore) -> Vec<f64> + Send + Sync + 'static,
    {
        let distance_fn: Arc<DistanceFn> = Arc::new(distance_fn);
        Self::OrthogonalWithDistances(distance_fn)
    }

    /// Returns the tag naming this strategy.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Orthogonal => "n-1",
            Self::AroundProjection => "n",
            Self::OrthogonalWithDistances(_) | Self::Custom(_) => "custom",
        }
    }

    pub(crate) fn place(
        &self,
        projections: &Matrix,
        lateral_disp: f64,
        line_length: f64,
        direction: &[f64],
        center: &[f64],
        rng: &mut dyn RngCore,
    ) -> crate::Result<Matrix> {
        match self {
            Self::Orthogonal => Ok(points_orthogonal(
                projections,
                lateral_disp,
                line_length,
                direction,
                center,
                rng,
            )),
            Self::AroundProjection => Ok(points_around(
                projections,
                lateral_disp,
                line_length,
                direction,
                center,
                rng,
            )),
            Self::OrthogonalWithDistances(distance_fn) => points_orthogonal_template(
                projections,
                lateral_disp,
                direction,
                |count, disp, inner| distance_fn(count, disp, inner),
                rng,
            ),
            Self::Custom(function) => Ok(function(
                projections,
                lateral_disp,
                line_length,
                direction,
                center,
                rng,
            )),
        }
    }
}

impl fmt::Debug for PlacementStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlacementStrategy {
    type Err = ClugenError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag {
            "n-1" => Ok(Self::Orthogonal),
            "n" => Ok(Self::AroundProjection),
            other => Err(ClugenError::UnknownPlacement {
                tag: Arc::from(other),
            }),
        }
    }
}
