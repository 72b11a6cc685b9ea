//! Error types for the clugen core library.
//!
//! Defines the error enum exposed by the public API, its stable error codes
//! and a convenient result alias.

use std::{fmt, sync::Arc};

use thiserror::Error;

use crate::builder::Execution;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// A stochastic step of the generation pipeline.
///
/// Used to attribute shape errors to the step whose output was malformed.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum GenerationStep {
    /// Per-cluster point counts.
    ClusterSizes,
    /// Per-cluster line centers.
    ClusterCenters,
    /// Per-cluster line lengths.
    LineLengths,
    /// Per-cluster angle offsets from the main direction.
    AngleDeltas,
    /// Distances of point projections from a cluster center.
    ProjectionDistances,
    /// Lateral distances of points from their projections.
    LateralDistances,
    /// Final point placement around the projections.
    PointPlacement,
}

impl GenerationStep {
    /// Returns a short, stable name for the step.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ClusterSizes => "cluster_sizes",
            Self::ClusterCenters => "cluster_centers",
            Self::LineLengths => "line_lengths",
            Self::AngleDeltas => "angle_deltas",
            Self::ProjectionDistances => "projection_distances",
            Self::LateralDistances => "lateral_distances",
            Self::PointPlacement => "point_placement",
        }
    }
}

impl fmt::Display for GenerationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error type produced when configuring or running [`crate::Clugen`].
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ClugenError {
    /// The number of dimensions must be positive.
    #[error("num_dims must be at least 1 (got {got})")]
    InvalidDimensions {
        /// Dimension count supplied by the caller.
        got: usize,
    },
    /// The number of clusters must be positive.
    #[error("num_clusters must be at least 1 (got {got})")]
    InvalidClusterCount {
        /// Cluster count supplied by the caller.
        got: usize,
    },
    /// Direction was neither a single vector nor one row per cluster.
    #[error(
        "direction must be a vector of length {num_dims} or a {num_clusters}x{num_dims} matrix"
    )]
    DirectionShape {
        /// Configured number of clusters.
        num_clusters: usize,
        /// Configured number of dimensions.
        num_dims: usize,
    },
    /// A direction vector had (near-)zero magnitude.
    #[error("direction {index} has zero magnitude")]
    ZeroDirection {
        /// Row of the offending direction (always 0 for a single direction).
        index: usize,
    },
    /// `cluster_sep` did not have one entry per dimension.
    #[error("cluster_sep has length {got} but num_dims is {expected}")]
    ClusterSepLength {
        /// Expected length (`num_dims`).
        expected: usize,
        /// Length supplied by the caller.
        got: usize,
    },
    /// `cluster_offset` did not have one entry per dimension.
    #[error("cluster_offset has length {got} but num_dims is {expected}")]
    ClusterOffsetLength {
        /// Expected length (`num_dims`).
        expected: usize,
        /// Length supplied by the caller.
        got: usize,
    },
    /// Not enough points to give every cluster at least one.
    #[error(
        "num_points ({num_points}) must be at least num_clusters ({num_clusters}) when empty clusters are not allowed"
    )]
    InsufficientPoints {
        /// Requested number of points.
        num_points: usize,
        /// Requested number of clusters.
        num_clusters: usize,
    },
    /// The projection strategy tag was not recognised.
    #[error("unknown projection strategy `{tag}`; expected `norm` or `unif`")]
    UnknownProjection {
        /// Tag supplied by the caller.
        tag: Arc<str>,
    },
    /// The point placement strategy tag was not recognised.
    #[error("unknown point placement strategy `{tag}`; expected `n-1` or `n`")]
    UnknownPlacement {
        /// Tag supplied by the caller.
        tag: Arc<str>,
    },
    /// A step produced, or was given, a vector of the wrong length.
    #[error("{step} has length {got} but {expected} was expected")]
    StepLength {
        /// Step whose output was malformed.
        step: GenerationStep,
        /// Required length.
        expected: usize,
        /// Actual length.
        got: usize,
    },
    /// A step produced, or was given, a matrix of the wrong shape.
    #[error("{step} has shape {rows}x{cols} but {expected_rows}x{expected_cols} was expected")]
    StepShape {
        /// Step whose output was malformed.
        step: GenerationStep,
        /// Required number of rows.
        expected_rows: usize,
        /// Required number of columns.
        expected_cols: usize,
        /// Actual number of rows.
        rows: usize,
        /// Actual number of columns.
        cols: usize,
    },
    /// Row-major data did not match the declared matrix shape.
    #[error("matrix of shape {rows}x{cols} cannot hold {len} values")]
    MatrixShape {
        /// Declared number of rows.
        rows: usize,
        /// Declared number of columns.
        cols: usize,
        /// Number of values supplied.
        len: usize,
    },
    /// Rows supplied to a matrix constructor had differing lengths.
    #[error("row {row} has length {got} but the first row has length {expected}")]
    RaggedRows {
        /// Index of the first mismatching row.
        row: usize,
        /// Length of the first row.
        expected: usize,
        /// Length of the mismatching row.
        got: usize,
    },
    /// The requested execution mode is not available in this build.
    #[error("the requested execution mode {requested:?} is not available in this build")]
    ExecutionUnavailable {
        /// Mode that could not be satisfied by the current build.
        requested: Execution,
    },
}

define_error_codes! {
    /// Stable codes describing [`ClugenError`] variants.
    enum ClugenErrorCode for ClugenError {
        /// The number of dimensions must be positive.
        InvalidDimensions => InvalidDimensions { .. } => "CLUGEN_INVALID_DIMENSIONS",
        /// The number of clusters must be positive.
        InvalidClusterCount => InvalidClusterCount { .. } => "CLUGEN_INVALID_CLUSTER_COUNT",
        /// Direction was neither a single vector nor one row per cluster.
        DirectionShape => DirectionShape { .. } => "CLUGEN_DIRECTION_SHAPE",
        /// A direction vector had (near-)zero magnitude.
        ZeroDirection => ZeroDirection { .. } => "CLUGEN_ZERO_DIRECTION",
        /// `cluster_sep` did not have one entry per dimension.
        ClusterSepLength => ClusterSepLength { .. } => "CLUGEN_CLUSTER_SEP_LENGTH",
        /// `cluster_offset` did not have one entry per dimension.
        ClusterOffsetLength => ClusterOffsetLength { .. } => "CLUGEN_CLUSTER_OFFSET_LENGTH",
        /// Not enough points to give every cluster at least one.
        InsufficientPoints => InsufficientPoints { .. } => "CLUGEN_INSUFFICIENT_POINTS",
        /// The projection strategy tag was not recognised.
        UnknownProjection => UnknownProjection { .. } => "CLUGEN_UNKNOWN_PROJECTION",
        /// The point placement strategy tag was not recognised.
        UnknownPlacement => UnknownPlacement { .. } => "CLUGEN_UNKNOWN_PLACEMENT",
        /// A step produced, or was given, a vector of the wrong length.
        StepLength => StepLength { .. } => "CLUGEN_STEP_LENGTH",
        /// A step produced, or was given, a matrix of the wrong shape.
        StepShape => StepShape { .. } => "CLUGEN_STEP_SHAPE",
        /// Row-major data did not match the declared matrix shape.
        MatrixShape => MatrixShape { .. } => "CLUGEN_MATRIX_SHAPE",
        /// Rows supplied to a matrix constructor had differing lengths.
        RaggedRows => RaggedRows { .. } => "CLUGEN_RAGGED_ROWS",
        /// The requested execution mode is not available in this build.
        ExecutionUnavailable => ExecutionUnavailable { .. } => "CLUGEN_EXECUTION_UNAVAILABLE",
    }
}

impl ClugenError {
    /// Returns the pipeline step an error is attributed to, if any.
    #[must_use]
    pub const fn step(&self) -> Option<GenerationStep> {
        match self {
            Self::StepLength { step, .. } | Self::StepShape { step, .. } => Some(*step),
            _ => None,
        }
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, ClugenError>;
