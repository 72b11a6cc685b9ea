//! Clugen core library: multidimensional clusters generated along
//! supporting lines.
//!
//! Each cluster is built around a line segment whose direction deviates from
//! a main direction by a random angle. Points are projected onto the segment
//! and then displaced laterally. Every stochastic step can be replaced with a
//! custom function or precomputed values.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod builder;
mod clugen;
mod counts;
mod error;
mod matrix;
mod params;
mod result;
#[cfg(feature = "parallel")]
mod seed;
mod strategy;
#[cfg(test)]
mod test_utils;
mod vector;

pub use crate::{
    builder::{ClugenBuilder, Execution},
    clugen::{Clugen, clugen},
    counts::{fix_empty, fix_num_points},
    error::{ClugenError, ClugenErrorCode, GenerationStep, Result},
    matrix::Matrix,
    params::{ClugenParams, Direction},
    result::Clusters,
    strategy::{
        AngleDeltasFn, CentersFn, DistanceFn, LengthsFn, Override, PlacementFn,
        PlacementStrategy, ProjectionFn, ProjectionStrategy, SizesFn, angle_deltas,
        cluster_centers, cluster_sizes, line_lengths, points_around, points_orthogonal,
        points_orthogonal_template, projections_normal, projections_uniform,
    },
    vector::{
        angle_between, points_on_line, random_orthogonal_vector, random_unit_vector,
        random_vector_at_angle,
    },
};
