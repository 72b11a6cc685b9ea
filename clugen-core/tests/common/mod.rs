use clugen_core::{ClugenParams, Direction};

/// Two-dimensional parameters with moderate dispersion in every knob.
#[must_use]
pub fn planar_params(num_clusters: usize, num_points: usize) -> ClugenParams {
    ClugenParams {
        num_dims: 2,
        num_clusters,
        num_points,
        direction: Direction::from([1.0, 1.0]),
        angle_disp: 0.5,
        cluster_sep: vec![12.0, 12.0],
        llength: 8.0,
        llength_disp: 1.5,
        lateral_disp: 1.0,
    }
}
