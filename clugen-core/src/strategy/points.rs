//! Built-in projection and point placement strategies.
//!
//! Projection strategies decide where along a cluster's supporting line the
//! point projections fall; placement strategies displace each projection to
//! produce the final point.

use rand::{Rng, distributions::Standard};
use rand_distr::StandardNormal;

use crate::{
    Result,
    builder::check_length,
    error::GenerationStep,
    matrix::Matrix,
    vector::random_orthogonal_vector,
};

/// Distances from the line center drawn from `N(0, line_length / 6)`.
///
/// With this spread about 99.73% of the projections fall within the line
/// segment.
///
/// # Examples
/// ```
/// use clugen_core::projections_normal;
/// use rand::{SeedableRng, rngs::SmallRng};
///
/// let mut rng = SmallRng::seed_from_u64(4);
/// assert_eq!(projections_normal(10.0, 25, &mut rng).len(), 25);
/// assert!(projections_normal(0.0, 3, &mut rng).iter().all(|&d| d == 0.0));
/// ```
pub fn projections_normal<R: Rng + ?Sized>(line_length: f64, count: usize, rng: &mut R) -> Vec<f64> {
    let std_dev = line_length / 6.0;
    (0..count)
        .map(|_| {
            let draw: f64 = rng.sample(StandardNormal);
            std_dev * draw
        })
        .collect()
}

/// Distances from the line center drawn uniformly from
/// `[-line_length / 2, line_length / 2)`.
///
/// # Examples
/// ```
/// use clugen_core::projections_uniform;
/// use rand::{SeedableRng, rngs::SmallRng};
///
/// let mut rng = SmallRng::seed_from_u64(4);
/// let distances = projections_uniform(8.0, 100, &mut rng);
/// assert!(distances.iter().all(|d| (-4.0..4.0).contains(d)));
/// ```
pub fn projections_uniform<R: Rng + ?Sized>(line_length: f64, count: usize, rng: &mut R) -> Vec<f64> {
    (0..count)
        .map(|_| {
            let uniform: f64 = rng.sample(Standard);
            line_length.mul_add(uniform, -line_length / 2.0)
        })
        .collect()
}

/// Displaces every projection along a fresh direction orthogonal to the
/// cluster direction.
///
/// `distance_fn(count, lateral_disp, rng)` yields one signed distance per
/// projection; its absolute value scales a random unit vector orthogonal to
/// `direction`. Distances are drawn before any orthogonal vector.
///
/// This is the template behind [`points_orthogonal`]; supplying another
/// distance generator changes the lateral distribution while keeping the
/// orthogonal placement.
///
/// # Errors
/// Returns [`ClugenError::StepLength`](crate::ClugenError::StepLength) for
/// [`GenerationStep::LateralDistances`](crate::GenerationStep::LateralDistances)
/// when `distance_fn` does not return exactly one distance per projection.
///
/// # Examples
/// ```
/// use clugen_core::{Matrix, points_orthogonal_template};
/// use rand::{SeedableRng, rngs::SmallRng};
///
/// let mut rng = SmallRng::seed_from_u64(8);
/// let projections = Matrix::from_rows(vec![vec![0.0, 0.0], vec![5.0, 0.0]])?;
/// let points = points_orthogonal_template(
///     &projections,
///     2.0,
///     &[1.0, 0.0],
///     |count, disp, _rng| vec![disp; count],
///     &mut rng,
/// )?;
/// for (point, projection) in points.iter_rows().zip(projections.iter_rows()) {
///     assert!((point[0] - projection[0]).abs() < 1e-12);
///     assert!((point[1].abs() - 2.0).abs() < 1e-12);
/// }
/// # Ok::<(), clugen_core::ClugenError>(())
/// ```
pub fn points_orthogonal_template<R, F>(
    projections: &Matrix,
    lateral_disp: f64,
    direction: &[f64],
    distance_fn: F,
    rng: &mut R,
) -> Result<Matrix>
where
    R: Rng + ?Sized,
    F: FnOnce(usize, f64, &mut R) -> Vec<f64>,
{
    let distances = distance_fn(projections.rows(), lateral_disp, &mut *rng);
    check_length(&distances, GenerationStep::LateralDistances, projections.rows())?;
    Ok(displace_orthogonally(projections, &distances, direction, rng))
}

fn displace_orthogonally<R: Rng + ?Sized>(
    projections: &Matrix,
    distances: &[f64],
    direction: &[f64],
    rng: &mut R,
) -> Matrix {
    let mut points = projections.clone();
    for (point, distance) in points.iter_rows_mut().zip(distances) {
        let orthogonal = random_orthogonal_vector(direction, rng);
        let magnitude = distance.abs();
        for (value, component) in point.iter_mut().zip(orthogonal) {
            *value = magnitude.mul_add(component, *value);
        }
    }
    points
}

/// Places points on the hyperplane orthogonal to the cluster direction
/// (the `"n-1"` strategy).
///
/// Lateral distances follow `N(0, lateral_disp)`. `line_length` and `center`
/// are part of the placement contract but unused here.
///
/// # Examples
/// ```
/// use clugen_core::{Matrix, points_orthogonal};
/// use rand::{SeedableRng, rngs::SmallRng};
///
/// let mut rng = SmallRng::seed_from_u64(6);
/// let projections = Matrix::from_rows(vec![vec![1.0, 1.0, 1.0]])?;
/// let points = points_orthogonal(&projections, 0.5, 10.0, &[0.0, 0.0, 1.0], &[0.0; 3], &mut rng);
/// assert!((points.row(0).unwrap()[2] - 1.0).abs() < 1e-12);
/// # Ok::<(), clugen_core::ClugenError>(())
/// ```
pub fn points_orthogonal<R: Rng + ?Sized>(
    projections: &Matrix,
    lateral_disp: f64,
    _line_length: f64,
    direction: &[f64],
    _center: &[f64],
    rng: &mut R,
) -> Matrix {
    let distances = normal_distances(projections.rows(), lateral_disp, rng);
    displace_orthogonally(projections, &distances, direction, rng)
}

/// Places points around their projections with an isotropic Gaussian
/// displacement (the `"n"` strategy).
///
/// Every coordinate receives independent `N(0, lateral_disp)` noise.
///
/// # Examples
/// ```
/// use clugen_core::{Matrix, points_around};
/// use rand::{SeedableRng, rngs::SmallRng};
///
/// let mut rng = SmallRng::seed_from_u64(6);
/// let projections = Matrix::from_rows(vec![vec![1.0, 2.0]])?;
/// let points = points_around(&projections, 0.0, 1.0, &[1.0, 0.0], &[0.0, 0.0], &mut rng);
/// assert_eq!(points, projections);
/// # Ok::<(), clugen_core::ClugenError>(())
/// ```
pub fn points_around<R: Rng + ?Sized>(
    projections: &Matrix,
    lateral_disp: f64,
    _line_length: f64,
    _direction: &[f64],
    _center: &[f64],
    rng: &mut R,
) -> Matrix {
    let mut points = projections.clone();
    for point in points.iter_rows_mut() {
        for value in point.iter_mut() {
            let draw: f64 = rng.sample(StandardNormal);
            *value = lateral_disp.mul_add(draw, *value);
        }
    }
    points
}

fn normal_distances<R: Rng + ?Sized>(count: usize, lateral_disp: f64, rng: &mut R) -> Vec<f64> {
    (0..count)
        .map(|_| {
            let draw: f64 = rng.sample(StandardNormal);
            lateral_disp * draw
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::ClugenError, vector::norm};
    use proptest::prelude::*;
    use rand::{SeedableRng, rngs::SmallRng};
    use rstest::{fixture, rstest};

    #[fixture]
    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(0x0B0E)
    }

    fn along_x(count: usize) -> Matrix {
        let rows = (0..count).map(|i| vec![i as f64, 0.0, 0.0]).collect();
        Matrix::from_rows(rows).unwrap_or_default()
    }

    #[rstest]
    fn uniform_projections_cover_the_segment(mut rng: SmallRng) {
        let distances = projections_uniform(10.0, 2_000, &mut rng);
        assert!(distances.iter().all(|d| (-5.0..5.0).contains(d)));
        assert!(distances.iter().any(|&d| d < -4.0));
        assert!(distances.iter().any(|&d| d > 4.0));
    }

    #[rstest]
    fn normal_projections_mostly_fall_on_the_segment(mut rng: SmallRng) {
        let distances = projections_normal(12.0, 5_000, &mut rng);
        let inside = distances.iter().filter(|d| d.abs() <= 6.0).count();
        assert!(inside >= 4_950);
    }

    #[rstest]
    fn zero_lateral_dispersion_keeps_points_on_projections(mut rng: SmallRng) {
        let projections = along_x(6);
        let direction = [1.0, 0.0, 0.0];
        let orthogonal =
            points_orthogonal(&projections, 0.0, 1.0, &direction, &[0.0; 3], &mut rng);
        let around = points_around(&projections, 0.0, 1.0, &direction, &[0.0; 3], &mut rng);
        assert_eq!(orthogonal, projections);
        assert_eq!(around, projections);
    }

    #[rstest]
    #[case(1)]
    #[case(4)]
    fn mismatched_distance_vectors_are_rejected(mut rng: SmallRng, #[case] returned: usize) {
        let projections = along_x(3);
        let err = points_orthogonal_template(
            &projections,
            1.0,
            &[1.0, 0.0, 0.0],
            |_, disp, _| vec![disp; returned],
            &mut rng,
        )
        .expect_err("distance count must match the projections");
        assert_eq!(
            err,
            ClugenError::StepLength {
                step: GenerationStep::LateralDistances,
                expected: 3,
                got: returned,
            }
        );
    }

    proptest! {
        #[test]
        fn orthogonal_placement_stays_on_the_hyperplane(
            seed in any::<u64>(),
            lateral_disp in 0.0_f64..5.0,
        ) {
            let mut rng = SmallRng::seed_from_u64(seed);
            let projections = along_x(8);
            let direction = [1.0, 0.0, 0.0];
            let points = points_orthogonal_template(
                &projections,
                lateral_disp,
                &direction,
                |count, disp, _| vec![disp; count],
                &mut rng,
            )
            .expect("one distance per projection");
            for (point, projection) in points.iter_rows().zip(projections.iter_rows()) {
                let offset: Vec<f64> = point.iter().zip(projection).map(|(p, q)| p - q).collect();
                prop_assert!(offset[0].abs() < 1e-9);
                prop_assert!((norm(&offset) - lateral_disp).abs() < 1e-9);
            }
        }
    }
}
