//! Geometric primitives used by the generation pipeline.
//!
//! Every stochastic routine takes the random number generator as an explicit
//! argument; nothing here keeps hidden state.

mod helpers;

use std::f64::consts::{FRAC_PI_2, PI};

use rand::{Rng, distributions::Standard};

use crate::matrix::Matrix;

pub(crate) use self::helpers::{add_scaled, norm, normalize, normalize_in_place};
use self::helpers::dot;

/// Returns a random unit vector with `num_dims` components.
///
/// Components are drawn uniformly from `[-0.5, 0.5)` before normalisation.
///
/// # Examples
/// ```
/// use clugen_core::random_unit_vector;
/// use rand::{SeedableRng, rngs::SmallRng};
///
/// let mut rng = SmallRng::seed_from_u64(7);
/// let v = random_unit_vector(3, &mut rng);
/// let norm = v.iter().map(|x| x * x).sum::<f64>().sqrt();
/// assert!((norm - 1.0).abs() < 1e-12);
/// ```
pub fn random_unit_vector<R: Rng + ?Sized>(num_dims: usize, rng: &mut R) -> Vec<f64> {
    let mut values: Vec<f64> = (0..num_dims)
        .map(|_| rng.sample::<f64, _>(Standard) - 0.5)
        .collect();
    normalize_in_place(&mut values);
    values
}

/// Returns a random unit vector orthogonal to `u`.
///
/// In one dimension no orthogonal complement exists and an arbitrary unit
/// vector is returned. Otherwise random unit vectors are drawn until one is
/// not parallel to `u`, and a single Gram-Schmidt step removes its `u`
/// component.
///
/// # Examples
/// ```
/// use clugen_core::random_orthogonal_vector;
/// use rand::{SeedableRng, rngs::SmallRng};
///
/// let mut rng = SmallRng::seed_from_u64(11);
/// let u = [0.0, 1.0, 0.0];
/// let v = random_orthogonal_vector(&u, &mut rng);
/// let dot: f64 = u.iter().zip(&v).map(|(a, b)| a * b).sum();
/// assert!(dot.abs() < 1e-12);
/// ```
pub fn random_orthogonal_vector<R: Rng + ?Sized>(u: &[f64], rng: &mut R) -> Vec<f64> {
    let num_dims = u.len();
    if num_dims == 1 {
        return random_unit_vector(num_dims, rng);
    }

    let u_norm = norm(u);
    let r = loop {
        let candidate = random_unit_vector(num_dims, rng);
        let cosine = dot(u, &candidate) / u_norm;
        if (cosine.abs() - 1.0).abs() > f64::EPSILON {
            break candidate;
        }
    };

    let projection = dot(u, &r) / dot(u, u);
    let mut orthogonal = add_scaled(&r, -projection, u);
    normalize_in_place(&mut orthogonal);
    orthogonal
}

/// Returns a random unit vector at `angle` radians from the unit vector `u`.
///
/// - `angle ≈ 0` returns `u` unchanged.
/// - `|angle| ≈ π/2`, within a relative tolerance of `√ε`, returns a random
///   vector orthogonal to `u`.
/// - `-π/2 < angle < π/2` tilts `u` towards a random orthogonal direction.
/// - Any other angle, or a one-dimensional `u`, yields an unrelated random
///   unit vector.
///
/// # Examples
/// ```
/// use clugen_core::{angle_between, random_vector_at_angle};
/// use rand::{SeedableRng, rngs::SmallRng};
///
/// let mut rng = SmallRng::seed_from_u64(3);
/// let u = [1.0, 0.0];
/// let v = random_vector_at_angle(&u, 0.5, &mut rng);
/// assert!((angle_between(&u, &v) - 0.5).abs() < 1e-9);
/// ```
pub fn random_vector_at_angle<R: Rng + ?Sized>(u: &[f64], angle: f64, rng: &mut R) -> Vec<f64> {
    let num_dims = u.len();
    if angle.abs() < f64::EPSILON {
        return u.to_vec();
    }
    if num_dims > 1 && (angle.abs() - FRAC_PI_2).abs() <= FRAC_PI_2 * f64::EPSILON.sqrt() {
        return random_orthogonal_vector(u, rng);
    }
    if num_dims > 1 && -FRAC_PI_2 < angle && angle < FRAC_PI_2 {
        let orthogonal = random_orthogonal_vector(u, rng);
        let mut tilted = add_scaled(u, angle.tan(), &orthogonal);
        normalize_in_place(&mut tilted);
        return tilted;
    }
    random_unit_vector(num_dims, rng)
}

/// Returns one point per offset along the line through `center` with
/// direction `direction`.
///
/// Row `i` of the result is `center + offsets[i] * direction`. The direction
/// is used as given and is not renormalised.
///
/// # Examples
/// ```
/// use clugen_core::points_on_line;
///
/// let points = points_on_line(&[1.0, 1.0], &[0.0, 2.0], &[0.0, 1.5]);
/// assert_eq!(points.row(0), Some(&[1.0, 1.0][..]));
/// assert_eq!(points.row(1), Some(&[1.0, 4.0][..]));
/// ```
#[must_use]
pub fn points_on_line(center: &[f64], direction: &[f64], offsets: &[f64]) -> Matrix {
    let num_dims = center.len();
    let mut points = Matrix::zeros(offsets.len(), num_dims);
    for (row, &offset) in points.iter_rows_mut().zip(offsets) {
        for ((value, &c), &d) in row.iter_mut().zip(center).zip(direction) {
            *value = offset.mul_add(d, c);
        }
    }
    points
}

/// Returns the angle in `[0, π]` between `v1` and `v2`.
///
/// Uses the `2 * atan2(|u1 - u2|, |u1 + u2|)` formulation, which stays
/// accurate for nearly parallel and nearly opposite vectors where `acos` of
/// the cosine does not.
///
/// # Examples
/// ```
/// use clugen_core::angle_between;
/// use std::f64::consts::{FRAC_PI_2, PI};
///
/// assert!((angle_between(&[1.0, 0.0], &[0.0, 3.0]) - FRAC_PI_2).abs() < 1e-12);
/// assert!((angle_between(&[1.0, 1.0], &[-2.0, -2.0]) - PI).abs() < 1e-12);
/// ```
#[must_use]
pub fn angle_between(v1: &[f64], v2: &[f64]) -> f64 {
    let u1 = normalize(v1);
    let u2 = normalize(v2);
    let difference: Vec<f64> = u1.iter().zip(&u2).map(|(a, b)| a - b).collect();
    let sum: Vec<f64> = u1.iter().zip(&u2).map(|(a, b)| a + b).collect();
    let angle = 2.0 * norm(&difference).atan2(norm(&sum));

    if !(angle.is_sign_negative() || (PI - angle).is_sign_negative()) {
        angle
    } else if angle.is_sign_negative() {
        0.0
    } else {
        PI
    }
}
