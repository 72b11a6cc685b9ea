//! Built-in per-cluster strategies: sizes, centers, line lengths and angles.

use std::f64::consts::{FRAC_PI_2, PI};

use rand::{Rng, distributions::Standard};
use rand_distr::StandardNormal;

use crate::{
    counts::{fix_empty, fix_num_points},
    matrix::Matrix,
};

/// Draws the number of points in each cluster.
///
/// Sizes follow a normal distribution with mean `num_points / num_clusters`
/// and standard deviation of a third of the mean. Negative draws are clamped
/// to zero, the vector is rescaled to `num_points` and rounded, and
/// [`fix_num_points`] restores the exact total. Unless `allow_empty` is set,
/// [`fix_empty`] then ensures no cluster is empty.
///
/// # Examples
/// ```
/// use clugen_core::cluster_sizes;
/// use rand::{SeedableRng, rngs::SmallRng};
///
/// let mut rng = SmallRng::seed_from_u64(5);
/// let sizes = cluster_sizes(4, 1_000, false, &mut rng);
/// assert_eq!(sizes.len(), 4);
/// assert_eq!(sizes.iter().sum::<usize>(), 1_000);
/// assert!(sizes.iter().all(|&size| size > 0));
/// ```
pub fn cluster_sizes<R: Rng + ?Sized>(
    num_clusters: usize,
    num_points: usize,
    allow_empty: bool,
    rng: &mut R,
) -> Vec<usize> {
    if num_clusters == 0 {
        return Vec::new();
    }

    let mean = num_points as f64 / num_clusters as f64;
    let std_dev = mean / 3.0;
    let mut raw: Vec<f64> = (0..num_clusters)
        .map(|_| {
            let draw: f64 = rng.sample(StandardNormal);
            std_dev.mul_add(draw, mean).max(0.0)
        })
        .collect();

    let total: f64 = raw.iter().sum();
    if total > 0.0 {
        let scale = num_points as f64 / total;
        for value in &mut raw {
            *value *= scale;
        }
    }

    let mut sizes: Vec<usize> = raw.into_iter().map(round_to_count).collect();
    fix_num_points(&mut sizes, num_points);
    fix_empty(&mut sizes, allow_empty);
    sizes
}

fn round_to_count(value: f64) -> usize {
    value.round_ties_even() as usize
}

/// Places the cluster centers.
///
/// Each coordinate is uniform in `[-0.5, 0.5)`, scaled by `num_clusters` and
/// by the matching entry of `cluster_sep`, then shifted by `cluster_offset`.
/// The result has one row per cluster and one column per entry of
/// `cluster_sep`.
///
/// # Examples
/// ```
/// use clugen_core::cluster_centers;
/// use rand::{SeedableRng, rngs::SmallRng};
///
/// let mut rng = SmallRng::seed_from_u64(9);
/// let centers = cluster_centers(3, &[10.0, 0.0], &[100.0, -5.0], &mut rng);
/// assert_eq!((centers.rows(), centers.cols()), (3, 2));
/// for row in centers.iter_rows() {
///     assert!((85.0..115.0).contains(&row[0]));
///     assert_eq!(row[1], -5.0);
/// }
/// ```
pub fn cluster_centers<R: Rng + ?Sized>(
    num_clusters: usize,
    cluster_sep: &[f64],
    cluster_offset: &[f64],
    rng: &mut R,
) -> Matrix {
    let spread = num_clusters as f64;
    let mut centers = Matrix::zeros(num_clusters, cluster_sep.len());
    for row in centers.iter_rows_mut() {
        for (dim, (value, &sep)) in row.iter_mut().zip(cluster_sep).enumerate() {
            let uniform: f64 = rng.sample(Standard);
            let offset = cluster_offset.get(dim).copied().unwrap_or(0.0);
            *value = (spread * (uniform - 0.5)).mul_add(sep, offset);
        }
    }
    centers
}

/// Draws the length of each cluster's supporting line.
///
/// Lengths follow a folded normal distribution:
/// `|llength + llength_disp * N(0, 1)|`.
///
/// # Examples
/// ```
/// use clugen_core::line_lengths;
/// use rand::{SeedableRng, rngs::SmallRng};
///
/// let mut rng = SmallRng::seed_from_u64(1);
/// let lengths = line_lengths(50, 2.0, 10.0, &mut rng);
/// assert!(lengths.iter().all(|&length| length >= 0.0));
/// assert_eq!(line_lengths(2, 7.0, 0.0, &mut rng), vec![7.0, 7.0]);
/// ```
pub fn line_lengths<R: Rng + ?Sized>(
    num_clusters: usize,
    llength: f64,
    llength_disp: f64,
    rng: &mut R,
) -> Vec<f64> {
    (0..num_clusters)
        .map(|_| {
            let draw: f64 = rng.sample(StandardNormal);
            llength_disp.mul_add(draw, llength).abs()
        })
        .collect()
}

/// Draws each cluster's angle offset from its main direction.
///
/// Offsets are `angle_disp * N(0, 1)` wrapped into `[-π, π]` with
/// `atan2(sin a, cos a)`, then folded into `[-π/2, π/2]` by subtracting `π`
/// above `π/2` and adding `π` below `-π/2`.
///
/// # Examples
/// ```
/// use clugen_core::angle_deltas;
/// use rand::{SeedableRng, rngs::SmallRng};
/// use std::f64::consts::FRAC_PI_2;
///
/// let mut rng = SmallRng::seed_from_u64(2);
/// let deltas = angle_deltas(100, 10.0, &mut rng);
/// assert!(deltas.iter().all(|d| (-FRAC_PI_2..=FRAC_PI_2).contains(d)));
/// ```
pub fn angle_deltas<R: Rng + ?Sized>(num_clusters: usize, angle_disp: f64, rng: &mut R) -> Vec<f64> {
    (0..num_clusters)
        .map(|_| {
            let draw: f64 = rng.sample(StandardNormal);
            wrap_half_turn(angle_disp * draw)
        })
        .collect()
}

fn wrap_half_turn(angle: f64) -> f64 {
    let wrapped = angle.sin().atan2(angle.cos());
    if wrapped > FRAC_PI_2 {
        wrapped - PI
    } else if wrapped < -FRAC_PI_2 {
        wrapped + PI
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::suite_proptest_config;
    use proptest::prelude::*;
    use rand::{SeedableRng, rngs::SmallRng};
    use rstest::{fixture, rstest};

    #[fixture]
    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(0xD15C)
    }

    #[rstest]
    #[case(1, 0)]
    #[case(1, 1)]
    #[case(7, 7)]
    #[case(10, 3)]
    #[case(3, 1_000_000)]
    fn cluster_sizes_conserve_point_total(
        mut rng: SmallRng,
        #[case] num_clusters: usize,
        #[case] num_points: usize,
    ) {
        let sizes = cluster_sizes(num_clusters, num_points, true, &mut rng);
        assert_eq!(sizes.len(), num_clusters);
        assert_eq!(sizes.iter().sum::<usize>(), num_points);
    }

    #[rstest]
    fn cluster_sizes_with_zero_clusters_is_empty(mut rng: SmallRng) {
        assert!(cluster_sizes(0, 10, false, &mut rng).is_empty());
    }

    #[rstest]
    fn zero_separation_collapses_centers_onto_offset(mut rng: SmallRng) {
        let centers = cluster_centers(4, &[0.0, 0.0, 0.0], &[1.0, 2.0, 3.0], &mut rng);
        for row in centers.iter_rows() {
            assert_eq!(row, &[1.0, 2.0, 3.0]);
        }
    }

    #[rstest]
    fn zero_length_dispersion_returns_nominal_length(mut rng: SmallRng) {
        assert_eq!(line_lengths(3, 4.5, 0.0, &mut rng), vec![4.5; 3]);
    }

    #[rstest]
    fn zero_angle_dispersion_yields_zero_deltas(mut rng: SmallRng) {
        assert!(angle_deltas(5, 0.0, &mut rng).iter().all(|&d| d == 0.0));
    }

    #[rstest]
    #[case(0.25, 0.25)]
    #[case(2.0, 2.0 - PI)]
    #[case(-2.0, PI - 2.0)]
    #[case(PI + 0.1, 0.1)]
    fn wrap_half_turn_folds_into_half_range(#[case] angle: f64, #[case] expected: f64) {
        assert!((wrap_half_turn(angle) - expected).abs() < 1e-12);
    }

    proptest! {
        #![proptest_config(suite_proptest_config(128))]

        #[test]
        fn cluster_sizes_are_never_empty_when_disallowed(
            num_clusters in 1_usize..40,
            extra in 0_usize..500,
            seed in any::<u64>(),
        ) {
            let num_points = num_clusters + extra;
            let mut rng = SmallRng::seed_from_u64(seed);
            let sizes = cluster_sizes(num_clusters, num_points, false, &mut rng);
            prop_assert_eq!(sizes.iter().sum::<usize>(), num_points);
            prop_assert!(sizes.iter().all(|&size| size >= 1));
        }

        #[test]
        fn angle_deltas_stay_within_half_range(
            num_clusters in 1_usize..50,
            angle_disp in 0.0_f64..100.0,
            seed in any::<u64>(),
        ) {
            let mut rng = SmallRng::seed_from_u64(seed);
            for delta in angle_deltas(num_clusters, angle_disp, &mut rng) {
                prop_assert!((-FRAC_PI_2..=FRAC_PI_2).contains(&delta));
            }
        }

        #[test]
        fn line_lengths_are_non_negative(
            llength in -10.0_f64..10.0,
            llength_disp in 0.0_f64..20.0,
            seed in any::<u64>(),
        ) {
            let mut rng = SmallRng::seed_from_u64(seed);
            prop_assert!(line_lengths(16, llength, llength_disp, &mut rng)
                .iter()
                .all(|&length| length >= 0.0));
        }
    }
}
