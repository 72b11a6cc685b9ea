//! Property tests over whole generation runs.

use clugen_core::{ClugenBuilder, ClugenParams, Direction};
use clugen_test_support::ci::property_test_profile::ProptestRunProfile;
use proptest::prelude::*;
use rand::{SeedableRng, rngs::SmallRng};
use test_strategy::{Arbitrary, proptest};

/// Generator configuration drawn for each case.
#[derive(Clone, Debug, Arbitrary)]
struct Scenario {
    #[strategy(1_usize..6)]
    num_dims: usize,
    #[strategy(1_usize..8)]
    num_clusters: usize,
    #[strategy(0_usize..300)]
    extra_points: usize,
    #[strategy(0.0_f64..3.0)]
    angle_disp: f64,
    #[strategy(0.0_f64..4.0)]
    lateral_disp: f64,
    allow_empty: bool,
    uniform: bool,
    around: bool,
    seed: u64,
}

impl Scenario {
    fn builder(&self) -> ClugenBuilder {
        let params = ClugenParams {
            num_dims: self.num_dims,
            num_clusters: self.num_clusters,
            num_points: self.num_clusters + self.extra_points,
            direction: Direction::Single(vec![1.0; self.num_dims]),
            angle_disp: self.angle_disp,
            cluster_sep: vec![10.0; self.num_dims],
            llength: 5.0,
            llength_disp: 1.0,
            lateral_disp: self.lateral_disp,
        };
        ClugenBuilder::new(params)
            .with_allow_empty(self.allow_empty)
            .with_projection_tag(if self.uniform { "unif" } else { "norm" })
            .with_placement_tag(if self.around { "n" } else { "n-1" })
    }
}

fn config() -> ProptestConfig {
    let profile = ProptestRunProfile::load(64, false);
    ProptestConfig {
        cases: profile.cases(),
        fork: profile.fork(),
        ..ProptestConfig::default()
    }
}

#[proptest(config())]
fn generation_output_is_consistent(scenario: Scenario) {
    let clusters = scenario
        .builder()
        .build()
        .map_err(|err| TestCaseError::fail(err.to_string()))?
        .generate_with_rng(&mut SmallRng::seed_from_u64(scenario.seed))
        .map_err(|err| TestCaseError::fail(err.to_string()))?;

    let num_points = scenario.num_clusters + scenario.extra_points;
    prop_assert_eq!(clusters.len(), num_points);
    prop_assert_eq!(clusters.sizes().iter().sum::<usize>(), num_points);
    prop_assert_eq!(clusters.points().rows(), num_points);
    prop_assert_eq!(clusters.points().cols(), scenario.num_dims);
    if !scenario.allow_empty {
        prop_assert!(clusters.sizes().iter().all(|&size| size >= 1));
    }
    prop_assert!(clusters.clusters().windows(2).all(|pair| pair[0] <= pair[1]));
    prop_assert!(
        clusters
            .clusters()
            .iter()
            .all(|&label| (1..=scenario.num_clusters).contains(&label))
    );
    for direction in clusters.directions().iter_rows() {
        let norm = direction.iter().map(|v| v * v).sum::<f64>().sqrt();
        prop_assert!((norm - 1.0).abs() < 1e-9);
    }
    prop_assert!(clusters.lengths().iter().all(|&length| length >= 0.0));
    if scenario.num_dims == 1 {
        prop_assert_eq!(clusters.points(), clusters.projections());
    }
}

#[proptest(config())]
fn same_seed_same_output(scenario: Scenario) {
    let generator = scenario
        .builder()
        .build()
        .map_err(|err| TestCaseError::fail(err.to_string()))?;
    let first = generator.generate_with_rng(&mut SmallRng::seed_from_u64(scenario.seed));
    let second = generator.generate_with_rng(&mut SmallRng::seed_from_u64(scenario.seed));
    prop_assert_eq!(first, second);
}
