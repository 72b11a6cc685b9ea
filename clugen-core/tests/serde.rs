//! Serialised shape of generation output.
#![cfg(feature = "serde")]

use clugen_core::{ClugenBuilder, ClugenParams, Direction};
use rand::{SeedableRng, rngs::SmallRng};
use rstest::rstest;
use serde_json::Value;

#[rstest]
fn clusters_serialise_with_named_arrays() {
    let params = ClugenParams {
        num_dims: 2,
        num_clusters: 2,
        num_points: 6,
        direction: Direction::from([1.0, 0.0]),
        angle_disp: 0.0,
        cluster_sep: vec![4.0, 4.0],
        llength: 2.0,
        llength_disp: 0.0,
        lateral_disp: 0.1,
    };
    let clusters = ClugenBuilder::new(params)
        .with_cluster_sizes(vec![2, 4])
        .build()
        .expect("configuration must be valid")
        .generate_with_rng(&mut SmallRng::seed_from_u64(1))
        .expect("generation must succeed");

    let value = serde_json::to_value(&clusters).expect("serialisation must succeed");
    for key in [
        "points",
        "clusters",
        "projections",
        "sizes",
        "centers",
        "directions",
        "angles",
        "lengths",
    ] {
        assert!(value.get(key).is_some(), "missing field {key}");
    }
    assert_eq!(value["clusters"], serde_json::json!([1, 1, 2, 2, 2, 2]));
    assert_eq!(value["points"]["rows"], Value::from(6));
    assert_eq!(value["points"]["cols"], Value::from(2));
    assert_eq!(value["points"]["data"].as_array().map(Vec::len), Some(12));
}
