//! Per-cluster RNG stream derivation for parallel generation.

use rand::{SeedableRng, rngs::SmallRng};

const GOLDEN_GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;

/// Seed for cluster `cluster_index`: the SplitMix64 output at stream position
/// `cluster_index + 1` after `base_seed`.
pub(crate) fn mix_cluster_seed(base_seed: u64, cluster_index: usize) -> u64 {
    let position = (cluster_index as u64).wrapping_add(1);
    let mut z = base_seed.wrapping_add(position.wrapping_mul(GOLDEN_GAMMA));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Independent generator for one cluster, derived from `base_seed`.
pub(crate) fn cluster_rng(base_seed: u64, cluster_index: usize) -> SmallRng {
    SmallRng::seed_from_u64(mix_cluster_seed(base_seed, cluster_index))
}
