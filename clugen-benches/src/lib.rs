//! Benchmark support crate for clugen.
//!
//! Provides the parameter grid and setup error type shared by the Criterion
//! benchmarks of the generation pipeline.

pub mod error;
pub mod params;
