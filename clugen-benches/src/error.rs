//! Benchmark setup error type.
//!
//! Lets setup functions propagate configuration failures with `?` instead of
//! using `.expect()`.

use clugen_core::ClugenError;

/// Errors that may occur during benchmark setup.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// Generator configuration or a warm-up run failed.
    #[error("cluster generation failed: {0}")]
    Generation(#[from] ClugenError),
    /// A warm-up run produced a different number of points than requested.
    #[error("warm-up run produced {got} points but {expected} were requested")]
    PointCount {
        /// Requested number of points.
        expected: usize,
        /// Number of points produced.
        got: usize,
    },
}
