//! # pricer_kernel
//!
//! Monte Carlo engine for short-rate models.
//!
//! - [`rng`]: reproducible pseudo-random numbers ([`rng::PricerRng`])
//! - [`mc`]: time grids, configuration and parallel path generation
//!
//! Every path owns a generator seeded with `seed + path_index`, so a run is
//! reproducible regardless of how rayon schedules the work.
//!
//! ## Example
//!
//! ```rust,ignore
//! use pricer_kernel::mc::{MonteCarloConfig, PathGenerator};
//!
//! let config = MonteCarloConfig::builder().n_paths(4096).n_steps(360).horizon(30.0).seed(7).build()?;
//! let paths = PathGenerator::new(config)?.generate(&process)?;
//! let mean = paths.mean_path();
//! ```

pub mod error;
pub mod mc;
pub mod rng;

pub use error::KernelError;

/// Size the global rayon pool. Fails if the pool has already been initialised.
pub fn init_thread_pool(threads: usize) -> Result<(), KernelError> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .map_err(KernelError::from)
}
