//! Monte Carlo configuration.

use crate::error::KernelError;

/// Number of paths, time steps, horizon and seed of a simulation.
#[derive(Debug, Clone, PartialEq)]
pub struct MonteCarloConfig {
    n_paths: usize,
    n_steps: usize,
    horizon: f64,
    seed: u64,
}

impl MonteCarloConfig {
    pub const DEFAULT_PATHS: usize = 4096;
    pub const DEFAULT_STEPS: usize = 360;
    pub const DEFAULT_HORIZON: f64 = 30.0;

    pub fn builder() -> MonteCarloConfigBuilder {
        MonteCarloConfigBuilder::default()
    }

    #[inline]
    pub fn n_paths(&self) -> usize {
        self.n_paths
    }

    #[inline]
    pub fn n_steps(&self) -> usize {
        self.n_steps
    }

    /// Simulation horizon in years.
    #[inline]
    pub fn horizon(&self) -> f64 {
        self.horizon
    }

    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

/// Builder for [`MonteCarloConfig`]; unset fields take the defaults.
#[derive(Debug, Clone)]
pub struct MonteCarloConfigBuilder {
    n_paths: usize,
    n_steps: usize,
    horizon: f64,
    seed: u64,
}

impl Default for MonteCarloConfigBuilder {
    fn default() -> Self {
        Self {
            n_paths: MonteCarloConfig::DEFAULT_PATHS,
            n_steps: MonteCarloConfig::DEFAULT_STEPS,
            horizon: MonteCarloConfig::DEFAULT_HORIZON,
            seed: 0,
        }
    }
}

impl MonteCarloConfigBuilder {
    pub fn n_paths(mut self, n_paths: usize) -> Self {
        self.n_paths = n_paths;
        self
    }

    pub fn n_steps(mut self, n_steps: usize) -> Self {
        self.n_steps = n_steps;
        self
    }

    pub fn horizon(mut self, horizon: f64) -> Self {
        self.horizon = horizon;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn build(self) -> Result<MonteCarloConfig, KernelError> {
        if self.n_paths == 0 {
            return Err(KernelError::InvalidConfig("n_paths must be at least 1".into()));
        }
        if self.n_steps == 0 {
            return Err(KernelError::InvalidConfig("n_steps must be at least 1".into()));
        }
        if !(self.horizon > 0.0 && self.horizon.is_finite()) {
            return Err(KernelError::InvalidConfig(format!(
                "horizon must be positive and finite, got {}",
                self.horizon
            )));
        }
        Ok(MonteCarloConfig {
            n_paths: self.n_paths,
            n_steps: self.n_steps,
            horizon: self.horizon,
            seed: self.seed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let config = MonteCarloConfig::builder().build().unwrap();
        assert_eq!(config.n_paths(), 4096);
        assert_eq!(config.n_steps(), 360);
        assert_eq!(config.horizon(), 30.0);
    }

    #[test]
    fn test_builder_validation() {
        assert!(MonteCarloConfig::builder().n_paths(0).build().is_err());
        assert!(MonteCarloConfig::builder().n_steps(0).build().is_err());
        assert!(MonteCarloConfig::builder().horizon(0.0).build().is_err());
        assert!(MonteCarloConfig::builder().horizon(f64::NAN).build().is_err());

        let config = MonteCarloConfig::builder()
            .n_paths(10)
            .n_steps(12)
            .horizon(1.0)
            .seed(9)
            .build()
            .unwrap();
        assert_eq!((config.n_paths(), config.n_steps(), config.seed()), (10, 12, 9));
    }
}
