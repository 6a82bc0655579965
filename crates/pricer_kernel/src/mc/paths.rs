//! Parallel short-rate path generation.

use std::time::Instant;

use pricer_models::short_rate::ShortRateProcess;
use rayon::prelude::*;
use tracing::debug;

use super::{MonteCarloConfig, TimeGrid};
use crate::error::KernelError;
use crate::rng::PricerRng;

/// Simulated short rates, one row per path and one column per grid time.
#[derive(Debug, Clone, PartialEq)]
pub struct PathMatrix {
    times: Vec<f64>,
    values: Vec<f64>,
    n_paths: usize,
}

impl PathMatrix {
    fn from_rows(times: Vec<f64>, rows: Vec<Vec<f64>>) -> Self {
        let n_paths = rows.len();
        let values = rows.into_iter().flatten().collect();
        Self {
            times,
            values,
            n_paths,
        }
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    pub fn n_paths(&self) -> usize {
        self.n_paths
    }

    pub fn n_steps(&self) -> usize {
        self.times.len() - 1
    }

    /// Short rates along path `i`.
    pub fn path(&self, i: usize) -> Result<&[f64], KernelError> {
        if i >= self.n_paths {
            return Err(KernelError::IndexOutOfRange(format!(
                "path {} of {}",
                i, self.n_paths
            )));
        }
        let width = self.times.len();
        Ok(&self.values[i * width..(i + 1) * width])
    }

    pub fn paths(&self) -> impl Iterator<Item = &[f64]> {
        self.values.chunks(self.times.len())
    }

    /// Average short rate across paths at each grid time.
    pub fn mean_path(&self) -> Vec<f64> {
        let mut mean = vec![0.0; self.times.len()];
        for path in self.paths() {
            for (m, r) in mean.iter_mut().zip(path) {
                *m += r;
            }
        }
        let n = self.n_paths as f64;
        mean.iter_mut().for_each(|m| *m /= n);
        mean
    }

    /// Cross-sectional standard deviation of the short rate at each grid time.
    pub fn std_dev_path(&self) -> Vec<f64> {
        let mean = self.mean_path();
        if self.n_paths < 2 {
            return vec![0.0; mean.len()];
        }
        let mut var = vec![0.0; mean.len()];
        for path in self.paths() {
            for ((v, r), m) in var.iter_mut().zip(path).zip(&mean) {
                *v += (r - m).powi(2);
            }
        }
        let denom = (self.n_paths - 1) as f64;
        var.into_iter().map(|v| (v / denom).sqrt()).collect()
    }

    /// Monte Carlo discount factors `E[exp(−∫₀ᵗ r ds)]` at each grid time.
    ///
    /// The integral is the trapezoidal sum along each path.
    pub fn discount_factors(&self) -> Vec<f64> {
        let mut totals = vec![0.0; self.times.len()];
        for path in self.paths() {
            let mut integral = 0.0;
            totals[0] += 1.0;
            for j in 1..path.len() {
                let dt = self.times[j] - self.times[j - 1];
                integral += 0.5 * (path[j - 1] + path[j]) * dt;
                totals[j] += (-integral).exp();
            }
        }
        let n = self.n_paths as f64;
        totals.into_iter().map(|t| t / n).collect()
    }
}

/// Generates short-rate paths on a uniform grid.
#[derive(Debug, Clone)]
pub struct PathGenerator {
    config: MonteCarloConfig,
    grid: TimeGrid,
}

impl PathGenerator {
    pub fn new(config: MonteCarloConfig) -> Result<Self, KernelError> {
        let grid = TimeGrid::uniform(config.horizon(), config.n_steps())?;
        Ok(Self { config, grid })
    }

    pub fn config(&self) -> &MonteCarloConfig {
        &self.config
    }

    pub fn grid(&self) -> &TimeGrid {
        &self.grid
    }

    /// Simulate `n_paths` paths of `process` in parallel.
    pub fn generate<P: ShortRateProcess>(&self, process: &P) -> Result<PathMatrix, KernelError> {
        let started = Instant::now();
        let seed = self.config.seed();

        let rows = (0..self.config.n_paths())
            .into_par_iter()
            .map(|i| self.simulate(process, seed.wrapping_add(i as u64)))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            n_paths = self.config.n_paths(),
            n_steps = self.config.n_steps(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "generated short-rate paths"
        );
        Ok(PathMatrix::from_rows(self.grid.times().to_vec(), rows))
    }

    fn simulate<P: ShortRateProcess>(&self, process: &P, seed: u64) -> Result<Vec<f64>, KernelError> {
        let mut rng = PricerRng::from_seed(seed);
        let times = self.grid.times();
        let mut path = Vec::with_capacity(times.len());
        let mut x = process.x0();
        path.push(x);
        for i in 0..self.grid.steps() {
            x = process.evolve(times[i], x, self.grid.dt(i), rng.gen_normal())?;
            path.push(x);
        }
        Ok(path)
    }
}
