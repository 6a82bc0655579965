use crate::error::KernelError;

/// Simulation times `0 = t_0 < t_1 < ... < t_n`.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeGrid {
    times: Vec<f64>,
}

impl TimeGrid {
    /// `steps + 1` equally spaced times from 0 to `horizon`.
    pub fn uniform(horizon: f64, steps: usize) -> Result<Self, KernelError> {
        if steps == 0 || !(horizon > 0.0 && horizon.is_finite()) {
            return Err(KernelError::InvalidConfig(format!(
                "uniform grid needs steps >= 1 and a positive horizon, got {} steps over {}",
                steps, horizon
            )));
        }
        let dt = horizon / steps as f64;
        let mut times: Vec<f64> = (0..=steps).map(|i| i as f64 * dt).collect();
        times[steps] = horizon;
        Ok(Self { times })
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Number of points, including `t = 0`.
    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn steps(&self) -> usize {
        self.times.len() - 1
    }

    pub fn horizon(&self) -> f64 {
        self.times[self.times.len() - 1]
    }

    /// Length of step `i` (from `t_i` to `t_{i+1}`).
    pub fn dt(&self, i: usize) -> f64 {
        self.times[i + 1] - self.times[i]
    }

    /// Index of the grid time nearest to `t`.
    pub fn closest_index(&self, t: f64) -> usize {
        let i = self.times.partition_point(|&x| x < t);
        if i == 0 {
            return 0;
        }
        if i == self.times.len() {
            return i - 1;
        }
        if (self.times[i] - t).abs() < (t - self.times[i - 1]).abs() {
            i
        } else {
            i - 1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_uniform_grid() {
        let grid = TimeGrid::uniform(30.0, 360).unwrap();
        assert_eq!(grid.len(), 361);
        assert_eq!(grid.steps(), 360);
        assert_eq!(grid.times()[0], 0.0);
        assert_eq!(grid.horizon(), 30.0);
        assert_relative_eq!(grid.dt(17), 1.0 / 12.0, epsilon = 1e-12);
    }

    #[test]
    fn test_closest_index() {
        let grid = TimeGrid::uniform(30.0, 360).unwrap();
        assert_eq!(grid.closest_index(-1.0), 0);
        assert_eq!(grid.closest_index(1.0), 12);
        assert_eq!(grid.closest_index(1.01), 12);
        assert_eq!(grid.closest_index(1.07), 13);
        assert_eq!(grid.closest_index(99.0), 360);
    }

    #[test]
    fn test_invalid_grid() {
        assert!(TimeGrid::uniform(1.0, 0).is_err());
        assert!(TimeGrid::uniform(-1.0, 10).is_err());
    }
}
