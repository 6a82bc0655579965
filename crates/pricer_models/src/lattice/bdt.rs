//! Black-Derman-Toy recombining binomial tree.

use std::fmt;

use crate::error::ModelError;

/// Market input for one tenor: zero yield and short-rate volatility (decimals).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BdtQuote {
    /// Annually compounded zero-coupon yield
    pub rate: f64,
    /// Volatility of the short rate at that horizon
    pub volatility: f64,
}

impl BdtQuote {
    pub fn new(rate: f64, volatility: f64) -> Self {
        Self { rate, volatility }
    }

    /// Price of a zero-coupon bond paying `face` after `tenor` years.
    pub fn zero_price(&self, tenor: u32, face: f64) -> f64 {
        face * (1.0 + self.rate).powi(-(tenor as i32))
    }
}

/// Binomial short-rate tree with one-year steps.
///
/// Level `t` holds `t + 1` rates; node `(t, i)` moves down to `(t + 1, i)`
/// and up to `(t + 1, i + 1)` with probability `probability`.
#[derive(Debug, Clone, PartialEq)]
pub struct BdtTree {
    rates: Vec<Vec<f64>>,
    probability: f64,
}

impl Default for BdtTree {
    fn default() -> Self {
        Self::new()
    }
}

impl BdtTree {
    /// Up-move probability used by the model.
    pub const PROBABILITY: f64 = 0.5;

    /// An empty tree.
    pub fn new() -> Self {
        Self {
            rates: Vec::new(),
            probability: Self::PROBABILITY,
        }
    }

    /// Build a tree from explicit node rates.
    pub fn from_levels(rates: Vec<Vec<f64>>) -> Result<Self, ModelError> {
        for (t, level) in rates.iter().enumerate() {
            check_level(t, level)?;
        }
        Ok(Self {
            rates,
            probability: Self::PROBABILITY,
        })
    }

    /// Rates at level `t` for lowest rate `base`: `base · e^{2 σ i}`, `i = 0..=t`.
    pub fn level_rates(base: f64, volatility: f64, t: usize) -> Vec<f64> {
        (0..=t)
            .map(|i| base * (2.0 * volatility * i as f64).exp())
            .collect()
    }

    /// Append the next level.
    pub fn push_level(&mut self, rates: Vec<f64>) -> Result<(), ModelError> {
        check_level(self.rates.len(), &rates)?;
        self.rates.push(rates);
        Ok(())
    }

    /// Number of levels (one-year steps) in the tree.
    pub fn levels(&self) -> usize {
        self.rates.len()
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }

    pub fn level(&self, t: usize) -> Option<&[f64]> {
        self.rates.get(t).map(Vec::as_slice)
    }

    pub fn rate(&self, t: usize, i: usize) -> Result<f64, ModelError> {
        self.rates
            .get(t)
            .and_then(|level| level.get(i))
            .copied()
            .ok_or_else(|| ModelError::LatticeIndex(format!("node ({}, {})", t, i)))
    }

    /// Arrow-Debreu prices of the nodes at level `t`.
    ///
    /// `t` may equal [`levels`](Self::levels): prices at the horizon only need
    /// the rates of earlier levels.
    pub fn state_prices(&self, t: usize) -> Result<Vec<f64>, ModelError> {
        if t > self.levels() {
            return Err(ModelError::LatticeIndex(format!(
                "state prices at level {} of a {}-level tree",
                t,
                self.levels()
            )));
        }
        let p = self.probability;
        let mut prices = vec![1.0];
        for level in &self.rates[..t] {
            let mut next = vec![0.0; level.len() + 1];
            for (i, (q, r)) in prices.iter().zip(level.iter()).enumerate() {
                let discounted = q / (1.0 + r);
                next[i] += (1.0 - p) * discounted;
                next[i + 1] += p * discounted;
            }
            prices = next;
        }
        Ok(prices)
    }

    /// Price today of `face` paid at `maturity` years, by backward induction.
    pub fn zero_coupon_price(&self, maturity: usize, face: f64) -> Result<f64, ModelError> {
        if maturity > self.levels() {
            return Err(ModelError::LatticeIndex(format!(
                "maturity {} beyond a {}-level tree",
                maturity,
                self.levels()
            )));
        }
        let p = self.probability;
        let mut values = vec![face; maturity + 1];
        for level in self.rates[..maturity].iter().rev() {
            values = level
                .iter()
                .enumerate()
                .map(|(i, r)| (p * values[i + 1] + (1.0 - p) * values[i]) / (1.0 + r))
                .collect();
        }
        Ok(values[0])
    }
}

fn check_level(t: usize, rates: &[f64]) -> Result<(), ModelError> {
    if rates.len() != t + 1 {
        return Err(ModelError::LatticeIndex(format!(
            "level {} needs {} nodes, got {}",
            t,
            t + 1,
            rates.len()
        )));
    }
    if let Some(r) = rates.iter().find(|r| !(r.is_finite() && **r > -1.0)) {
        return Err(ModelError::InvalidParameter {
            name: "rate",
            value: *r,
            reason: "node rates must be finite and above -100%",
        });
    }
    Ok(())
}

impl fmt::Display for BdtTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (t, level) in self.rates.iter().enumerate() {
            writeln!(f, "t={}", t)?;
            for (i, r) in level.iter().enumerate() {
                writeln!(f, "{}\t{:.4}", i, r * 100.0)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn two_level_tree() -> BdtTree {
        BdtTree::from_levels(vec![vec![0.10], vec![0.09, 0.13]]).unwrap()
    }

    #[test]
    fn test_level_rates_ratio() {
        let rates = BdtTree::level_rates(0.1, 0.2, 3);
        assert_eq!(rates.len(), 4);
        assert_relative_eq!(rates[0], 0.1);
        for w in rates.windows(2) {
            assert_relative_eq!(w[1] / w[0], 0.4_f64.exp(), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_zero_coupon_price_backward_induction() {
        let tree = two_level_tree();
        assert_relative_eq!(tree.zero_coupon_price(0, 100.0).unwrap(), 100.0);
        assert_relative_eq!(tree.zero_coupon_price(1, 100.0).unwrap(), 100.0 / 1.1, epsilon = 1e-12);

        let expected = 0.5 * (100.0 / 1.09 + 100.0 / 1.13) / 1.1;
        assert_relative_eq!(tree.zero_coupon_price(2, 100.0).unwrap(), expected, epsilon = 1e-12);
        assert!(tree.zero_coupon_price(3, 100.0).is_err());
    }

    #[test]
    fn test_state_prices_sum_to_discount_factors() {
        let mut tree = two_level_tree();
        tree.push_level(BdtTree::level_rates(0.08, 0.18, 2)).unwrap();
        for t in 0..=tree.levels() {
            let total: f64 = tree.state_prices(t).unwrap().iter().sum();
            assert_relative_eq!(total, tree.zero_coupon_price(t, 1.0).unwrap(), epsilon = 1e-12);
        }
        assert!(tree.state_prices(tree.levels() + 1).is_err());
    }

    #[test]
    fn test_rejects_malformed_levels() {
        assert!(BdtTree::from_levels(vec![vec![0.1, 0.2]]).is_err());
        let mut tree = two_level_tree();
        assert!(tree.push_level(vec![0.1, 0.2]).is_err());
        assert!(tree.push_level(vec![0.1, f64::NAN, 0.2]).is_err());
        assert_eq!(tree.levels(), 2);
    }

    #[test]
    fn test_node_access_and_display() {
        let tree = two_level_tree();
        assert_eq!(tree.rate(1, 1).unwrap(), 0.13);
        assert!(tree.rate(1, 2).is_err());
        assert_eq!(tree.level(0), Some(&[0.10][..]));

        let rendered = tree.to_string();
        assert_eq!(rendered, "t=0\n0\t10.0000\nt=1\n0\t9.0000\n1\t13.0000\n");
    }

    #[test]
    fn test_quote_zero_price() {
        let quote = BdtQuote::new(0.11, 0.19);
        assert_relative_eq!(quote.zero_price(2, 100.0), 100.0 / (1.11 * 1.11), epsilon = 1e-12);
    }
}
