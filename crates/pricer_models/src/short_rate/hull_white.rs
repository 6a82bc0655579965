//! Hull-White one-factor model `dr = (θ(t) − a r) dt + σ dW`.

use std::fmt;
use std::sync::Arc;

use pricer_core::types::{Compounding, DayCountConvention, Frequency};

use super::ShortRateProcess;
use crate::curves::YieldTermStructure;
use crate::error::ModelError;

/// Shared handle to the curve the model is fitted to.
pub type CurveHandle = Arc<dyn YieldTermStructure + Send + Sync>;

/// Hull-White model fitted exactly to an initial discount curve.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use chrono::NaiveDate;
/// use pricer_core::types::{Compounding, DayCountConvention, Frequency, InterestRate};
/// use pricer_models::curves::FlatForward;
/// use pricer_models::short_rate::HullWhite;
///
/// let reference = NaiveDate::from_ymd_opt(2025, 1, 2).unwrap();
/// let rate = InterestRate::new(0.03, DayCountConvention::Actual365Fixed, Compounding::Continuous, Frequency::Annual);
/// let model = HullWhite::new(Arc::new(FlatForward::new(reference, rate)), 0.01, 0.01).unwrap();
/// let b = model.bond_b(0.0, 5.0);
/// assert!((b - (1.0 - (-0.05_f64).exp()) / 0.01).abs() < 1e-12);
/// ```
#[derive(Clone)]
pub struct HullWhite {
    curve: CurveHandle,
    a: f64,
    sigma: f64,
    forward_tenor: f64,
}

impl fmt::Debug for HullWhite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HullWhite")
            .field("reference_date", &self.curve.reference_date())
            .field("a", &self.a)
            .field("sigma", &self.sigma)
            .field("forward_tenor", &self.forward_tenor)
            .finish()
    }
}

impl HullWhite {
    /// Create a model on `curve` with mean reversion `a` and volatility `sigma`.
    pub fn new(curve: CurveHandle, a: f64, sigma: f64) -> Result<Self, ModelError> {
        validate_params(a, sigma)?;

        // One calendar day on a 30/360 bond basis proxies the short-rate tenor
        let reference = curve.reference_date();
        let next_day = reference.succ_opt().ok_or_else(|| {
            ModelError::InvalidCurve(format!("no date follows reference date {}", reference))
        })?;
        let forward_tenor = DayCountConvention::Thirty360.year_fraction(reference, next_day);

        Ok(Self {
            curve,
            a,
            sigma,
            forward_tenor,
        })
    }

    /// Replace both parameters.
    pub fn set_params(&mut self, a: f64, sigma: f64) -> Result<(), ModelError> {
        validate_params(a, sigma)?;
        self.a = a;
        self.sigma = sigma;
        Ok(())
    }

    #[inline]
    pub fn a(&self) -> f64 {
        self.a
    }

    #[inline]
    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    pub fn curve(&self) -> &CurveHandle {
        &self.curve
    }

    /// Year fraction spanned by the short-rate proxy forward.
    pub fn forward_tenor(&self) -> f64 {
        self.forward_tenor
    }

    /// Short-tenor forward rate at `t`, annually compounded.
    pub fn forward(&self, t: f64) -> Result<f64, ModelError> {
        let rate = self.curve.forward_rate(
            t,
            t + self.forward_tenor,
            Compounding::Compounded,
            Frequency::Annual,
        )?;
        Ok(rate.rate())
    }

    /// Mean of the short rate at `t`: `f(t) + ½ (σ/a (1 − e^{−a t}))²`.
    pub fn alpha(&self, t: f64) -> Result<f64, ModelError> {
        let adj = self.sigma / self.a * (1.0 - (-self.a * t).exp());
        Ok(self.forward(t)? + 0.5 * adj * adj)
    }

    /// `B(t, T) = (1 − e^{−a (T − t)}) / a`.
    pub fn bond_b(&self, t: f64, maturity: f64) -> f64 {
        (1.0 - (-self.a * (maturity - t)).exp()) / self.a
    }

    /// `A(t, T)` of the affine bond price `P(t, T) = A e^{−B r}`.
    pub fn bond_a(&self, t: f64, maturity: f64) -> Result<f64, ModelError> {
        if maturity < t {
            return Err(ModelError::InvalidParameter {
                name: "maturity",
                value: maturity,
                reason: "must not precede the observation time",
            });
        }
        let b = self.bond_b(t, maturity);
        let ratio = self.curve.discount(maturity)? / self.curve.discount(t)?;
        let convexity = self.sigma * self.sigma / (4.0 * self.a)
            * (1.0 - (-2.0 * self.a * t).exp())
            * b
            * b;
        Ok((ratio.ln() + b * self.forward(t)? - convexity).exp())
    }

    /// Price at `t` of a zero-coupon bond maturing at `maturity` when the short rate is `r`.
    pub fn discount_bond(&self, t: f64, maturity: f64, r: f64) -> Result<f64, ModelError> {
        Ok(self.bond_a(t, maturity)? * (-self.bond_b(t, maturity) * r).exp())
    }

    /// Exact transition process for path simulation.
    pub fn process(&self) -> Result<HullWhiteProcess, ModelError> {
        HullWhiteProcess::new(self.clone())
    }
}

fn validate_params(a: f64, sigma: f64) -> Result<(), ModelError> {
    if !(a > 0.0 && a.is_finite()) {
        return Err(ModelError::InvalidParameter {
            name: "a",
            value: a,
            reason: "mean reversion must be positive",
        });
    }
    if !(sigma > 0.0 && sigma.is_finite()) {
        return Err(ModelError::InvalidParameter {
            name: "sigma",
            value: sigma,
            reason: "volatility must be positive",
        });
    }
    Ok(())
}

/// Hull-White short rate as an Ornstein-Uhlenbeck process around `alpha(t)`.
#[derive(Debug, Clone)]
pub struct HullWhiteProcess {
    model: HullWhite,
    x0: f64,
}

impl HullWhiteProcess {
    pub fn new(model: HullWhite) -> Result<Self, ModelError> {
        let x0 = model.forward(0.0)?;
        Ok(Self { model, x0 })
    }

    pub fn model(&self) -> &HullWhite {
        &self.model
    }

    /// Standard deviation of `r(t + dt)` given `r(t)`.
    pub fn std_deviation(&self, dt: f64) -> f64 {
        let a = self.model.a;
        self.model.sigma * ((1.0 - (-2.0 * a * dt).exp()) / (2.0 * a)).sqrt()
    }
}

impl ShortRateProcess for HullWhiteProcess {
    fn x0(&self) -> f64 {
        self.x0
    }

    fn evolve(&self, t: f64, x: f64, dt: f64, z: f64) -> Result<f64, ModelError> {
        let decay = (-self.model.a * dt).exp();
        let mean = self.model.alpha(t + dt)? + (x - self.model.alpha(t)?) * decay;
        Ok(mean + self.std_deviation(dt) * z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curves::{CurveInterpolation, FlatForward, InterpolatedDiscountCurve};
    use approx::assert_relative_eq;
    use chrono::NaiveDate;
    use pricer_core::types::InterestRate;

    fn reference() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 3).unwrap()
    }

    fn flat_model(a: f64, sigma: f64) -> HullWhite {
        let rate = InterestRate::new(
            0.04,
            DayCountConvention::ActualActualIsda,
            Compounding::Continuous,
            Frequency::Annual,
        );
        HullWhite::new(Arc::new(FlatForward::new(reference(), rate)), a, sigma).unwrap()
    }

    fn sloped_model() -> HullWhite {
        let times = vec![0.0, 1.0, 2.0, 5.0, 10.0, 30.0];
        let zeros: [f64; 6] = [0.0, 0.030, 0.033, 0.037, 0.040, 0.042];
        let discounts = times
            .iter()
            .zip(zeros.iter())
            .map(|(t, z)| (-z * t).exp())
            .collect();
        let curve = InterpolatedDiscountCurve::new(
            reference(),
            DayCountConvention::ActualActualIsda,
            times,
            discounts,
            CurveInterpolation::LogCubic,
        )
        .unwrap()
        .with_extrapolation(true);
        HullWhite::new(Arc::new(curve), 0.05, 0.01).unwrap()
    }

    #[test]
    fn test_rejects_non_positive_parameters() {
        let rate = InterestRate::new(
            0.04,
            DayCountConvention::Actual365Fixed,
            Compounding::Continuous,
            Frequency::Annual,
        );
        let curve: CurveHandle = Arc::new(FlatForward::new(reference(), rate));
        assert!(HullWhite::new(curve.clone(), 0.0, 0.01).is_err());
        assert!(HullWhite::new(curve.clone(), 0.01, -0.01).is_err());

        let mut model = HullWhite::new(curve, 0.01, 0.01).unwrap();
        assert!(model.set_params(0.02, f64::NAN).is_err());
        assert_eq!(model.sigma(), 0.01);
        model.set_params(0.03, 0.02).unwrap();
        assert_eq!((model.a(), model.sigma()), (0.03, 0.02));
    }

    #[test]
    fn test_forward_tenor_is_one_day() {
        let model = flat_model(0.01, 0.01);
        assert_relative_eq!(model.forward_tenor(), 1.0 / 360.0, epsilon = 1e-15);
    }

    #[test]
    fn test_alpha_on_flat_curve() {
        let model = flat_model(0.1, 0.02);
        let f = 0.04_f64.exp() - 1.0;
        assert_relative_eq!(model.alpha(0.0).unwrap(), f, epsilon = 1e-10);

        let t = 5.0;
        let adj = 0.02 / 0.1 * (1.0 - (-0.1_f64 * t).exp());
        assert_relative_eq!(model.alpha(t).unwrap(), f + 0.5 * adj * adj, epsilon = 1e-10);
    }

    #[test]
    fn test_zero_shock_path_follows_alpha() {
        let process = sloped_model().process().unwrap();
        let model = process.model();
        let dt = 1.0 / 12.0;
        let mut x = process.x0();
        for step in 0..24 {
            let t = step as f64 * dt;
            x = process.evolve(t, x, dt, 0.0).unwrap();
            assert_relative_eq!(x, model.alpha(t + dt).unwrap(), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_transition_std_deviation() {
        let process = flat_model(0.1, 0.01).process().unwrap();
        let dt = 0.5;
        let up = process.evolve(1.0, 0.03, dt, 1.0).unwrap();
        let mid = process.evolve(1.0, 0.03, dt, 0.0).unwrap();
        let expected = 0.01 * ((1.0 - (-0.1_f64).exp()) / 0.2).sqrt();
        assert_relative_eq!(up - mid, expected, epsilon = 1e-14);
    }

    #[test]
    fn test_bond_price_matches_curve_at_origin() {
        let model = sloped_model();
        let r0 = model.forward(0.0).unwrap();
        for maturity in [0.5, 1.0, 3.0, 7.0, 20.0] {
            let p = model.discount_bond(0.0, maturity, r0).unwrap();
            assert_relative_eq!(p, model.curve().discount(maturity).unwrap(), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_bond_price_decreases_with_short_rate() {
        let model = sloped_model();
        let low = model.discount_bond(2.0, 5.0, 0.01).unwrap();
        let high = model.discount_bond(2.0, 5.0, 0.06).unwrap();
        assert!(low > high);
        assert_relative_eq!(model.discount_bond(3.0, 3.0, 0.05).unwrap(), 1.0, epsilon = 1e-12);
        assert!(model.bond_a(3.0, 2.0).is_err());
    }
}
