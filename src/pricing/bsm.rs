use impl_new_derive::ImplNew;
use statrs::distribution::ContinuousCDF;
use statrs::distribution::Normal;

use crate::error::QuantError;
use crate::traits::PricerExt;
use crate::traits::TimeExt;
use crate::OptionType;

/// European Black-Scholes (1973) pricer.
///
/// At or past expiry the option is worth its payoff. With zero volatility
/// the price is the sigma -> 0 limit of the formula, the discounted
/// intrinsic value. Both branches short-circuit before d1/d2, so the
/// `sigma * sqrt(tau)` denominator is never zero.
#[derive(ImplNew, Clone, Copy, Debug)]
pub struct BlackScholesPricer {
  /// Underlying price
  pub s: f64,
  /// Volatility
  pub v: f64,
  /// Strike price
  pub k: f64,
  /// Risk-free rate
  pub r: f64,
  /// Time to maturity in years
  pub tau: Option<f64>,
  /// Evaluation date
  pub eval: Option<chrono::NaiveDate>,
  /// Expiration date
  pub expiration: Option<chrono::NaiveDate>,
  /// Option type
  pub option_type: OptionType,
}

impl PricerExt for BlackScholesPricer {
  fn calculate_call_put(&self) -> Result<(f64, f64), QuantError> {
    self.validate()?;
    let tau = self.tau_or_from_dates()?;

    if !tau.is_finite() {
      return Err(QuantError::invalid("tau must be finite"));
    }

    if tau <= 0.0 {
      return Ok(self.intrinsic());
    }

    if self.v == 0.0 {
      return Ok(self.discounted_intrinsic(tau));
    }

    let (d1, d2) = self.d1_d2(tau);
    let n = Normal::default();
    let df = (-self.r * tau).exp();

    let call = self.s * n.cdf(d1) - self.k * df * n.cdf(d2);
    let put = self.k * df * n.cdf(-d2) - self.s * n.cdf(-d1);

    Ok((call, put))
  }

  fn calculate_price(&self) -> Result<f64, QuantError> {
    let (call, put) = self.calculate_call_put()?;
    Ok(match self.option_type {
      OptionType::Call => call,
      OptionType::Put => put,
    })
  }
}

impl TimeExt for BlackScholesPricer {
  fn tau(&self) -> Option<f64> {
    self.tau
  }

  fn eval(&self) -> Option<chrono::NaiveDate> {
    self.eval
  }

  fn expiration(&self) -> Option<chrono::NaiveDate> {
    self.expiration
  }
}

impl BlackScholesPricer {
  fn validate(&self) -> Result<(), QuantError> {
    if !self.s.is_finite() || self.s <= 0.0 {
      return Err(QuantError::invalid("spot must be positive"));
    }
    if !self.k.is_finite() || self.k <= 0.0 {
      return Err(QuantError::invalid("strike must be positive"));
    }
    if !self.v.is_finite() || self.v < 0.0 {
      return Err(QuantError::invalid("volatility must be nonnegative"));
    }
    if !self.r.is_finite() {
      return Err(QuantError::invalid("risk-free rate must be finite"));
    }
    Ok(())
  }

  /// Calculate d1 and d2
  fn d1_d2(&self, tau: f64) -> (f64, f64) {
    let d1 =
      ((self.s / self.k).ln() + (self.r + 0.5 * self.v.powi(2)) * tau) / (self.v * tau.sqrt());
    let d2 = d1 - self.v * tau.sqrt();

    (d1, d2)
  }

  /// Payoff at expiry for both sides.
  fn intrinsic(&self) -> (f64, f64) {
    ((self.s - self.k).max(0.0), (self.k - self.s).max(0.0))
  }

  /// Sigma -> 0 limit: intrinsic value against the discounted strike.
  fn discounted_intrinsic(&self, tau: f64) -> (f64, f64) {
    let k_disc = self.k * (-self.r * tau).exp();
    ((self.s - k_disc).max(0.0), (k_disc - self.s).max(0.0))
  }
}

#[cfg(test)]
mod tests {
  use approx::assert_abs_diff_eq;

  use super::*;

  fn pricer(s: f64, v: f64, k: f64, r: f64, tau: f64) -> BlackScholesPricer {
    BlackScholesPricer::new(s, v, k, r, Some(tau), None, None, OptionType::Call)
  }

  #[test]
  fn atm_reference_values() {
    let (call, put) = pricer(100.0, 0.2, 100.0, 0.05, 1.0)
      .calculate_call_put()
      .unwrap();

    assert_abs_diff_eq!(call, 10.4505835722, epsilon = 1e-6);
    assert_abs_diff_eq!(put, 5.5735260223, epsilon = 1e-6);
  }

  #[test]
  fn put_call_parity() {
    let (s, k, tau, r, v) = (100.0, 95.0, 0.75, 0.05, 0.25);
    let (call, put) = pricer(s, v, k, r, tau).calculate_call_put().unwrap();

    let forward = s - k * (-r * tau).exp();
    assert_abs_diff_eq!(call - put, forward, epsilon = 1e-6);
  }

  #[test]
  fn expiry_is_exact_intrinsic() {
    let (call, put) = pricer(110.0, 0.2, 100.0, 0.05, 0.0)
      .calculate_call_put()
      .unwrap();
    assert_eq!(call, 10.0);
    assert_eq!(put, 0.0);

    let (call, put) = pricer(90.0, 0.2, 100.0, 0.05, -0.1)
      .calculate_call_put()
      .unwrap();
    assert_eq!(call, 0.0);
    assert_eq!(put, 10.0);
  }

  #[test]
  fn continuous_at_expiry_boundary() {
    let (call, put) = pricer(110.0, 0.2, 100.0, 0.05, 1e-9)
      .calculate_call_put()
      .unwrap();

    assert_abs_diff_eq!(call, 10.0, epsilon = 1e-3);
    assert_abs_diff_eq!(put, 0.0, epsilon = 1e-3);
  }

  #[test]
  fn price_increases_with_volatility() {
    let vols = [0.05, 0.1, 0.2, 0.4, 0.8];
    let prices: Vec<(f64, f64)> = vols
      .iter()
      .map(|&v| pricer(100.0, v, 105.0, 0.03, 0.5).calculate_call_put().unwrap())
      .collect();

    for pair in prices.windows(2) {
      assert!(pair[1].0 > pair[0].0);
      assert!(pair[1].1 > pair[0].1);
    }
  }

  #[test]
  fn zero_volatility_is_discounted_intrinsic() {
    let (s, k, tau, r) = (100.0, 95.0, 0.75, 0.05);
    let (call, put) = pricer(s, 0.0, k, r, tau).calculate_call_put().unwrap();

    let k_disc = k * (-r * tau).exp();
    assert_abs_diff_eq!(call, s - k_disc, epsilon = 1e-12);
    assert_eq!(put, 0.0);
  }

  #[test]
  fn zero_volatility_matches_small_vol_limit() {
    let (s, k, tau, r) = (100.0, 120.0, 0.5, 0.02);
    let (call_zero, put_zero) = pricer(s, 0.0, k, r, tau).calculate_call_put().unwrap();
    let (call_tiny, put_tiny) = pricer(s, 1e-8, k, r, tau).calculate_call_put().unwrap();

    assert_abs_diff_eq!(call_zero, call_tiny, epsilon = 1e-6);
    assert_abs_diff_eq!(put_zero, put_tiny, epsilon = 1e-6);
  }

  #[test]
  fn rejects_out_of_domain_inputs() {
    assert!(pricer(-1.0, 0.2, 100.0, 0.05, 1.0).calculate_call_put().is_err());
    assert!(pricer(100.0, 0.2, 0.0, 0.05, 1.0).calculate_call_put().is_err());
    assert!(pricer(100.0, -0.2, 100.0, 0.05, 1.0).calculate_call_put().is_err());
    assert!(pricer(100.0, 0.2, 100.0, f64::NAN, 1.0)
      .calculate_call_put()
      .is_err());
    assert!(pricer(100.0, 0.2, 100.0, 0.05, f64::INFINITY)
      .calculate_call_put()
      .is_err());
  }

  #[test]
  fn tau_from_dates_uses_act_365() {
    let eval = chrono::NaiveDate::from_ymd_opt(2025, 1, 2).unwrap();
    let expiration = chrono::NaiveDate::from_ymd_opt(2025, 12, 29).unwrap();
    let bs = BlackScholesPricer::new(
      100.0,
      0.2,
      100.0,
      0.05,
      None,
      Some(eval),
      Some(expiration),
      OptionType::Put,
    );

    assert_abs_diff_eq!(
      bs.calculate_tau_in_years().unwrap(),
      361.0 / 365.0,
      epsilon = 1e-12
    );
  }

  #[test]
  fn tau_required_when_dates_missing() {
    let bs = BlackScholesPricer::new(100.0, 0.2, 100.0, 0.05, None, None, None, OptionType::Call);
    assert!(bs.calculate_call_put().is_err());
  }

  #[test]
  fn call_put_selection() {
    let bs = pricer(100.0, 0.2, 100.0, 0.05, 1.0);
    let (call, put) = bs.calculate_call_put().unwrap();
    assert_eq!(bs.calculate_price().unwrap(), call);

    let bs = BlackScholesPricer {
      option_type: OptionType::Put,
      ..bs
    };
    assert_eq!(bs.calculate_price().unwrap(), put);
  }
}
