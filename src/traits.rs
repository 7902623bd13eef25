use chrono::NaiveDate;

use crate::error::QuantError;

/// Pricer trait.
pub trait PricerExt: TimeExt {
  /// Calculate the call and put price.
  fn calculate_call_put(&self) -> Result<(f64, f64), QuantError>;

  /// Calculate the price for the configured option type.
  fn calculate_price(&self) -> Result<f64, QuantError>;
}

pub trait TimeExt {
  fn tau(&self) -> Option<f64>;

  fn eval(&self) -> Option<NaiveDate> {
    None
  }

  fn expiration(&self) -> Option<NaiveDate> {
    None
  }

  /// Return tau directly, or compute it from eval/expiration dates (ACT/365).
  fn tau_or_from_dates(&self) -> Result<f64, QuantError> {
    if let Some(tau) = self.tau() {
      return Ok(tau);
    }
    match (self.eval(), self.expiration()) {
      (Some(e), Some(x)) => Ok(x.signed_duration_since(e).num_days() as f64 / 365.0),
      _ => Err(QuantError::invalid(
        "either tau or both eval and expiration must be set",
      )),
    }
  }

  /// Calculate tau in years.
  fn calculate_tau_in_years(&self) -> Result<f64, QuantError> {
    self.tau_or_from_dates()
  }
}
