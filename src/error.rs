use chrono::NaiveDate;
use thiserror::Error;

/// Errors produced by pricing and valuation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuantError {
  /// Input outside the pricer's or valuator's domain.
  #[error("invalid input: {reason}")]
  InvalidInput {
    /// What was rejected.
    reason: String,
  },

  /// Observation dates must be strictly increasing.
  #[error("out-of-order observation: {next} does not follow {prev}")]
  OutOfOrderObservation {
    /// Date of the previous observation.
    prev: NaiveDate,
    /// Offending date.
    next: NaiveDate,
  },
}

impl QuantError {
  pub(crate) fn invalid(reason: impl Into<String>) -> Self {
    Self::InvalidInput {
      reason: reason.into(),
    }
  }
}
