//! # Portfolio Types
//!
//! $$
//! V_t = q\,(S_t + P_t - C_t)
//! $$
//!
//! Shared value types for collar valuation.

use chrono::NaiveDate;
use impl_new_derive::ImplNew;
use serde::Deserialize;
use serde::Serialize;

use crate::OptionType;

/// A single option leg of the position.
#[derive(ImplNew, Clone, Copy, Debug)]
pub struct OptionSpec {
  /// Option type
  pub option_type: OptionType,
  /// Strike price
  pub strike: f64,
  /// Implied volatility
  pub implied_vol: f64,
  /// Expiration date
  pub expiry: NaiveDate,
}

/// The position held over a whole valuation run: `quantity` units of the
/// underlying, a protective put bought `quantity` times and a covered call
/// written `quantity` times. The legs keep independent expiries.
#[derive(ImplNew, Clone, Copy, Debug)]
pub struct Position {
  /// Number of units held in every leg
  pub quantity: u32,
  /// Protective put leg
  pub put: OptionSpec,
  /// Covered call leg
  pub call: OptionSpec,
}

/// One close observation of the underlying.
#[derive(ImplNew, Clone, Copy, Debug, PartialEq)]
pub struct MarketObservation {
  /// Observation date
  pub date: NaiveDate,
  /// Underlying close price
  pub spot: f64,
}

/// Rounding applied to the emitted `pnl` field.
#[derive(Default, Clone, Copy, PartialEq, Eq, Debug)]
pub enum PnlRounding {
  /// Round to two decimal places.
  #[default]
  Cents,
  /// Emit the raw value.
  Exact,
}

/// Runtime configuration for [`crate::portfolio::Valuator`].
#[derive(Clone, Copy, Debug)]
pub struct ValuationConfig {
  /// Risk-free rate, constant over the run
  pub risk_free_rate: f64,
  /// Rounding policy for the emitted `pnl`
  pub pnl_rounding: PnlRounding,
}

impl Default for ValuationConfig {
  fn default() -> Self {
    Self {
      risk_free_rate: 0.0,
      pnl_rounding: PnlRounding::Cents,
    }
  }
}

/// One mark-to-market record, emitted per observation in date order.
///
/// The serialized shape is the wire contract of the presentation layer:
/// `{date, nifty_close, put_price, call_price, pnl}` with an ISO-8601 date.
/// `portfolio_value` stays internal.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValuationRecord {
  /// Observation date
  pub date: NaiveDate,
  /// Underlying close, rounded to two decimals
  #[serde(rename = "nifty_close")]
  pub spot: f64,
  /// Put leg price, rounded to two decimals
  pub put_price: f64,
  /// Call leg price, rounded to two decimals
  pub call_price: f64,
  /// Unrounded mark-to-market value of the position
  #[serde(skip)]
  pub portfolio_value: f64,
  /// Profit and loss against the first observation's portfolio value
  pub pnl: f64,
}
