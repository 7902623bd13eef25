//! # collar-rs
//!
//! $$
//! V_t = q\,(S_t + P_t - C_t)
//! $$
//!
//! Mark-to-market valuation and P&L tracking for a collared equity position
//! (long underlying, long protective put, short covered call) over a
//! date-ordered price series, using closed-form Black-Scholes pricing.

pub mod error;
pub mod portfolio;
pub mod pricing;
pub mod traits;

pub use error::QuantError;

/// Option type.
#[derive(Default, Clone, Copy, PartialEq, Eq, Debug)]
pub enum OptionType {
  #[default]
  Call,
  Put,
}
