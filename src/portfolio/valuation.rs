//! # Valuation Engine
//!
//! $$
//! \mathrm{PnL}_t = V_t - V_{t_0},\qquad V_t = q\,(S_t + P_t - C_t)
//! $$
//!
//! Sequential mark-to-market scan over an observation series. The first
//! observation fixes the cost basis; every later record reports P&L
//! against it.

use chrono::NaiveDate;
use impl_new_derive::ImplNew;
use tracing::debug;
use tracing::trace;

use super::source::ObservationSource;
use super::types::MarketObservation;
use super::types::OptionSpec;
use super::types::PnlRounding;
use super::types::Position;
use super::types::ValuationConfig;
use super::types::ValuationRecord;
use crate::error::QuantError;
use crate::pricing::bsm::BlackScholesPricer;
use crate::traits::PricerExt;

/// Cost basis of the run. Transitions to `Initialized` exactly once, on
/// the first observation, and never changes afterwards.
#[derive(Clone, Copy, Debug, PartialEq)]
enum CostBasis {
  Uninitialized,
  Initialized(f64),
}

/// Single entry-point engine for collar valuation runs.
#[derive(ImplNew, Clone, Copy, Debug)]
pub struct Valuator {
  /// Position held over the run
  pub position: Position,
  /// Run configuration
  pub config: ValuationConfig,
}

impl Valuator {
  /// Valuate the series yielded by an injected observation source.
  pub fn run_source<S: ObservationSource>(
    &self,
    source: &S,
  ) -> Result<Vec<ValuationRecord>, QuantError> {
    let observations = source.observations()?;
    self.run(&observations)
  }

  /// Valuate a date-ordered observation series in one forward pass.
  ///
  /// Dates must be strictly increasing and spots positive; any violation
  /// aborts the whole run. An empty series yields an empty result and the
  /// cost basis is never set.
  pub fn run(
    &self,
    observations: &[MarketObservation],
  ) -> Result<Vec<ValuationRecord>, QuantError> {
    if self.position.quantity == 0 {
      return Err(QuantError::invalid("quantity must be positive"));
    }
    if !self.config.risk_free_rate.is_finite() {
      return Err(QuantError::invalid("risk-free rate must be finite"));
    }

    let quantity = f64::from(self.position.quantity);
    let mut records = Vec::with_capacity(observations.len());
    let mut cost_basis = CostBasis::Uninitialized;
    let mut prev_date: Option<NaiveDate> = None;

    for observation in observations {
      if let Some(prev) = prev_date {
        if observation.date <= prev {
          return Err(QuantError::OutOfOrderObservation {
            prev,
            next: observation.date,
          });
        }
      }
      prev_date = Some(observation.date);

      if !observation.spot.is_finite() || observation.spot <= 0.0 {
        return Err(QuantError::invalid(format!(
          "spot must be positive at {}",
          observation.date
        )));
      }

      let put_price = self.leg_price(&self.position.put, observation)?;
      let call_price = self.leg_price(&self.position.call, observation)?;

      let portfolio_value = quantity * (observation.spot + put_price - call_price);

      let initial_investment = match cost_basis {
        CostBasis::Uninitialized => {
          cost_basis = CostBasis::Initialized(portfolio_value);
          debug!(
            date = %observation.date,
            initial_investment = portfolio_value,
            "cost basis initialized"
          );
          portfolio_value
        }
        CostBasis::Initialized(value) => value,
      };

      let pnl = portfolio_value - initial_investment;
      let pnl = match self.config.pnl_rounding {
        PnlRounding::Cents => round2(pnl),
        PnlRounding::Exact => pnl,
      };

      let record = ValuationRecord {
        date: observation.date,
        spot: round2(observation.spot),
        put_price: round2(put_price),
        call_price: round2(call_price),
        portfolio_value,
        pnl,
      };
      trace!(date = %record.date, pnl = record.pnl, "record emitted");
      records.push(record);
    }

    Ok(records)
  }

  /// Price one option leg at the observation date.
  fn leg_price(
    &self,
    leg: &OptionSpec,
    observation: &MarketObservation,
  ) -> Result<f64, QuantError> {
    let tau = year_fraction(observation.date, leg.expiry);
    let pricer = BlackScholesPricer::new(
      observation.spot,
      leg.implied_vol,
      leg.strike,
      self.config.risk_free_rate,
      Some(tau),
      None,
      None,
      leg.option_type,
    );

    pricer.calculate_price()
  }
}

/// ACT/365 year fraction, floored at zero for past expiries.
fn year_fraction(from: NaiveDate, to: NaiveDate) -> f64 {
  (to.signed_duration_since(from).num_days() as f64 / 365.0).max(0.0)
}

fn round2(x: f64) -> f64 {
  (x * 100.0).round() / 100.0
}
