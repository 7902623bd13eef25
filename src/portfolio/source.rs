//! # Observation Sources
//!
//! Providers of a finite, date-ordered series of underlying closes. File-
//! and feed-backed providers live outside the crate; they normalize their
//! rows into [`MarketObservation`] and hand the valuator one of these.

use impl_new_derive::ImplNew;

use super::types::MarketObservation;
use crate::error::QuantError;

/// A provider of a finite observation series, oldest first.
pub trait ObservationSource {
  /// Materialize the full series.
  fn observations(&self) -> Result<Vec<MarketObservation>, QuantError>;
}

/// Source backed by an already-materialized series.
#[derive(ImplNew, Clone, Debug, Default)]
pub struct InMemorySource {
  /// Observations, oldest first
  pub series: Vec<MarketObservation>,
}

impl ObservationSource for InMemorySource {
  fn observations(&self) -> Result<Vec<MarketObservation>, QuantError> {
    Ok(self.series.clone())
  }
}
