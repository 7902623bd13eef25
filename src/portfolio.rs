//! # Portfolio
//!
//! $$
//! \mathrm{PnL}_t = V_t - V_{t_0}
//! $$
//!
//! Collar valuation over a date-ordered price series.

pub mod source;
pub mod types;
pub mod valuation;

pub use source::InMemorySource;
pub use source::ObservationSource;
pub use types::MarketObservation;
pub use types::OptionSpec;
pub use types::PnlRounding;
pub use types::Position;
pub use types::ValuationConfig;
pub use types::ValuationRecord;
pub use valuation::Valuator;
