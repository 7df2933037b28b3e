//! measures — closed-form market-microstructure and performance measures.
//!
//! Purpose
//! -------
//! Provide the array formulas that surround PIN estimation: trade-sign
//! classification, bid–ask spreads, the Roll decomposition of price-change
//! variance, and basic investment metrics. None of these need optimization;
//! each is a single pass (or two) over validated slices.
//!
//! Key behaviors
//! -------------
//! - [`trade_direction`]: tick test and Lee–Ready classification into
//!   [`TradeDirection`] values.
//! - [`liquidity`]: quoted and effective spreads.
//! - [`volatility`]: [`roll_model_analysis`] returning a [`RollAnalysis`].
//! - [`investment`]: CAGR, ROI, Sharpe ratio and log-return volatility.
//!
//! Conventions
//! -----------
//! - Inputs are `&[f64]` slices in time order; parallel slices must have
//!   equal lengths. Failures are [`MeasureError`] values, never panics.
//! - Descriptive statistics go through `statrs::statistics::Statistics`.
//!
//! Downstream usage
//! ----------------
//! - Classified trades feed `pin::core::VolumeSeries::from_classified_trades`.
//! - Python bindings expose each submodule under `_rust_microstructure`.

pub mod errors;
pub mod investment;
pub mod liquidity;
pub mod trade_direction;
pub mod validation;
pub mod volatility;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::errors::{MeasureError, MeasureResult};
pub use self::investment::{
    DEFAULT_RISK_FREE_RATE, cagr, log_return_volatility, roi, sharpe_ratio,
};
pub use self::liquidity::{effective_spread, quoted_spread};
pub use self::trade_direction::{TradeDirection, lee_ready_direction, tick_direction};
pub use self::volatility::{RollAnalysis, TRADING_DAYS_PER_YEAR, roll_model_analysis};

// ---- Optional convenience prelude for downstream crates -------------------

pub mod prelude {
    pub use super::{
        MeasureError, MeasureResult, RollAnalysis, TradeDirection, cagr, effective_spread,
        lee_ready_direction, log_return_volatility, quoted_spread, roi, roll_model_analysis,
        sharpe_ratio, tick_direction,
    };
}
