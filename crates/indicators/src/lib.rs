//! # Series Indicators
//!
//! Trailing smoothing indicators over a dated value series, used to overlay
//! spend, balance and equity charts.
//!
//! - `simple_moving_average` / `exponential_moving_average`: strict versions that
//!   reject a period the series cannot satisfy.
//! - `IndicatorSeries`: chart-facing annotation that tolerates short series.
//! - `rolling_mean` / `rolling_ema`: the raw-slice kernels shared by both, and by
//!   the backtester's crossover signal.

pub mod error;
pub mod moving_average;
pub mod series;

pub use error::IndicatorError;
pub use moving_average::{
    exponential_moving_average, rolling_ema, rolling_mean, simple_moving_average,
};
pub use series::{IndicatorPoint, IndicatorSeries, IndicatorSpec};
