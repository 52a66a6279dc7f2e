//! # Analytics Engine
//!
//! Scores a series of periodic returns: total and annualized growth, volatility,
//! risk-adjusted ratios, drawdown and hit rate. It is the common judge for every
//! backtest the `backtester` crate runs.
//!
//! ## Public API
//!
//! - `AnalyticsEngine`: a stateless calculator configured with a risk-free rate
//!   and the number of return periods per year.
//! - `PerformanceReport`: the resulting metrics.
//! - `AnalyticsError`: the specific error types that can be returned from this crate.

pub mod engine;
pub mod error;
pub mod report;

pub use engine::AnalyticsEngine;
pub use error::AnalyticsError;
pub use report::PerformanceReport;
