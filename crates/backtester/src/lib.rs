//! # Backtester
//!
//! Replays historical daily prices through three kinds of strategy and scores
//! each with the [`analytics`] engine:
//!
//! - buy and hold of a single series,
//! - a short/long SMA crossover that is invested only while the short average
//!   is above the long one,
//! - a fixed-weight multi-asset allocation (named presets come from configuration).
//!
//! Everything operates on prices already in memory; fetching them is the
//! caller's concern.

pub mod engine;
pub mod error;
pub mod result;

pub use engine::{Backtester, allocation_label};
pub use error::BacktestError;
pub use result::{BacktestResult, PresetBacktest, StrategyComparison};
