use analytics::PerformanceReport;
use core_types::{AlignedTable, DatedValue};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The outcome of replaying one strategy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BacktestResult {
    pub strategy_name: String,
    pub report: PerformanceReport,
    pub total_trades: usize,
    /// Portfolio value over time, thinned to every n-th point.
    pub equity_curve: Vec<DatedValue>,
}

impl BacktestResult {
    pub(crate) fn empty(strategy_name: impl Into<String>) -> Self {
        Self {
            strategy_name: strategy_name.into(),
            report: PerformanceReport::new(),
            total_trades: 0,
            equity_curve: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetBacktest {
    pub preset: String,
    pub name: String,
    pub description: String,
    pub allocation: BTreeMap<String, Decimal>,
    pub result: BacktestResult,
}

/// Several strategies over the same prices, with their equity curves merged by date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyComparison {
    pub strategies: Vec<BacktestResult>,
    pub equity_table: AlignedTable,
}
