use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Performance of one return series.
///
/// Percentages are expressed as 0-100. Ratios are `None` when their
/// denominator (a standard deviation) is zero or cannot be estimated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformanceReport {
    pub total_return_pct: Decimal,
    /// `None` when the annualized figure is out of range.
    pub cagr_pct: Option<Decimal>,
    /// Annualized standard deviation of returns.
    pub volatility_pct: Decimal,
    pub sharpe_ratio: Option<Decimal>,
    /// Like Sharpe, but only penalizes downside deviation.
    pub sortino_ratio: Option<Decimal>,
    /// Worst peak-to-trough fall; zero or negative.
    pub max_drawdown_pct: Decimal,
    /// Share of periods with a positive return.
    pub win_rate_pct: Decimal,
    pub final_value: Decimal,
}

impl PerformanceReport {
    /// Creates a zeroed-out report, used when there is too little data to score.
    pub fn new() -> Self {
        Self {
            total_return_pct: Decimal::ZERO,
            cagr_pct: Some(Decimal::ZERO),
            volatility_pct: Decimal::ZERO,
            sharpe_ratio: None,
            sortino_ratio: None,
            max_drawdown_pct: Decimal::ZERO,
            win_rate_pct: Decimal::ZERO,
            final_value: Decimal::ZERO,
        }
    }
}

impl Default for PerformanceReport {
    fn default() -> Self {
        Self::new()
    }
}
