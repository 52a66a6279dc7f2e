use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BacktestError {
    #[error("Analytics calculation error: {0}")]
    Analytics(#[from] analytics::AnalyticsError),

    #[error("Series alignment error: {0}")]
    Comparison(#[from] comparison::ComparisonError),

    #[error("Invalid series: {0}")]
    Series(#[from] core_types::CoreError),

    #[error("Unknown allocation preset: {0}")]
    UnknownPreset(String),

    #[error("Crossover needs 0 < short < long, got {short}/{long}")]
    InvalidWindows { short: usize, long: usize },

    #[error("Allocation weights must be non-negative and sum to more than zero (total {0})")]
    InvalidWeights(Decimal),

    #[error("No price series supplied for asset '{0}'")]
    MissingPrices(String),

    #[error("Price of '{series}' is zero on {date}; returns are undefined")]
    ZeroPrice { series: String, date: NaiveDate },
}
