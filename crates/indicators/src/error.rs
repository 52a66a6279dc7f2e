use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IndicatorError {
    #[error("Indicator period must be at least 1")]
    InvalidPeriod,

    #[error("Series '{series}' has {len} points, fewer than the period {period}")]
    InsufficientData { series: String, len: usize, period: usize },
}
