use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalyticsError {
    #[error("Initial value must be positive, got {0}")]
    InvalidInitialValue(Decimal),

    #[error("Periods per year must be positive")]
    InvalidPeriodsPerYear,

    #[error("Error in calculation: {0}")]
    Calculation(String),
}
