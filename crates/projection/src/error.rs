use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProjectionError {
    #[error("Rate of {0}% is not meaningful for compounding (must be greater than -100%)")]
    InvalidRate(Decimal),

    #[error("Projection overflowed while computing {0}")]
    Overflow(String),
}
