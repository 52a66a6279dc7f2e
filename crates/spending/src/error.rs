use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpendingError {
    #[error("Threshold must not be negative, got {0}")]
    InvalidThreshold(String),

    #[error("Error in calculation: {0}")]
    Calculation(String),
}
