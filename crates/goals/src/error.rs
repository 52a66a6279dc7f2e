use projection::ProjectionError;
use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GoalError {
    #[error("Goal '{name}' has a non-positive target of {target}")]
    InvalidGoal { name: String, target: Decimal },

    #[error("Projection error: {0}")]
    Projection(#[from] ProjectionError),
}
