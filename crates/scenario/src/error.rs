use core_types::Category;
use projection::ProjectionError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScenarioError {
    #[error("Adjustment for category '{0}' has no baseline amount")]
    UnknownCategory(Category),

    #[error("Projection error: {0}")]
    Projection(#[from] ProjectionError),
}
