use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ComparisonError {
    #[error("Series name '{0}' appears more than once")]
    DuplicateSeriesName(String),
}
