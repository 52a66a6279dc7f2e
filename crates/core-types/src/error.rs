use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Series '{series}' has a duplicate date {date}")]
    DuplicateDate { series: String, date: NaiveDate },

    #[error("Series '{series}' is not in ascending date order at {date}")]
    NonMonotonicDates { series: String, date: NaiveDate },

    #[error("Unknown category '{0}'")]
    UnknownCategory(String),
}
